use core::sync::atomic::{AtomicBool, Ordering};

use log::{debug, warn};
use scopeguard::guard;

use crate::{
    config::{self, SensorConfig},
    error::{Error, Result, Warnings},
    port::SensorPort,
    types::{Frame, Phase, SensorData},
};

/// TCD1304 acquisition engine.
///
/// Owns the pixel buffers and the acquisition state machine, and drives an
/// abstract [`SensorPort`] that does the actual timer/ADC programming. One
/// instance per sensor, owned by the application; interrupt glue gets a
/// reference to it for [`Tcd1304::frame_captured`].
pub struct Tcd1304<P: SensorPort> {
    port: P,
    // Effective configuration: requested values with defaults/corrections
    // already applied
    config: SensorConfig,
    data: SensorData,
    // Frames folded in since the last publish, < config.avg outside of
    // frame_captured()
    frame_count: u32,
    total_frames_acquired: u64,
    ready: AtomicBool,
    phase: Phase,
}

impl<P: SensorPort> Tcd1304<P> {
    pub fn new(port: P) -> Self {
        Tcd1304 {
            port,
            config: SensorConfig::default(),
            data: SensorData::new(),
            frame_count: 0,
            total_frames_acquired: 0,
            ready: AtomicBool::new(false),
            phase: Phase::Uninitialized,
        }
    }

    /// Validates `config`, programs the port and arms the ADC capture.
    ///
    /// Out-of-range clock parameters are replaced by documented defaults and
    /// reported through the returned [`Warnings`] instead of failing the
    /// init. Hard failures abort immediately and leave the driver
    /// uninitialized: ADC bring-up errors, a master clock with no exact
    /// quarter-rate ADC trigger, and an SH period that does not divide the
    /// ICG period (the pulses would drift apart, which cannot be safely
    /// defaulted around).
    pub fn init(&mut self, config: SensorConfig) -> Result<Warnings> {
        self.phase = Phase::Uninitialized;
        let mut warnings = Warnings::default();

        // The accumulator must hold avg full-scale samples
        if config.avg == 0 || u64::from(config.avg) * u64::from(u16::MAX) > u64::from(u32::MAX) {
            return Err(Error::ParamOutOfRange);
        }

        self.port.init_adc()?;

        let (f_master_hz, defaulted) = config.effective_master_clock();
        if defaulted {
            warn!(
                "master clock of {} Hz out of range, falling back to {} Hz",
                config.f_master_hz, f_master_hz
            );
            warnings.master_clock_defaulted = true;
        }
        if f_master_hz % 4 != 0 {
            return Err(Error::MasterClockIndivisible(f_master_hz));
        }
        self.port.configure_master_clock(f_master_hz);
        self.port.configure_adc_trigger(f_master_hz / 4);

        let (t_icg_us, defaulted) = config.effective_readout_period();
        if defaulted {
            warn!(
                "readout period of {} us out of range, falling back to {} us",
                config.t_icg_us, t_icg_us
            );
            warnings.readout_defaulted = true;
        }
        self.port.configure_readout_clock(t_icg_us);

        if config.t_int_us == 0 {
            return Err(Error::ParamOutOfRange);
        }
        if t_icg_us % config.t_int_us != 0 {
            return Err(Error::PulseDesync {
                t_icg_us,
                t_int_us: config.t_int_us,
            });
        }
        let (t_int_us, defaulted) = config.effective_integration_time(t_icg_us);
        if defaulted {
            warn!(
                "integration time of {} us out of range, falling back to {} us",
                config.t_int_us, t_int_us
            );
            warnings.shutter_defaulted = true;
        }
        self.port.configure_shutter_clock(t_int_us);

        self.port.start_capture()?;

        self.config = SensorConfig {
            f_master_hz,
            t_icg_us,
            t_int_us,
            avg: config.avg,
        };
        self.data.reset_accumulator();
        self.frame_count = 0;
        self.total_frames_acquired = 0;
        self.ready.store(false, Ordering::Release);
        self.phase = Phase::Ready;
        debug!("initialized: {:?}", self.config);

        Ok(warnings)
    }

    /// Starts ICG and SH pulse generation; frames begin arriving.
    pub fn start(&mut self) -> Result<()> {
        if self.phase == Phase::Uninitialized {
            return Err(Error::NotInitialized);
        }
        self.port.start_generators();
        self.phase = Phase::Running;
        debug!("acquisition running");
        Ok(())
    }

    /// Halts pulse generation. The driver stays ready for a restart.
    pub fn stop(&mut self) -> Result<()> {
        if self.phase == Phase::Uninitialized {
            return Err(Error::NotInitialized);
        }
        self.port.stop_generators();
        self.phase = Phase::Ready;
        debug!("acquisition stopped");
        Ok(())
    }

    /// Changes the exposure without a full re-initialization.
    ///
    /// The requested period is bumped up to the nearest value that keeps the
    /// SH and ICG pulses overlapping (see [`config::find_integration_time`])
    /// and the corrected value is returned. Pulse generation pauses for the
    /// reprogramming and, if it was running, resumes afterwards; that also
    /// holds when the request is rejected, in which case the previous timing
    /// stays in effect.
    pub fn set_integration_time(&mut self, t_int_us: u32) -> Result<u32> {
        if self.phase == Phase::Uninitialized {
            return Err(Error::NotInitialized);
        }
        let was_running = self.phase == Phase::Running;
        self.port.stop_generators();
        let mut s = guard(self, |s| {
            if was_running {
                s.port.start_generators();
            }
        });
        let t_int_us = config::find_integration_time(s.config.t_icg_us, t_int_us)?;
        s.port.configure_shutter_clock(t_int_us);
        s.config.t_int_us = t_int_us;
        debug!("integration time set to {} us", t_int_us);
        Ok(t_int_us)
    }

    /// Folds the most recent raw frame into the accumulator and publishes an
    /// averaged frame every `avg` captures.
    ///
    /// The port glue calls this from the capture-complete interrupt, once
    /// per fully written raw frame. Runs in O(pixel count) with no
    /// allocation and no failure path: once init() succeeded the averaging
    /// count and buffer sizes are fixed.
    pub fn frame_captured(&mut self) {
        debug_assert!(self.phase != Phase::Uninitialized);
        debug_assert!(self.frame_count < self.config.avg);

        self.total_frames_acquired = self.total_frames_acquired.wrapping_add(1);
        self.frame_count += 1;

        for (accu, raw) in self.data.accu.iter_mut().zip(self.data.raw.iter()) {
            *accu += u32::from(*raw);
        }

        if self.frame_count == self.config.avg {
            for (avg, accu) in self.data.avg.iter_mut().zip(self.data.accu.iter_mut()) {
                *avg = (*accu / self.config.avg) as u16;
                *accu = 0;
            }
            self.frame_count = 0;
            // Release pairs with the Acquire in is_data_ready() so a consumer
            // that observes the flag also observes the finished avg buffer
            self.ready.store(true, Ordering::Release);
        }
    }

    /// Capture target for the port: the DMA (or a test) writes one complete
    /// raw frame here before [`Tcd1304::frame_captured`] is invoked. The
    /// engine never reads it in between; that ordering is the port's
    /// buffering discipline to uphold.
    pub fn raw_frame_mut(&mut self) -> &mut Frame {
        &mut self.data.raw
    }

    /// Most recent raw (unaveraged) frame.
    pub fn raw_frame(&self) -> &Frame {
        &self.data.raw
    }

    /// Last published averaged frame.
    ///
    /// Stable from the moment [`Tcd1304::is_data_ready`] reads true until
    /// `avg` further frames have been captured. A consumer that drains it
    /// and clears the flag well within `avg x t_icg_us` (1.52 s with the
    /// default configuration) never observes a partial overwrite.
    pub fn averaged_frame(&self) -> &Frame {
        &self.data.avg
    }

    /// True once a new averaged frame has been published. Only
    /// [`Tcd1304::clear_data_ready`] resets it; the engine never does.
    pub fn is_data_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Consumer acknowledgement, to be called after the averaged frame has
    /// been fully read out.
    pub fn clear_data_ready(&self) {
        self.ready.store(false, Ordering::Release);
    }

    /// Raw frames captured since init, across publish boundaries. Wraps at
    /// the numeric limit.
    pub fn total_frames_acquired(&self) -> u64 {
        self.total_frames_acquired
    }

    /// Effective configuration, with any defaults and corrections applied.
    pub fn config(&self) -> &SensorConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }
}
