use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum HwError {
    #[error("ADC or DMA peripheral failed to initialize")]
    AdcInit,
    #[error("ADC capture could not be started")]
    CaptureStart,
}

/// Hardware abstraction the engine drives.
///
/// A port implementation owns every register-level detail: timers for the
/// master clock and the ICG/SH pulses, the ADC and its DMA channel, pins and
/// clock tree. The engine only ever talks to the sensor through these calls,
/// plus one callback in the other direction: the port must invoke
/// [`Tcd1304::frame_captured`](crate::Tcd1304::frame_captured) from its
/// capture-complete interrupt, after the raw frame is fully written.
pub trait SensorPort {
    /// Bring up the ADC and its DMA channel.
    fn init_adc(&mut self) -> Result<(), HwError>;

    /// Program the CCD master clock (fM) generator, in Hz.
    fn configure_master_clock(&mut self, f_master_hz: u32);

    /// Program the ICG (readout gate) pulse period, in microseconds.
    fn configure_readout_clock(&mut self, t_icg_us: u32);

    /// Program the SH (electronic shutter) pulse period, in microseconds.
    fn configure_shutter_clock(&mut self, t_int_us: u32);

    /// Program the ADC conversion trigger. The engine always derives the
    /// rate as a quarter of the master clock.
    fn configure_adc_trigger(&mut self, f_adc_hz: u32);

    /// Arm the ADC-to-memory transfer. Called once at the end of init; from
    /// then on conversion and transfer are driven entirely by hardware.
    fn start_capture(&mut self) -> Result<(), HwError>;

    /// Begin generating ICG and SH pulses.
    fn start_generators(&mut self);

    /// Halt ICG and SH pulse generation.
    fn stop_generators(&mut self);
}
