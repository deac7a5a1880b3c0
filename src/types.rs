/// Amount of pixel samples in one readout, dummy elements included. Shared
/// with the port: the DMA transfer length must match.
pub const FRAME_PIXEL_COUNT: usize = 3694;

/// One complete set of per-pixel samples between two successive ICG pulses.
pub type Frame = [u16; FRAME_PIXEL_COUNT];

/// Acquisition buffers. `raw` is written by the port's DMA, `accu` and `avg`
/// only by the capture-complete callback.
pub(crate) struct SensorData {
    pub(crate) raw: Frame,
    // Wide running sum; init() rejects averaging counts the u32 cannot hold.
    pub(crate) accu: [u32; FRAME_PIXEL_COUNT],
    pub(crate) avg: Frame,
}

impl SensorData {
    pub(crate) fn new() -> Self {
        SensorData {
            raw: [0; FRAME_PIXEL_COUNT],
            accu: [0; FRAME_PIXEL_COUNT],
            avg: [0; FRAME_PIXEL_COUNT],
        }
    }

    /// Clears the running sum, for re-initialization.
    pub(crate) fn reset_accumulator(&mut self) {
        self.accu = [0; FRAME_PIXEL_COUNT];
    }
}

/// Acquisition state machine phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing but [`init`](crate::Tcd1304::init) is legal.
    Uninitialized,
    /// Hardware programmed, pulse generators idle.
    Ready,
    /// Pulse generators running, frames arriving.
    Running,
}
