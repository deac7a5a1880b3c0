use core::result::Result as CoreResult;
use thiserror::Error;

use crate::port::HwError;

pub type Result<T> = CoreResult<T, Error>;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("driver has not been initialized")]
    NotInitialized,
    #[error("hardware init failed: {0}")]
    HardwareInit(#[from] HwError),
    #[error("master clock of {0} Hz is not divisible by 4, no exact ADC trigger rate exists")]
    MasterClockIndivisible(u32),
    #[error("ICG period of {t_icg_us} us is not a multiple of the SH period of {t_int_us} us, pulses would drift apart")]
    PulseDesync { t_icg_us: u32, t_int_us: u32 },
    #[error("parameter is outside the accepted range")]
    ParamOutOfRange,
}

/// Parameters that were replaced by their documented defaults during
/// [`init`](crate::Tcd1304::init). Initialization still succeeds; the caller
/// decides whether a substituted value is acceptable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Warnings {
    /// Master clock was outside 0.8 - 4 MHz.
    pub master_clock_defaulted: bool,
    /// ICG period was zero or above the supported maximum.
    pub readout_defaulted: bool,
    /// SH period was outside 10 us - ICG period.
    pub shutter_defaulted: bool,
}

impl Warnings {
    pub fn any(self) -> bool {
        self.master_clock_defaulted || self.readout_defaulted || self.shutter_defaulted
    }
}
