#![cfg_attr(not(feature = "std"), no_std)]

//! Acquisition engine for the Toshiba TCD1304 linear CCD sensor.
//!
//! The driver is split into two parts:
//! 1) A generic engine (this crate) that validates clock parameters, owns the
//!    acquisition state machine and folds captured frames into an averaged
//!    spectrum.
//! 2) A portable layer behind the [`SensorPort`] trait that programs the
//!    actual timer, ADC and DMA peripherals. Moving to a different hardware
//!    platform only requires a new port implementation.
//!
//! The engine holds no global state: the application owns a [`Tcd1304`]
//! instance and hands it by reference both to its main loop and to the port's
//! capture-complete interrupt glue.
//!
//! ```
//! use tcd1304::{HwError, SensorConfig, SensorPort, Tcd1304};
//!
//! struct NoopPort;
//!
//! impl SensorPort for NoopPort {
//!     fn init_adc(&mut self) -> Result<(), HwError> { Ok(()) }
//!     fn configure_master_clock(&mut self, _f_master_hz: u32) {}
//!     fn configure_readout_clock(&mut self, _t_icg_us: u32) {}
//!     fn configure_shutter_clock(&mut self, _t_int_us: u32) {}
//!     fn configure_adc_trigger(&mut self, _f_adc_hz: u32) {}
//!     fn start_capture(&mut self) -> Result<(), HwError> { Ok(()) }
//!     fn start_generators(&mut self) {}
//!     fn stop_generators(&mut self) {}
//! }
//!
//! # fn main() -> tcd1304::Result<()> {
//! let mut sensor = Tcd1304::new(NoopPort);
//! sensor.init(SensorConfig { avg: 2, ..SensorConfig::default() })?;
//! sensor.start()?;
//!
//! // Normally the port's DMA fills the raw frame and the capture-complete
//! // interrupt invokes frame_captured(); emulate two captures by hand.
//! for _ in 0..2 {
//!     sensor.raw_frame_mut().fill(512);
//!     sensor.frame_captured();
//! }
//!
//! assert!(sensor.is_data_ready());
//! assert_eq!(sensor.averaged_frame()[0], 512);
//! sensor.clear_data_ready();
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod port;
pub mod tcd;
pub mod types;

pub use config::SensorConfig;
pub use error::{Error, Result, Warnings};
pub use port::{HwError, SensorPort};
pub use tcd::Tcd1304;
pub use types::{Frame, Phase, FRAME_PIXEL_COUNT};
