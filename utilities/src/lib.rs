use mockall::mock;
use tcd1304::{Frame, HwError, SensorPort, FRAME_PIXEL_COUNT};

mock! {
    pub Port {}
    impl SensorPort for Port {
        fn init_adc(&mut self) -> Result<(), HwError>;
        fn configure_master_clock(&mut self, f_master_hz: u32);
        fn configure_readout_clock(&mut self, t_icg_us: u32);
        fn configure_shutter_clock(&mut self, t_int_us: u32);
        fn configure_adc_trigger(&mut self, f_adc_hz: u32);
        fn start_capture(&mut self) -> Result<(), HwError>;
        fn start_generators(&mut self);
        fn stop_generators(&mut self);
    }
}

/// Mock port that accepts any sequence of calls, for tests exercising the
/// engine rather than the port contract.
pub fn relaxed_port() -> MockPort {
    let mut port = MockPort::new();
    port.expect_init_adc().returning(|| Ok(()));
    port.expect_configure_master_clock().return_const(());
    port.expect_configure_readout_clock().return_const(());
    port.expect_configure_shutter_clock().return_const(());
    port.expect_configure_adc_trigger().return_const(());
    port.expect_start_capture().returning(|| Ok(()));
    port.expect_start_generators().return_const(());
    port.expect_stop_generators().return_const(());
    port
}

/// Frame with every pixel at `value`.
pub fn flat_frame(value: u16) -> Frame {
    [value; FRAME_PIXEL_COUNT]
}

/// Frame with pixel `i` at `i % 4096`, handy for per-pixel assertions.
pub fn ramp_frame() -> Frame {
    core::array::from_fn(|i| (i % 4096) as u16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_stays_within_12_bits() {
        let frame = ramp_frame();
        assert_eq!(frame[0], 0);
        assert_eq!(frame[4095], 4095);
        assert_eq!(frame[4096], 0);
        assert!(frame.iter().all(|&px| px < 4096));
    }
}
