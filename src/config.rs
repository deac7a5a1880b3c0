use crate::error::{Error, Result};

/// Master clock limits from the TCD1304 datasheet.
pub const FM_MIN_HZ: u32 = 800_000;
pub const FM_MAX_HZ: u32 = 4_000_000;
/// Fallback master clock when the requested one is out of range.
pub const FM_DEFAULT_HZ: u32 = 4_000_000;

/// Longest supported readout (ICG) period.
pub const T_ICG_MAX_US: u32 = 1_000_000;
pub const T_ICG_DEFAULT_US: u32 = 3_800;

/// Shortest SH period the sensor accepts.
pub const T_INT_MIN_US: u32 = 10;
pub const T_INT_DEFAULT_US: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorConfig {
    /// Master clock (fM) frequency in Hz.
    pub f_master_hz: u32,
    /// ICG (readout) period in microseconds.
    pub t_icg_us: u32,
    /// SH (integration/shutter) period in microseconds. Must satisfy
    /// `t_icg_us = N x t_int_us` for integer N so the pulses overlap.
    pub t_int_us: u32,
    /// Raw frames accumulated per published averaged frame.
    pub avg: u32,
}

impl Default for SensorConfig {
    /// Full-rate acquisition: at 4 MHz the 3694 pixels shift out in
    /// 3.694 ms, so a 3.8 ms ICG period leaves ~100 us of slack for the ICG
    /// pulse and interrupt reaction time. With 400-frame averaging a
    /// spectrum is published every 1.52 s.
    fn default() -> Self {
        SensorConfig {
            f_master_hz: 4_000_000,
            t_icg_us: 3_800,
            t_int_us: 10,
            avg: 400,
        }
    }
}

impl SensorConfig {
    /// Master clock to program, plus whether the default was substituted.
    pub(crate) fn effective_master_clock(&self) -> (u32, bool) {
        if (FM_MIN_HZ..=FM_MAX_HZ).contains(&self.f_master_hz) {
            (self.f_master_hz, false)
        } else {
            (FM_DEFAULT_HZ, true)
        }
    }

    /// ICG period to program, plus whether the default was substituted.
    pub(crate) fn effective_readout_period(&self) -> (u32, bool) {
        if (1..=T_ICG_MAX_US).contains(&self.t_icg_us) {
            (self.t_icg_us, false)
        } else {
            (T_ICG_DEFAULT_US, true)
        }
    }

    /// SH period range check against the effective ICG period. Divisibility
    /// is checked separately by the caller: it is a hard error, not a
    /// defaultable one.
    pub(crate) fn effective_integration_time(&self, t_icg_us: u32) -> (u32, bool) {
        if self.t_int_us >= T_INT_MIN_US && self.t_int_us <= t_icg_us {
            (self.t_int_us, false)
        } else {
            (T_INT_DEFAULT_US, true)
        }
    }
}

/// Finds the smallest integration time >= `requested` whose SH pulses stay
/// in lockstep with the ICG pulse, i.e. `t_icg_us % t_int_us == 0`.
///
/// Plain linear scan. It always terminates: `t_icg_us` divides itself, so
/// the first hit comes at or before the candidate reaches `t_icg_us`. A
/// request above the ICG period (or zero) has no valid answer.
pub fn find_integration_time(t_icg_us: u32, requested: u32) -> Result<u32> {
    if requested == 0 || requested > t_icg_us {
        return Err(Error::ParamOutOfRange);
    }
    let mut t_int_us = requested;
    while t_icg_us % t_int_us != 0 {
        t_int_us += 1;
    }
    Ok(t_int_us)
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::{assert_err, assert_ok_eq};

    #[test]
    fn master_clock_within_limits_is_kept() {
        for f in [FM_MIN_HZ, 1_000_000, 2_400_000, FM_MAX_HZ] {
            let config = SensorConfig {
                f_master_hz: f,
                ..SensorConfig::default()
            };
            assert_eq!(config.effective_master_clock(), (f, false));
        }
    }

    #[test]
    fn master_clock_outside_limits_is_defaulted() {
        for f in [0, FM_MIN_HZ - 1, FM_MAX_HZ + 1, u32::MAX] {
            let config = SensorConfig {
                f_master_hz: f,
                ..SensorConfig::default()
            };
            assert_eq!(config.effective_master_clock(), (FM_DEFAULT_HZ, true));
        }
    }

    #[test]
    fn readout_period_outside_limits_is_defaulted() {
        for t in [0, T_ICG_MAX_US + 1] {
            let config = SensorConfig {
                t_icg_us: t,
                ..SensorConfig::default()
            };
            assert_eq!(config.effective_readout_period(), (T_ICG_DEFAULT_US, true));
        }
        let config = SensorConfig::default();
        assert_eq!(config.effective_readout_period(), (3_800, false));
    }

    #[test]
    fn short_integration_time_is_defaulted() {
        let config = SensorConfig {
            t_int_us: 2,
            ..SensorConfig::default()
        };
        assert_eq!(
            config.effective_integration_time(3_800),
            (T_INT_DEFAULT_US, true)
        );
    }

    #[test]
    fn search_keeps_exact_divisors() {
        assert_ok_eq!(find_integration_time(3_800, 10), 10);
        // Idempotent over every divisor of the readout period
        for d in 1..=3_800 {
            if 3_800 % d == 0 {
                assert_ok_eq!(find_integration_time(3_800, d), d);
            }
        }
    }

    #[test]
    fn search_bumps_up_to_next_divisor() {
        // 3800 = 2^3 x 5^2 x 19; nothing between 11 and 19 divides it
        assert_ok_eq!(find_integration_time(3_800, 11), 19);
    }

    #[test]
    fn search_matches_brute_force_minimum() {
        for requested in 1..=3_800u32 {
            let expected = (requested..=3_800).find(|c| 3_800 % c == 0).unwrap();
            assert_ok_eq!(find_integration_time(3_800, requested), expected);
        }
    }

    #[test]
    fn search_result_never_exceeds_readout_period() {
        for t_icg_us in [1, 2, 97, 360, 3_800, 7_919] {
            for requested in 1..=t_icg_us {
                let found = find_integration_time(t_icg_us, requested).unwrap();
                assert!(found <= t_icg_us);
                assert_eq!(t_icg_us % found, 0);
            }
        }
    }

    #[test]
    fn search_rejects_impossible_requests() {
        assert_err!(find_integration_time(3_800, 0));
        assert_err!(find_integration_time(3_800, 3_801));
    }
}
