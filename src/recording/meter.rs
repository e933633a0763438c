//! Peak power metering.

/// Level reported for silence, matching the floor of hardware level meters.
pub const SILENCE_FLOOR_DB: f32 = -160.0;

/// Peak power of one metering window in dBFS.
///
/// Samples are on a full scale of 1.0. Empty and silent windows read as
/// [`SILENCE_FLOOR_DB`].
pub fn peak_power_db(frame: &[f32]) -> f32 {
    let peak = frame
        .iter()
        .map(|sample| sample.abs())
        .filter(|magnitude| !magnitude.is_nan())
        .fold(0.0_f32, f32::max);

    if peak > 0.0 {
        (20.0 * peak.log10()).max(SILENCE_FLOOR_DB)
    } else {
        SILENCE_FLOOR_DB
    }
}

/// Converts signed integer PCM of `bits_per_sample` bits to the 1.0 full
/// scale used by [`peak_power_db`].
pub fn normalize_pcm(sample: i32, bits_per_sample: u16) -> f32 {
    let full_scale = 2_f32.powi(i32::from(bits_per_sample.max(1)) - 1);
    sample as f32 / full_scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_silence_reads_floor() {
        assert_eq!(peak_power_db(&[]), SILENCE_FLOOR_DB);
        assert_eq!(peak_power_db(&[0.0, 0.0, 0.0]), SILENCE_FLOOR_DB);
        assert_eq!(peak_power_db(&[1e-12]), SILENCE_FLOOR_DB);
    }

    #[test]
    fn test_full_scale_reads_zero() {
        assert_relative_eq!(peak_power_db(&[0.1, -1.0, 0.5]), 0.0);
    }

    #[test]
    fn test_half_scale() {
        assert_relative_eq!(peak_power_db(&[0.5, -0.25]), -6.0206, epsilon = 1e-3);
    }

    #[test]
    fn test_normalize_pcm_by_bit_depth() {
        assert_eq!(normalize_pcm(0, 16), 0.0);
        assert_eq!(normalize_pcm(i32::from(i16::MIN), 16), -1.0);
        assert_relative_eq!(normalize_pcm(16384, 16), 0.5);
        assert_relative_eq!(normalize_pcm(1 << 22, 24), 0.5);
        assert_relative_eq!(normalize_pcm(-64, 8), -0.5);
    }
}
