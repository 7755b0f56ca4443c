//! Units formatting and conversion utilities
//!
//! Provides human-readable sizes and the KiB/s to MiB/s conversion used
//! for fio bandwidth figures.

/// Bytes in one mebibyte
pub const MIB: u64 = 1024 * 1024;
/// Bytes in one gibibyte
pub const GIB: u64 = 1024 * MIB;

/// Format bytes into human-readable size with appropriate units
///
/// # Examples
/// ```
/// use tyu_disk::util::units::format_bytes;
///
/// assert_eq!(format_bytes(1024), "1.0 KiB");
/// assert_eq!(format_bytes(1048576), "1.0 MiB");
/// assert_eq!(format_bytes(1073741824), "1.0 GiB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KiB", "MiB", "GiB", "TiB", "PiB"];
    const THRESHOLD: f64 = 1024.0;

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= THRESHOLD && unit_index < UNITS.len() - 1 {
        size /= THRESHOLD;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

/// Convert a fio bandwidth figure (KiB/s) to MiB/s
///
/// # Examples
/// ```
/// use tyu_disk::util::units::kib_to_mib;
///
/// assert_eq!(kib_to_mib(102400.0), 100.0);
/// ```
pub fn kib_to_mib(kib_per_sec: f64) -> f64 {
    kib_per_sec / 1024.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1536), "1.5 KiB");
        assert_eq!(format_bytes(512 * MIB), "512.0 MiB");
        assert_eq!(format_bytes(GIB), "1.0 GiB");
        assert_eq!(format_bytes(1099511627776), "1.0 TiB");
    }

    #[test]
    fn test_kib_to_mib() {
        assert_eq!(kib_to_mib(0.0), 0.0);
        assert_eq!(kib_to_mib(51200.0), 50.0);
        assert!((kib_to_mib(1.0) - 0.0009765625).abs() < f64::EPSILON);
    }
}
