//! Coercion of follower-count-looking values into integers.
//!
//! Accepts human-formatted strings such as `12.5K`, `1.2M` or `3,400`.
//! Failure is `None`, never zero: zero is a legitimate follower count.

/// Coerce a human-formatted count into an integer.
///
/// Everything except digits, `,`, `.` and the letters `k`/`m` (any case) is
/// discarded first. A trailing `M` scales by one million and `K` by one
/// thousand after thousands separators are removed, rounding to the nearest
/// integer. Without a suffix every non-digit is stripped and the remaining
/// digits are parsed as-is.
pub fn to_number(input: &str) -> Option<u64> {
    let cleaned: String = input
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | 'k' | 'K' | 'm' | 'M'))
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    // A well-formed suffix that overflows fails outright rather than losing its multiplier.
    if let Some(scaled) = scaled(&cleaned) {
        return scaled;
    }

    let digits: String = cleaned.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Coerce a native JSON number; only finite, non-negative values qualify.
pub fn number_from_f64(value: f64) -> Option<u64> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    let rounded = value.round();
    if rounded > u64::MAX as f64 {
        return None;
    }
    Some(rounded as u64)
}

/// Apply a `K`/`M` suffix to a `[\d,.]+` mantissa.
///
/// The outer `None` means `cleaned` is not a suffix form at all; `Some(None)`
/// means it is one but the scaled value does not fit.
fn scaled(cleaned: &str) -> Option<Option<u64>> {
    let (mantissa, multiplier) = match cleaned.chars().last()? {
        'm' | 'M' => (&cleaned[..cleaned.len() - 1], 1_000_000.0),
        'k' | 'K' => (&cleaned[..cleaned.len() - 1], 1_000.0),
        _ => return None,
    };

    if mantissa.is_empty() || !mantissa.chars().all(|c| c.is_ascii_digit() || c == ',' || c == '.') {
        return None;
    }

    let without_separators = mantissa.replace(',', "");
    if !without_separators.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    let value: f64 = without_separators.parse().ok()?;
    Some(number_from_f64(value * multiplier))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffixes() {
        assert_eq!(to_number("12.5K"), Some(12_500));
        assert_eq!(to_number("1.2M"), Some(1_200_000));
        assert_eq!(to_number("4.5m"), Some(4_500_000));
        assert_eq!(to_number("900k"), Some(900_000));
        assert_eq!(to_number("1,234K"), Some(1_234_000));
    }

    #[test]
    fn test_suffix_rounds() {
        assert_eq!(to_number("1.2346K"), Some(1_235));
        assert_eq!(to_number("0.0000004M"), Some(0));
    }

    #[test]
    fn test_separators_without_suffix() {
        assert_eq!(to_number("3,400"), Some(3_400));
        assert_eq!(to_number("1.234.567"), Some(1_234_567));
        assert_eq!(to_number("12"), Some(12));
    }

    #[test]
    fn test_digits_only_property() {
        for s in ["0", "7", "1,000", "1.5", "12,345,678", "9.9.9", "00042", "1,2,3."] {
            let digits: String = s.chars().filter(char::is_ascii_digit).collect();
            assert_eq!(to_number(s), Some(digits.parse::<u64>().unwrap()), "input {s}");
        }
    }

    #[test]
    fn test_noise_is_discarded() {
        assert_eq!(to_number(" 48,213 followers"), Some(48_213));
        assert_eq!(to_number("$1.2M "), Some(1_200_000));
    }

    #[test]
    fn test_unparseable_is_none() {
        assert_eq!(to_number("abc"), None);
        assert_eq!(to_number(""), None);
        assert_eq!(to_number(",."), None);
        assert_eq!(to_number("M"), None);
    }

    #[test]
    fn test_bad_mantissa_falls_back_to_digits() {
        assert_eq!(to_number("1.2.3K"), Some(123));
        assert_eq!(to_number(",M"), None);
    }

    #[test]
    fn test_zero_is_a_value() {
        assert_eq!(to_number("0"), Some(0));
        assert_eq!(number_from_f64(0.0), Some(0));
    }

    #[test]
    fn test_overflow_is_none() {
        assert_eq!(to_number("99999999999999999999999"), None);
        assert_eq!(to_number("20000000000000000M"), None);
        assert_eq!(to_number("20,000,000,000,000,000K"), None);
    }

    #[test]
    fn test_native_numbers() {
        assert_eq!(number_from_f64(48_213.0), Some(48_213));
        assert_eq!(number_from_f64(12.6), Some(13));
        assert_eq!(number_from_f64(-5.0), None);
        assert_eq!(number_from_f64(f64::NAN), None);
        assert_eq!(number_from_f64(f64::INFINITY), None);
    }
}
