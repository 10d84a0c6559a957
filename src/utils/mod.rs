/// Returns the smallest `b` such that `2^b >= n`.
pub(crate) fn ceil_log2(n: u64) -> u32 {
    if n <= 1 {
        0
    } else {
        u64::BITS - (n - 1).leading_zeros()
    }
}

/// Returns `n!`. Only meant for the small arguments used by the codecs.
pub(crate) fn factorial(n: usize) -> u64 {
    (1..=n as u64).product()
}

/// Rounds a non-negative float to the nearest integer the way the codecs do,
/// by adding one half and truncating. Negative values and NaN map to zero.
#[inline]
pub(crate) fn round_half_up(value: f64) -> u64 {
    (value + 0.5) as u64
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceil_log2() {
        assert_eq!(ceil_log2(0), 0);
        assert_eq!(ceil_log2(1), 0);
        assert_eq!(ceil_log2(2), 1);
        assert_eq!(ceil_log2(3), 2);
        assert_eq!(ceil_log2(16), 4);
        assert_eq!(ceil_log2(17), 5);
        assert_eq!(ceil_log2(7000), 13);
    }

    #[test]
    fn test_factorial() {
        assert_eq!(factorial(0), 1);
        assert_eq!(factorial(5), 120);
        assert_eq!(factorial(12), 479001600);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.49), 2);
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-3.0), 0);
        assert_eq!(round_half_up(f64::NAN), 0);
    }
}
