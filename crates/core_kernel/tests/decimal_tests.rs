//! Unit tests for the decimal helpers

use core_kernel::{checked_sum, divide_half_up, parse_decimal, round_half_up, RATIO_PRECISION};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

mod rounding {
    use super::*;

    #[test]
    fn test_midpoint_rounds_away_from_zero() {
        assert_eq!(round_half_up(dec!(2.5), 0), dec!(3));
        assert_eq!(round_half_up(dec!(-2.5), 0), dec!(-3));
        assert_eq!(round_half_up(dec!(0.1234565), 6), dec!(0.123457));
    }

    #[test]
    fn test_below_midpoint_rounds_down() {
        assert_eq!(round_half_up(dec!(0.1234564), 6), dec!(0.123456));
    }
}

mod division {
    use super::*;

    #[test]
    fn test_ratio_precision_keeps_six_digits() {
        assert_eq!(divide_half_up(dec!(200), dec!(1000), RATIO_PRECISION), Some(dec!(0.2)));
        assert_eq!(divide_half_up(dec!(0.2), dec!(12), RATIO_PRECISION), Some(dec!(0.016667)));
    }

    #[test]
    fn test_zero_divisor() {
        assert!(divide_half_up(dec!(1), Decimal::ZERO, RATIO_PRECISION).is_none());
    }
}

mod summing {
    use super::*;

    #[test]
    fn test_empty_sum_is_zero() {
        assert_eq!(checked_sum(Vec::new()), Some(Decimal::ZERO));
    }

    #[test]
    fn test_overflow_is_none() {
        assert_eq!(checked_sum([Decimal::MAX, dec!(1)]), None);
        assert_eq!(checked_sum([Decimal::MIN, dec!(-1)]), None);
        assert_eq!(checked_sum([Decimal::MAX, dec!(-1), dec!(1)]), Some(Decimal::MAX));
    }
}

mod parsing {
    use super::*;

    #[test]
    fn test_parse_keeps_scale() {
        let value = parse_decimal("1.2300").unwrap();
        assert_eq!(value.scale(), 4);
        assert_eq!(value, dec!(1.23));
    }

    #[test]
    fn test_parse_whitespace_only_fails() {
        assert!(parse_decimal("   ").is_err());
    }
}

proptest! {
    #[test]
    fn rounded_quotient_has_bounded_scale(
        a in -1_000_000_000i64..1_000_000_000i64,
        b in 1i64..1_000_000i64,
    ) {
        let q = divide_half_up(Decimal::new(a, 2), Decimal::new(b, 2), RATIO_PRECISION).unwrap();
        prop_assert!(q.scale() <= RATIO_PRECISION);
    }

    #[test]
    fn parse_accepts_display_output(m in -1_000_000_000i64..1_000_000_000i64, s in 0u32..8u32) {
        let value = Decimal::new(m, s);
        prop_assert_eq!(parse_decimal(&value.to_string()).unwrap(), value);
    }
}
