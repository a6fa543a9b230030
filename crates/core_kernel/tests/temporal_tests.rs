//! Unit tests for transaction date handling

use chrono::NaiveDate;
use core_kernel::{months_between, parse_transaction_date, CoreError};
use proptest::prelude::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

mod parsing {
    use super::*;

    #[test]
    fn test_iso_date() {
        assert_eq!(parse_transaction_date("2018-07-17").unwrap(), date(2018, 7, 17));
    }

    #[test]
    fn test_dotted_date_with_trailing_dot() {
        assert_eq!(parse_transaction_date("2018.07.17.").unwrap(), date(2018, 7, 17));
    }

    #[test]
    fn test_iso_date_time_keeps_date_part() {
        assert_eq!(
            parse_transaction_date("2018-07-17T13:45:00.000+0200").unwrap(),
            date(2018, 7, 17)
        );
        assert_eq!(parse_transaction_date("2018-07-17 13:45").unwrap(), date(2018, 7, 17));
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert_eq!(parse_transaction_date("  2011.06.17 ").unwrap(), date(2011, 6, 17));
    }

    #[test]
    fn test_invalid_calendar_date_fails() {
        assert_eq!(
            parse_transaction_date("2018.02.30"),
            Err(CoreError::InvalidDate("2018.02.30".to_string()))
        );
    }

    #[test]
    fn test_empty_string_fails() {
        assert!(parse_transaction_date("").is_err());
    }
}

mod month_arithmetic {
    use super::*;

    #[test]
    fn test_same_day_is_zero() {
        assert_eq!(months_between(date(2018, 7, 17), date(2018, 7, 17)), 0);
    }

    #[test]
    fn test_long_period() {
        assert_eq!(months_between(date(2011, 6, 17), date(2018, 7, 17)), 85);
    }

    #[test]
    fn test_year_boundary() {
        assert_eq!(months_between(date(2017, 12, 31), date(2018, 1, 1)), 1);
    }

    #[test]
    fn test_reverse_order_is_negative() {
        assert_eq!(months_between(date(2018, 7, 1), date(2018, 1, 1)), -6);
    }
}

proptest! {
    #[test]
    fn months_between_is_antisymmetric(a in 0i64..20_000, b in 0i64..20_000) {
        let base = date(1990, 1, 1);
        let from = base + chrono::Duration::days(a);
        let to = base + chrono::Duration::days(b);
        prop_assert_eq!(months_between(from, to), -months_between(to, from));
    }

    #[test]
    fn dotted_and_iso_forms_agree(days in 0i64..20_000) {
        let d = date(1990, 1, 1) + chrono::Duration::days(days);
        let dotted = d.format("%Y.%m.%d").to_string();
        let iso = d.format("%Y-%m-%d").to_string();
        prop_assert_eq!(parse_transaction_date(&dotted).unwrap(), d);
        prop_assert_eq!(parse_transaction_date(&iso).unwrap(), d);
    }
}
