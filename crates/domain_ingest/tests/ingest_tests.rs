//! Comprehensive tests for domain_ingest

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;

use domain_ingest::{parse_record, IngestError};
use test_utils::{
    assert_element_count, assert_fund_units, RecordFixtures, TemporalFixtures, CONTRACT_ID,
};

// ============================================================================
// Contract Header Tests
// ============================================================================

mod contract_header_tests {
    use super::*;

    #[test]
    fn test_header_fields_are_read() {
        let contract = parse_record(&RecordFixtures::regular_premium()).unwrap();
        let details = contract.details();

        assert_eq!(contract.id().as_str(), CONTRACT_ID);
        assert_eq!(details.name.as_deref(), Some("Befektetési Program"));
        assert_eq!(details.contract_type, "UL01");
        assert_eq!(details.type_name.as_deref(), Some("Unit-linked life insurance"));
        assert_eq!(details.currency, "HUF");
        assert_eq!(details.actual_value, Some(dec!(1520000.50)));
        assert_eq!(details.surrender_value, Some(dec!(1480000)));
        assert_eq!(details.due_amount, None);
        assert_eq!(details.paid_to_date.as_deref(), Some("2019.01.31"));
    }

    #[test]
    fn test_missing_contract_is_malformed() {
        let mut record = RecordFixtures::regular_premium();
        record.as_object_mut().unwrap().remove("contract");

        assert_eq!(parse_record(&record).unwrap_err(), IngestError::missing("contract"));
    }

    #[test]
    fn test_missing_required_contract_fields_are_malformed() {
        for field in ["contractId", "contractTypeNumber", "currency"] {
            let mut record = RecordFixtures::regular_premium();
            record["contract"].as_object_mut().unwrap().remove(field);

            let err = parse_record(&record).unwrap_err();
            assert_eq!(err, IngestError::missing(&format!("contract.{}", field)));
        }
    }

    #[test]
    fn test_optional_contract_fields_may_be_absent() {
        let mut record = RecordFixtures::regular_premium();
        record["contract"] = json!({ "contractId": "C-9", "contractTypeNumber": "UL02", "currency": "EUR" });

        let contract = parse_record(&record).unwrap();
        assert_eq!(contract.details().name, None);
        assert_eq!(contract.details().actual_value, None);
    }
}

// ============================================================================
// Dispatch Tests
// ============================================================================

mod dispatch_tests {
    use super::*;

    #[test]
    fn test_every_supported_type_parses() {
        for record in RecordFixtures::all_transaction_types() {
            let contract = parse_record(&record).unwrap();
            assert!(!contract.is_empty());
        }
    }

    #[test]
    fn test_unknown_code_is_unsupported() {
        let mut record = RecordFixtures::regular_premium();
        record["transactionCode"] = json!("X999");

        assert_eq!(
            parse_record(&record).unwrap_err(),
            IngestError::UnsupportedTransactionType("X999".to_string())
        );
    }

    proptest! {
        #[test]
        fn unknown_codes_are_unsupported(code in "[A-Z][A-Z0-9]{3}") {
            prop_assume!(!["B522", "T536", "B633", "B675", "BZ89"].contains(&code.as_str()));
            let mut record = RecordFixtures::regular_premium();
            record["transactionCode"] = json!(code.clone());

            prop_assert_eq!(
                parse_record(&record).unwrap_err(),
                IngestError::UnsupportedTransactionType(code)
            );
        }
    }

    #[test]
    fn test_missing_code_is_malformed() {
        let mut record = RecordFixtures::regular_premium();
        record.as_object_mut().unwrap().remove("transactionCode");

        assert!(matches!(
            parse_record(&record),
            Err(IngestError::MalformedRecord(_))
        ));
    }

    #[test]
    fn test_non_object_record_is_malformed() {
        assert!(matches!(
            parse_record(&json!([1, 2, 3])),
            Err(IngestError::MalformedRecord(_))
        ));
    }

    #[test]
    fn test_missing_array_is_malformed() {
        let mut record = RecordFixtures::benefit_billing();
        record.as_object_mut().unwrap().remove("benefitBillingValues");

        assert_eq!(
            parse_record(&record).unwrap_err(),
            IngestError::missing("benefitBillingValues")
        );
    }

    #[test]
    fn test_array_of_wrong_type_is_malformed() {
        let mut record = RecordFixtures::anniversary_deduction();
        record["unitValues"] = json!({ "fundName": "Pénzpiaci" });

        assert!(matches!(
            parse_record(&record),
            Err(IngestError::MalformedRecord(_))
        ));
    }
}

// ============================================================================
// Premium Tests
// ============================================================================

mod premium_tests {
    use super::*;

    #[test]
    fn test_regular_premium_entries() {
        let contract = parse_record(&RecordFixtures::regular_premium()).unwrap();

        assert_eq!(contract.fund_count(), 2);
        assert_fund_units(&contract, "Globális részvény", dec!(12.5));
        assert_fund_units(&contract, "Pénzpiaci", dec!(4));

        let history = contract.fund("Globális részvény").unwrap();
        assert_eq!(history.fund_code(), Some("GRV"));

        let element = &history.elements()[0];
        assert_eq!(element.transaction_name(), "Rendszeres díj");
        assert_eq!(element.transaction_code(), Some("B522"));
        assert_eq!(element.transaction_date(), TemporalFixtures::date(2018, 1, 15));
        assert_eq!(element.number_of_initial_units(), Some(dec!(10.5)));
        assert_eq!(element.number_of_accumulation_units(), Some(dec!(2)));
        assert_eq!(element.rate(), dec!(1.25));
        assert_eq!(element.price_date(), "2018.01.16");
        assert_eq!(element.sum_amount(), dec!(15.625));
    }

    #[test]
    fn test_null_units_are_absent() {
        let contract = parse_record(&RecordFixtures::regular_premium()).unwrap();
        let element = &contract.fund("Pénzpiaci").unwrap().elements()[0];

        assert_eq!(element.number_of_initial_units(), None);
        assert_eq!(element.sum_of_units(), dec!(4));
    }

    #[test]
    fn test_advance_premium_uses_premium_layout() {
        let contract = parse_record(&RecordFixtures::advance_premium()).unwrap();
        let element = &contract.fund("Pénzpiaci").unwrap().elements()[0];

        assert_eq!(element.transaction_code(), Some("T536"));
        assert_eq!(element.transaction_date(), TemporalFixtures::date(2018, 3, 1));
        assert_eq!(element.sum_amount(), dec!(20));
    }

    #[test]
    fn test_missing_rate_is_malformed() {
        let mut record = RecordFixtures::regular_premium();
        record["premiumValues"][1].as_object_mut().unwrap().remove("sellRate");

        assert_eq!(
            parse_record(&record).unwrap_err(),
            IngestError::missing("premiumValues[1].sellRate")
        );
    }

    #[test]
    fn test_unparsable_units_are_malformed() {
        let mut record = RecordFixtures::regular_premium();
        record["premiumValues"][0]["investedInitUnitNumber"] = json!("ten");

        let err = parse_record(&record).unwrap_err();
        assert!(err.to_string().contains("premiumValues[0].investedInitUnitNumber"));
    }

    #[test]
    fn test_amount_beyond_decimal_range_is_malformed() {
        let mut record = RecordFixtures::regular_premium();
        record["premiumValues"][0]["investedInitUnitNumber"] = json!("79228162514264337593543950335");
        record["premiumValues"][0]["investedAcumUnitNumber"] = json!(null);
        record["premiumValues"][0]["sellRate"] = json!("2");

        assert_eq!(
            parse_record(&record).unwrap_err(),
            IngestError::out_of_range("premiumValues[0]")
        );
    }

    #[test]
    fn test_record_totals_beyond_decimal_range_are_malformed() {
        let half_of_range = "40000000000000000000000000000";
        let mut record = RecordFixtures::regular_premium();
        record["premiumValues"][0]["investedInitUnitNumber"] = json!(half_of_range);
        record["premiumValues"][0]["investedAcumUnitNumber"] = json!(null);
        record["premiumValues"][0]["sellRate"] = json!("1");
        record["premiumValues"][1]["investedAcumUnitNumber"] = json!(half_of_range);
        record["premiumValues"][1]["sellRate"] = json!("1");

        assert_eq!(
            parse_record(&record).unwrap_err(),
            IngestError::out_of_range("premiumValues[1]")
        );
    }

    #[test]
    fn test_unparsable_date_is_malformed() {
        let mut record = RecordFixtures::regular_premium();
        record["transactionDate"] = json!("15/01/2018");

        assert!(matches!(
            parse_record(&record),
            Err(IngestError::MalformedRecord(_))
        ));
    }

    #[test]
    fn test_iso_date_time_is_accepted() {
        let mut record = RecordFixtures::regular_premium();
        record["transactionDate"] = json!("2018-01-15T10:30:00");

        let contract = parse_record(&record).unwrap();
        let date: NaiveDate = contract.fund("Pénzpiaci").unwrap().elements()[0].transaction_date();
        assert_eq!(date, TemporalFixtures::date(2018, 1, 15));
    }
}

// ============================================================================
// Cost Deduction Tests
// ============================================================================

mod deduction_tests {
    use super::*;

    #[test]
    fn test_benefit_billing_entries() {
        let contract = parse_record(&RecordFixtures::benefit_billing()).unwrap();
        let history = contract.fund("Globális részvény").unwrap();
        let element = &history.elements()[0];

        assert_eq!(history.fund_code(), None);
        assert_eq!(element.sum_of_units(), dec!(-0.75));
        assert_eq!(element.rate(), dec!(1.3));
        assert_eq!(element.price_date(), "2018.03.29");
    }

    #[test]
    fn test_anniversary_deduction_has_initial_units_only() {
        let contract = parse_record(&RecordFixtures::anniversary_deduction()).unwrap();
        let element = &contract.fund("Pénzpiaci").unwrap().elements()[0];

        assert_eq!(element.number_of_initial_units(), Some(dec!(-1)));
        assert_eq!(element.number_of_accumulation_units(), None);
        assert_eq!(element.rate(), dec!(2.6));
        assert_eq!(element.sum_amount(), dec!(-2.6));
    }
}

// ============================================================================
// Fund Switch Tests
// ============================================================================

mod fund_switch_tests {
    use super::*;

    #[test]
    fn test_sources_and_targets_are_both_booked() {
        let contract = parse_record(&RecordFixtures::fund_switch()).unwrap();

        assert_eq!(contract.fund_count(), 2);
        assert_fund_units(&contract, "Globális részvény", dec!(-3));
        assert_fund_units(&contract, "Ingatlan", dec!(3.5));
    }

    #[test]
    fn test_price_date_comes_from_root() {
        let mut record = RecordFixtures::fund_switch();
        record["fundSwitchTargets"][0]["priceDate"] = json!("1999.01.01");

        let contract = parse_record(&record).unwrap();
        for history in contract.fund_histories() {
            assert_eq!(history.elements()[0].price_date(), "2018.06.04");
        }
    }

    #[test]
    fn test_same_fund_on_both_sides() {
        let mut record = RecordFixtures::fund_switch();
        record["fundSwitchTargets"][0]["fundName"] = json!("Globális részvény");

        let contract = parse_record(&record).unwrap();
        assert_element_count(&contract, "Globális részvény", 2);
        assert_fund_units(&contract, "Globális részvény", dec!(0.5));

        let codes: Vec<Option<&str>> = contract
            .fund("Globális részvény")
            .unwrap()
            .elements()
            .iter()
            .map(|element| element.transaction_code())
            .collect();
        assert_eq!(codes, vec![Some("BZ89"), Some("BZ89")]);
    }

    #[test]
    fn test_missing_targets_is_malformed() {
        let mut record = RecordFixtures::fund_switch();
        record.as_object_mut().unwrap().remove("fundSwitchTargets");

        assert_eq!(
            parse_record(&record).unwrap_err(),
            IngestError::missing("fundSwitchTargets")
        );
    }

    #[test]
    fn test_switch_has_no_deposit_or_reduction_effect() {
        let contract = parse_record(&RecordFixtures::fund_switch()).unwrap();
        for history in contract.fund_histories() {
            for element in history.elements() {
                assert_eq!(element.category(), None);
            }
        }
        assert_ne!(
            contract.fund("Ingatlan").unwrap().total_amount(),
            Decimal::ZERO
        );
    }
}
