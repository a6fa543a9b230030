//! Pre-built Test Fixtures
//!
//! Provides ready-to-use transaction records, rate files and dates for the
//! fund history test suite. Records mirror the JSON documents exported by the
//! policy administration system, one document per transaction.

use chrono::NaiveDate;
use serde_json::{json, Value};

/// Contract id shared by all record fixtures
pub const CONTRACT_ID: &str = "UL-0001234";

/// Fixture for raw transaction records
pub struct RecordFixtures;

impl RecordFixtures {
    /// Contract header as embedded in every record
    fn contract_header(contract_id: &str) -> Value {
        json!({
            "contractId": contract_id,
            "fantasyName": "Befektetési Program",
            "contractTypeNumber": "UL01",
            "contractTypeName": "Unit-linked life insurance",
            "currency": "HUF",
            "actualValue": "1520000.50",
            "surrenderValue": 1480000,
            "dueAmount": null,
            "paidToDate": "2019.01.31"
        })
    }

    /// Regular premium (B522) split between two funds
    pub fn regular_premium() -> Value {
        json!({
            "contract": Self::contract_header(CONTRACT_ID),
            "transactionName": "Rendszeres díj",
            "transactionCode": "B522",
            "transactionDate": "2018.01.15.",
            "premiumValues": [
                {
                    "fundName": "Globális részvény",
                    "unitVirtualFund": "GRV",
                    "investedInitUnitNumber": "10.5",
                    "investedAcumUnitNumber": 2,
                    "sellRate": 1.25,
                    "priceDate": "2018.01.16"
                },
                {
                    "fundName": "Pénzpiaci",
                    "unitVirtualFund": "PP",
                    "investedInitUnitNumber": null,
                    "investedAcumUnitNumber": "4",
                    "sellRate": "2.5",
                    "priceDate": "2018.01.16"
                }
            ]
        })
    }

    /// Premium paid in advance (T536), same layout as the regular premium
    pub fn advance_premium() -> Value {
        json!({
            "contract": Self::contract_header(CONTRACT_ID),
            "transactionName": "Előrefizetés",
            "transactionCode": "T536",
            "transactionDate": "2018-03-01",
            "premiumValues": [
                {
                    "fundName": "Pénzpiaci",
                    "unitVirtualFund": "PP",
                    "investedInitUnitNumber": 0,
                    "investedAcumUnitNumber": 8,
                    "sellRate": 2.5,
                    "priceDate": "2018.03.02"
                }
            ]
        })
    }

    /// Benefit billing cost deduction (B633)
    pub fn benefit_billing() -> Value {
        json!({
            "contract": Self::contract_header(CONTRACT_ID),
            "transactionName": "Költségelvonás",
            "transactionCode": "B633",
            "transactionDate": "2018.04.01",
            "benefitBillingValues": [
                {
                    "fundName": "Globális részvény",
                    "unitVirtualFund": "",
                    "numberOfInitialUnits": "-0.5",
                    "numberOfAccumulationUnits": "-0.25",
                    "exchangeRate": 1.3,
                    "priceDateUsed": "2018.03.29"
                }
            ]
        })
    }

    /// Anniversary cost deduction (B675), initial units only
    pub fn anniversary_deduction() -> Value {
        json!({
            "contract": Self::contract_header(CONTRACT_ID),
            "transactionName": "Évfordulós költség",
            "transactionCode": "B675",
            "transactionDate": "2019.01.15",
            "unitValues": [
                {
                    "fundName": "Pénzpiaci",
                    "unitVirtualFund": "PP",
                    "numberOfDunits": -1,
                    "buyRate": 2.6,
                    "priceDate": "2019.01.14"
                }
            ]
        })
    }

    /// Fund switch (BZ89) moving units from one fund into another
    pub fn fund_switch() -> Value {
        json!({
            "contract": Self::contract_header(CONTRACT_ID),
            "transactionName": "Alapváltás",
            "transactionCode": "BZ89",
            "transactionDate": "2018.06.01",
            "priceDate": "2018.06.04",
            "fundSwitchSources": [
                {
                    "fundName": "Globális részvény",
                    "unitVirtualFund": "GRV",
                    "nofDunitsInit": "-2",
                    "nofDunitsAcum": "-1",
                    "priceUsed": 1.4
                }
            ],
            "fundSwitchTargets": [
                {
                    "fundName": "Ingatlan",
                    "unitVirtualFund": "ING",
                    "nofDunitsInit": "3.5",
                    "nofDunitsAcum": null,
                    "priceUsed": 1.2
                }
            ]
        })
    }

    /// Every supported record type, one each
    pub fn all_transaction_types() -> Vec<Value> {
        vec![
            Self::regular_premium(),
            Self::advance_premium(),
            Self::benefit_billing(),
            Self::anniversary_deduction(),
            Self::fund_switch(),
        ]
    }

    /// Copy of `record` belonging to another contract
    pub fn with_contract_id(mut record: Value, contract_id: &str) -> Value {
        record["contract"]["contractId"] = json!(contract_id);
        record
    }
}

/// Fixture for a complete fund life cycle on fund "Alfa"
pub struct ScenarioFixtures;

impl ScenarioFixtures {
    /// 10 units bought at 100 ...
    pub fn alfa_premium() -> Value {
        json!({
            "contract": RecordFixtures::contract_header(CONTRACT_ID),
            "transactionName": "Rendszeres díj",
            "transactionCode": "B522",
            "transactionDate": "2018.01.10",
            "premiumValues": [
                {
                    "fundName": "Alfa",
                    "unitVirtualFund": "ALF",
                    "investedInitUnitNumber": 10,
                    "sellRate": 100,
                    "priceDate": "2018.01.10"
                }
            ]
        })
    }

    /// ... and all of them taken out at 120 a year later
    pub fn alfa_redemption() -> Value {
        json!({
            "contract": RecordFixtures::contract_header(CONTRACT_ID),
            "transactionName": "Évfordulós költség",
            "transactionCode": "B675",
            "transactionDate": "2019.01.10",
            "unitValues": [
                {
                    "fundName": "Alfa",
                    "unitVirtualFund": "ALF",
                    "numberOfDunits": -10,
                    "buyRate": 120,
                    "priceDate": "2019.01.10"
                }
            ]
        })
    }
}

/// Fixture for rate file contents
pub struct RateFileFixtures;

impl RateFileFixtures {
    /// Rates in the XML properties format
    pub fn xml_properties() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<!DOCTYPE properties SYSTEM "http://java.sun.com/dtd/properties.dtd">
<properties>
<comment>Published unit rates</comment>
<entry key="RATES_DATE">2019.01.31</entry>
<entry key="Globális Részvény Alap">1.4567</entry>
<entry key="Pénzpiaci Alap">2.61</entry>
<entry key="Ingatlan &amp; Infrastruktúra Alap">1.1</entry>
</properties>
"#
    }

    /// Rates as plain `key=value` lines
    pub fn key_value() -> &'static str {
        "# Published unit rates\n\
         RATES_DATE=2019.01.31\n\
         Globális Részvény Alap=1.4567\n\
         ! legacy comment\n\
         Pénzpiaci Alap = 2.61\n\
         \n\
         Ingatlan Alap=n/a\n"
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Builds a date, panicking on an invalid one
    pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    /// First transaction date used by the builders
    pub fn first_premium() -> NaiveDate {
        Self::date(2018, 1, 15)
    }
}
