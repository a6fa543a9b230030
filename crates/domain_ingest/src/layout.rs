//! Record layouts per transaction type
//!
//! Every transaction type is exported with the same root fields but keeps
//! its per-fund entries in its own array, under its own field names. The
//! table below is the single place those names live.
//!
//! | code(s)    | array                   | initial units          | accumulation units     | rate         | price date    |
//! |------------|-------------------------|------------------------|------------------------|--------------|---------------|
//! | B522, T536 | `premiumValues`         | `investedInitUnitNumber` | `investedAcumUnitNumber` | `sellRate` | `priceDate`   |
//! | B633       | `benefitBillingValues`  | `numberOfInitialUnits` | `numberOfAccumulationUnits` | `exchangeRate` | `priceDateUsed` |
//! | B675       | `unitValues`            | `numberOfDunits`       | -                      | `buyRate`    | `priceDate`   |
//! | BZ89       | `fundSwitchSources`, `fundSwitchTargets` | `nofDunitsInit` | `nofDunitsAcum` | `priceUsed` | `priceDate` (root) |

use domain_fund::transaction_code::{
    ADVANCE_PREMIUM, ANNIVERSARY_DEDUCTION, BENEFIT_BILLING, FUND_SWITCH, REGULAR_PREMIUM,
};

/// Array of units leaving funds in a switch
pub const FUND_SWITCH_SOURCES: &str = "fundSwitchSources";
/// Array of units entering funds in a switch
pub const FUND_SWITCH_TARGETS: &str = "fundSwitchTargets";

/// Names of the per-entry fields of one layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping {
    pub initial_units: &'static str,
    pub accumulation_units: Option<&'static str>,
    pub rate: &'static str,
    pub price_date: &'static str,
}

/// Where the entries of a record live and how their fields are named
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordLayout {
    /// One array of entries; price dates are read per entry
    Single {
        array: &'static str,
        fields: FieldMapping,
    },
    /// Switch records: sources then targets; the price date is shared on the root
    FundSwitch { fields: FieldMapping },
}

const PREMIUM: RecordLayout = RecordLayout::Single {
    array: "premiumValues",
    fields: FieldMapping {
        initial_units: "investedInitUnitNumber",
        accumulation_units: Some("investedAcumUnitNumber"),
        rate: "sellRate",
        price_date: "priceDate",
    },
};

const BENEFIT_BILLING_LAYOUT: RecordLayout = RecordLayout::Single {
    array: "benefitBillingValues",
    fields: FieldMapping {
        initial_units: "numberOfInitialUnits",
        accumulation_units: Some("numberOfAccumulationUnits"),
        rate: "exchangeRate",
        price_date: "priceDateUsed",
    },
};

const UNIT_DEDUCTION: RecordLayout = RecordLayout::Single {
    array: "unitValues",
    fields: FieldMapping {
        initial_units: "numberOfDunits",
        accumulation_units: None,
        rate: "buyRate",
        price_date: "priceDate",
    },
};

const SWITCH: RecordLayout = RecordLayout::FundSwitch {
    fields: FieldMapping {
        initial_units: "nofDunitsInit",
        accumulation_units: Some("nofDunitsAcum"),
        rate: "priceUsed",
        price_date: "priceDate",
    },
};

impl RecordLayout {
    /// Looks up the layout of a transaction code
    ///
    /// # Returns
    ///
    /// `None` for codes without a known layout
    pub fn for_transaction_code(code: &str) -> Option<Self> {
        match code {
            REGULAR_PREMIUM | ADVANCE_PREMIUM => Some(PREMIUM),
            BENEFIT_BILLING => Some(BENEFIT_BILLING_LAYOUT),
            ANNIVERSARY_DEDUCTION => Some(UNIT_DEDUCTION),
            FUND_SWITCH => Some(SWITCH),
            _ => None,
        }
    }

    /// Arrays holding the entries, in processing order
    pub fn arrays(&self) -> &[&'static str] {
        match self {
            RecordLayout::Single { array, .. } => std::slice::from_ref(array),
            RecordLayout::FundSwitch { .. } => &[FUND_SWITCH_SOURCES, FUND_SWITCH_TARGETS],
        }
    }

    pub fn fields(&self) -> &FieldMapping {
        match self {
            RecordLayout::Single { fields, .. } | RecordLayout::FundSwitch { fields } => fields,
        }
    }

    /// Whether the shared root price date takes precedence over the entry's own
    pub fn price_date_on_root(&self) -> bool {
        matches!(self, RecordLayout::FundSwitch { .. })
    }
}
