//! Transaction codes of the policy administration system


/// Regular premium payment
pub const REGULAR_PREMIUM: &str = "B522";
/// Premium paid in advance
pub const ADVANCE_PREMIUM: &str = "T536";
/// Benefit billing (cost deduction)
pub const BENEFIT_BILLING: &str = "B633";
/// Anniversary cost deduction
pub const ANNIVERSARY_DEDUCTION: &str = "B675";
/// Unit switch between funds
pub const FUND_SWITCH: &str = "BZ89";

/// How a transaction counts in the deposit/reduction columns of the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionCategory {
    /// Money paid into the contract
    Deposit,
    /// Costs taken out of the contract
    Reduction,
}

impl TransactionCategory {
    /// Classifies a transaction code; codes outside both groups yield `None`
    pub fn of(code: &str) -> Option<Self> {
        match code {
            REGULAR_PREMIUM | ADVANCE_PREMIUM => Some(TransactionCategory::Deposit),
            BENEFIT_BILLING | ANNIVERSARY_DEDUCTION => Some(TransactionCategory::Reduction),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert_eq!(TransactionCategory::of("B522"), Some(TransactionCategory::Deposit));
        assert_eq!(TransactionCategory::of("T536"), Some(TransactionCategory::Deposit));
        assert_eq!(TransactionCategory::of("B633"), Some(TransactionCategory::Reduction));
        assert_eq!(TransactionCategory::of("B675"), Some(TransactionCategory::Reduction));
        assert_eq!(TransactionCategory::of("BZ89"), None);
        assert_eq!(TransactionCategory::of("b522"), None);
    }
}
