// 💸 Debt Entity - a loan, tax balance or carried card balance being paid down

use super::{Entity, EntityKind};
use crate::document::AppData;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// DEBT TYPE / FREQUENCY / STATUS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DebtType {
    /// Balance owed to the Canada Revenue Agency
    CraTax,
    StudentLoan,
    PersonalLoan,
    Mortgage,
    CreditCard,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentFrequency {
    Monthly,
    BiWeekly,
    Weekly,
    Quarterly,
    Annual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DebtStatus {
    Active,
    PaidOff,
    Defaulted,
    InCollection,
}

impl DebtStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DebtStatus::Active => "Active",
            DebtStatus::PaidOff => "Paid Off",
            DebtStatus::Defaulted => "Defaulted",
            DebtStatus::InCollection => "In Collection",
        }
    }
}

// ============================================================================
// DEBT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Debt {
    pub name: String,

    #[serde(rename = "type")]
    pub debt_type: DebtType,

    pub creditor: String,

    pub original_amount: f64,

    pub current_balance: f64,

    /// Annual rate in percent
    pub interest_rate: f64,

    pub minimum_payment: f64,

    pub payment_frequency: PaymentFrequency,

    /// Next payment due
    pub due_date: NaiveDate,

    pub status: DebtStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Debt {
    pub fn is_active(&self) -> bool {
        self.status == DebtStatus::Active
    }

    /// Percent of the original amount already repaid, rounded to a whole percent
    pub fn payoff_progress(&self) -> f64 {
        if self.original_amount == 0.0 {
            return 0.0;
        }
        ((self.original_amount - self.current_balance) / self.original_amount * 100.0).round()
    }
}

impl EntityKind for Debt {
    const KIND: &'static str = "debt";

    fn collection(data: &AppData) -> &Vec<Entity<Self>> {
        &data.debts
    }

    fn collection_mut(data: &mut AppData) -> &mut Vec<Entity<Self>> {
        &mut data.debts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student_loan(original: f64, balance: f64) -> Debt {
        Debt {
            name: "OSAP".to_string(),
            debt_type: DebtType::StudentLoan,
            creditor: "NSLSC".to_string(),
            original_amount: original,
            current_balance: balance,
            interest_rate: 6.7,
            minimum_payment: 250.0,
            payment_frequency: PaymentFrequency::Monthly,
            due_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            status: DebtStatus::Active,
            notes: None,
        }
    }

    #[test]
    fn test_payoff_progress() {
        assert_eq!(student_loan(20000.0, 15000.0).payoff_progress(), 25.0);
        assert_eq!(student_loan(3000.0, 2000.0).payoff_progress(), 33.0);
        assert_eq!(student_loan(1000.0, 0.0).payoff_progress(), 100.0);
    }

    #[test]
    fn test_payoff_progress_zero_original() {
        assert_eq!(student_loan(0.0, 0.0).payoff_progress(), 0.0);
    }

    #[test]
    fn test_debt_wire_names() {
        let mut debt = student_loan(1000.0, 500.0);
        debt.debt_type = DebtType::CraTax;
        debt.payment_frequency = PaymentFrequency::BiWeekly;
        debt.status = DebtStatus::InCollection;

        let json = serde_json::to_value(&debt).unwrap();
        assert_eq!(json["type"], "cra-tax");
        assert_eq!(json["paymentFrequency"], "bi-weekly");
        assert_eq!(json["status"], "in-collection");
        assert_eq!(json["dueDate"], "2024-07-01");
        assert!(!debt.is_active());
    }
}
