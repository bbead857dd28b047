// 🏦 Bank Card Entity - a deposit account (chequing, savings, registered)

use super::{CardColor, CardStatus, Entity, EntityKind};
use crate::document::AppData;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BankAccountType {
    Chequing,
    Savings,
    /// Tax-Free Savings Account
    Tfsa,
    /// Registered Retirement Savings Plan
    Rrsp,
    Other,
}

impl BankAccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BankAccountType::Chequing => "Chequing",
            BankAccountType::Savings => "Savings",
            BankAccountType::Tfsa => "TFSA",
            BankAccountType::Rrsp => "RRSP",
            BankAccountType::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionLimits {
    pub monthly: f64,
    pub per_transaction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankCard {
    pub bank: String,

    pub account_name: String,

    pub account_type: BankAccountType,

    /// Last 4 digits only
    pub account_number: String,

    pub monthly_fee: f64,

    /// Balance to hold for the monthly fee to be waived
    pub minimum_balance_for_no_fee: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<f64>,

    pub card_color: CardColor,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_limits: Option<TransactionLimits>,

    pub status: CardStatus,

    pub opened_date: NaiveDate,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl EntityKind for BankCard {
    const KIND: &'static str = "bank card";

    fn collection(data: &AppData) -> &Vec<Entity<Self>> {
        &data.bank_cards
    }

    fn collection_mut(data: &mut AppData) -> &mut Vec<Entity<Self>> {
        &mut data.bank_cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bank_card_optional_fields() {
        let card: BankCard = serde_json::from_value(json!({
            "bank": "EQ Bank",
            "accountName": "Personal Account",
            "accountType": "savings",
            "accountNumber": "8812",
            "monthlyFee": 0,
            "minimumBalanceForNoFee": 0,
            "interestRate": 2.5,
            "cardColor": "purple",
            "transactionLimits": { "monthly": 30000, "perTransaction": 10000 },
            "status": "active",
            "openedDate": "2021-02-10"
        }))
        .unwrap();

        assert_eq!(card.account_type, BankAccountType::Savings);
        assert_eq!(card.interest_rate, Some(2.5));
        assert_eq!(card.transaction_limits.as_ref().unwrap().per_transaction, 10000.0);
        assert!(card.notes.is_none());
    }

    #[test]
    fn test_registered_account_names() {
        assert_eq!(serde_json::to_string(&BankAccountType::Tfsa).unwrap(), "\"tfsa\"");
        assert_eq!(BankAccountType::Rrsp.as_str(), "RRSP");
    }
}
