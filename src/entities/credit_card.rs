// 💳 Credit Card Entity - a credit line with its fees and rewards
//
// Only the last four digits of the card number are ever stored.

use super::{CardColor, CardStatus, Entity, EntityKind};
use crate::document::AppData;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// CARD NETWORK
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CardNetwork {
    Visa,
    Mastercard,
    Amex,
    Discover,
    Other,
}

impl CardNetwork {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardNetwork::Visa => "Visa",
            CardNetwork::Mastercard => "Mastercard",
            CardNetwork::Amex => "American Express",
            CardNetwork::Discover => "Discover",
            CardNetwork::Other => "Other",
        }
    }
}

// ============================================================================
// REWARDS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RewardsType {
    Cashback,
    Points,
    Miles,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rewards {
    #[serde(rename = "type")]
    pub rewards_type: RewardsType,

    /// Earn rate (percent for cashback, multiplier for points/miles)
    pub rate: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// ============================================================================
// CREDIT CARD
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCard {
    /// Issuing bank
    pub bank: String,

    /// Product name (e.g., "Cobalt", "Aeroplan Visa Infinite")
    pub name: String,

    #[serde(rename = "type")]
    pub network: CardNetwork,

    pub last_four_digits: String,

    pub credit_limit: f64,

    pub annual_fee: f64,

    /// APR in percent
    pub interest_rate: f64,

    /// Day of month the statement closes (1-31)
    #[serde(rename = "statementDate")]
    pub statement_day: u8,

    pub autopay_enabled: bool,

    /// Bank account the autopay draws from
    pub associated_bank: String,

    pub card_color: CardColor,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rewards: Option<Rewards>,

    pub status: CardStatus,

    pub opened_date: NaiveDate,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CreditCard {
    pub fn has_annual_fee(&self) -> bool {
        self.annual_fee > 0.0
    }

    pub fn is_active(&self) -> bool {
        self.status == CardStatus::Active
    }
}

impl EntityKind for CreditCard {
    const KIND: &'static str = "credit card";

    fn collection(data: &AppData) -> &Vec<Entity<Self>> {
        &data.credit_cards
    }

    fn collection_mut(data: &mut AppData) -> &mut Vec<Entity<Self>> {
        &mut data.credit_cards
    }
}
