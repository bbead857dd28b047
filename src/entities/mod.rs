// Entity Models
// "Identity persists, values change"
//
// Every record the store holds is an Entity<T>:
// - Stable identity (UUID) assigned by the store, NEVER changes
// - A value (the domain fields) that callers add and patch
//
// On disk the value's fields sit next to `id` in one flat JSON object.

pub mod bank_card;
pub mod credit_card;
pub mod credit_score;
pub mod debt;
pub mod derogatory_mark;
pub mod payment_reminder;

pub use bank_card::{BankAccountType, BankCard, TransactionLimits};
pub use credit_card::{CardNetwork, CreditCard, Rewards, RewardsType};
pub use credit_score::{CreditScore, CreditScoreProvider, CreditTier};
pub use debt::{Debt, DebtStatus, DebtType, PaymentFrequency};
pub use derogatory_mark::{DerogatoryMark, DerogatoryMarkType, MarkStatus};
pub use payment_reminder::{PaymentReminder, ReminderStatus, ReminderType};

use crate::document::AppData;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

// ============================================================================
// ENTITY (identity + value)
// ============================================================================

/// A stored record: identity plus value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity<T> {
    /// Stable identity (UUID v4) - NEVER changes, not even through a patch
    pub id: String,

    #[serde(flatten)]
    pub value: T,
}

impl<T> Entity<T> {
    /// Wrap a value with a fresh identity
    pub fn new(value: T) -> Self {
        Entity {
            id: uuid::Uuid::new_v4().to_string(),
            value,
        }
    }

    pub fn identity(&self) -> &str {
        &self.id
    }
}

impl<T> Deref for Entity<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

// ============================================================================
// ENTITY KIND
// ============================================================================

/// One of the five record kinds the store manages.
///
/// Ties a value type to its collection inside the document so the store can
/// implement list/add/update/delete once for every kind.
pub trait EntityKind: Serialize + DeserializeOwned + Clone + fmt::Debug {
    /// Human readable kind name, used in logs and errors
    const KIND: &'static str;

    fn collection(data: &AppData) -> &Vec<Entity<Self>>;

    fn collection_mut(data: &mut AppData) -> &mut Vec<Entity<Self>>;
}

// ============================================================================
// SHARED CARD ATTRIBUTES
// ============================================================================

/// Display color of a credit or bank card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CardColor {
    Blue,
    Black,
    Gold,
    Platinum,
    Red,
    Green,
    Purple,
    Gradient,
}

/// Lifecycle status shared by credit cards and bank accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CardStatus {
    Active,
    Closed,
    Frozen,
}

impl CardStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardStatus::Active => "Active",
            CardStatus::Closed => "Closed",
            CardStatus::Frozen => "Frozen",
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_score() -> CreditScore {
        CreditScore {
            provider: CreditScoreProvider::Equifax,
            score: 712,
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            notes: None,
        }
    }

    #[test]
    fn test_entity_new_assigns_identity() {
        let a = Entity::new(sample_score());
        let b = Entity::new(sample_score());

        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
        assert_eq!(a.identity(), a.id);
    }

    #[test]
    fn test_entity_serializes_flat() {
        let entity = Entity {
            id: "abc".to_string(),
            value: sample_score(),
        };

        let json = serde_json::to_value(&entity).unwrap();
        assert_eq!(json["id"], "abc");
        assert_eq!(json["provider"], "equifax");
        assert_eq!(json["score"], 712);
        assert_eq!(json["date"], "2024-05-01");
        assert!(json.get("value").is_none());
        assert!(json.get("notes").is_none());
    }

    #[test]
    fn test_entity_deref_reaches_value() {
        let entity = Entity::new(sample_score());
        assert_eq!(entity.score, 712);
        assert_eq!(entity.provider, CreditScoreProvider::Equifax);
    }

    #[test]
    fn test_card_enums_use_kebab_case() {
        assert_eq!(serde_json::to_string(&CardColor::Platinum).unwrap(), "\"platinum\"");
        assert_eq!(serde_json::to_string(&CardStatus::Frozen).unwrap(), "\"frozen\"");
        let color: CardColor = serde_json::from_str("\"gradient\"").unwrap();
        assert_eq!(color, CardColor::Gradient);
    }
}
