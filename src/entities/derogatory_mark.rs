// ⚠️ Derogatory Mark Entity - negative items on a credit report

use super::{Entity, EntityKind};
use crate::document::AppData;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DerogatoryMarkType {
    LatePayment,
    Collection,
    Bankruptcy,
    Foreclosure,
    Repossession,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkStatus {
    Active,
    Resolved,
    Disputed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerogatoryMark {
    #[serde(rename = "type")]
    pub mark_type: DerogatoryMarkType,

    pub creditor: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,

    pub date: NaiveDate,

    pub description: String,

    pub status: MarkStatus,

    /// Estimated points lost
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact_on_score: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl EntityKind for DerogatoryMark {
    const KIND: &'static str = "derogatory mark";

    fn collection(data: &AppData) -> &Vec<Entity<Self>> {
        &data.derogatory_marks
    }

    fn collection_mut(data: &mut AppData) -> &mut Vec<Entity<Self>> {
        &mut data.derogatory_marks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mark_minimal_json() {
        let mark: DerogatoryMark = serde_json::from_value(json!({
            "type": "late-payment",
            "creditor": "Rogers",
            "date": "2023-11-20",
            "description": "30 days late on phone bill",
            "status": "disputed"
        }))
        .unwrap();

        assert_eq!(mark.mark_type, DerogatoryMarkType::LatePayment);
        assert_eq!(mark.status, MarkStatus::Disputed);
        assert!(mark.amount.is_none());
        assert!(mark.impact_on_score.is_none());
    }
}
