// 📈 Credit Score Entity - one reading from one bureau on one day
//
// Scores live on the 300-850 scale. The store does not reject values outside
// it; tier classification clamps naturally (anything under 580 is Poor).

use super::{Entity, EntityKind};
use crate::document::AppData;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// PROVIDER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CreditScoreProvider {
    CreditKarma,
    Borrowell,
    Equifax,
    Transunion,
    Other,
}

impl CreditScoreProvider {
    pub fn display_name(&self) -> &'static str {
        match self {
            CreditScoreProvider::CreditKarma => "Credit Karma",
            CreditScoreProvider::Borrowell => "Borrowell",
            CreditScoreProvider::Equifax => "Equifax",
            CreditScoreProvider::Transunion => "TransUnion",
            CreditScoreProvider::Other => "Other",
        }
    }
}

// ============================================================================
// CREDIT SCORE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditScore {
    pub provider: CreditScoreProvider,

    /// 300-850
    pub score: u16,

    /// Day the score was pulled
    pub date: NaiveDate,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CreditScore {
    pub fn tier(&self) -> CreditTier {
        CreditTier::from_score(self.score)
    }
}

impl EntityKind for CreditScore {
    const KIND: &'static str = "credit score";

    fn collection(data: &AppData) -> &Vec<Entity<Self>> {
        &data.credit_scores
    }

    fn collection_mut(data: &mut AppData) -> &mut Vec<Entity<Self>> {
        &mut data.credit_scores
    }
}

// ============================================================================
// CREDIT TIER
// ============================================================================

/// Score band used on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CreditTier {
    /// 800-850
    Excellent,
    /// 740-799
    VeryGood,
    /// 670-739
    Good,
    /// 580-669
    Fair,
    /// 300-579
    Poor,
}

impl CreditTier {
    pub fn from_score(score: u16) -> Self {
        match score {
            800.. => CreditTier::Excellent,
            740..=799 => CreditTier::VeryGood,
            670..=739 => CreditTier::Good,
            580..=669 => CreditTier::Fair,
            _ => CreditTier::Poor,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CreditTier::Excellent => "Excellent",
            CreditTier::VeryGood => "Very Good",
            CreditTier::Good => "Good",
            CreditTier::Fair => "Fair",
            CreditTier::Poor => "Poor",
        }
    }

    /// Inclusive score range of the tier
    pub fn range(&self) -> (u16, u16) {
        match self {
            CreditTier::Excellent => (800, 850),
            CreditTier::VeryGood => (740, 799),
            CreditTier::Good => (670, 739),
            CreditTier::Fair => (580, 669),
            CreditTier::Poor => (300, 579),
        }
    }

    /// Points needed to reach the next tier (0 once Excellent)
    pub fn points_to_next_tier(score: u16) -> u16 {
        match CreditTier::from_score(score) {
            CreditTier::Excellent => 0,
            CreditTier::VeryGood => 800 - score,
            CreditTier::Good => 740 - score,
            CreditTier::Fair => 670 - score,
            CreditTier::Poor => 580 - score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_wire_names() {
        let json = serde_json::to_string(&CreditScoreProvider::CreditKarma).unwrap();
        assert_eq!(json, "\"credit-karma\"");

        let provider: CreditScoreProvider = serde_json::from_str("\"transunion\"").unwrap();
        assert_eq!(provider, CreditScoreProvider::Transunion);
        assert_eq!(provider.display_name(), "TransUnion");
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let result = serde_json::from_str::<CreditScoreProvider>("\"experian\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(CreditTier::from_score(850), CreditTier::Excellent);
        assert_eq!(CreditTier::from_score(800), CreditTier::Excellent);
        assert_eq!(CreditTier::from_score(799), CreditTier::VeryGood);
        assert_eq!(CreditTier::from_score(740), CreditTier::VeryGood);
        assert_eq!(CreditTier::from_score(739), CreditTier::Good);
        assert_eq!(CreditTier::from_score(670), CreditTier::Good);
        assert_eq!(CreditTier::from_score(669), CreditTier::Fair);
        assert_eq!(CreditTier::from_score(580), CreditTier::Fair);
        assert_eq!(CreditTier::from_score(579), CreditTier::Poor);
        assert_eq!(CreditTier::from_score(300), CreditTier::Poor);
    }

    #[test]
    fn test_points_to_next_tier() {
        assert_eq!(CreditTier::points_to_next_tier(820), 0);
        assert_eq!(CreditTier::points_to_next_tier(790), 10);
        assert_eq!(CreditTier::points_to_next_tier(700), 40);
        assert_eq!(CreditTier::points_to_next_tier(600), 70);
        assert_eq!(CreditTier::points_to_next_tier(500), 80);
    }

    #[test]
    fn test_score_tier_and_range() {
        let score = CreditScore {
            provider: CreditScoreProvider::Borrowell,
            score: 745,
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            notes: Some("after paying off card".to_string()),
        };

        assert_eq!(score.tier(), CreditTier::VeryGood);
        assert_eq!(score.tier().as_str(), "Very Good");
        assert_eq!(score.tier().range(), (740, 799));
    }
}
