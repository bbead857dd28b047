// Derived figures computed from the current collections.
// Nothing here is persisted; every call recomputes from the document.

use crate::document::AppData;
use crate::entities::{CreditScore, Entity};
use serde::{Deserialize, Serialize};

// ============================================================================
// FINANCIAL SUMMARY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    /// Sum of credit limits over all credit cards
    pub total_credit_limit: f64,

    /// Sum of current balances over all debts, whatever their status
    pub total_debt: f64,

    /// Mean of `latest_scores`, 0 when there are none
    pub average_credit_score: f64,

    /// Most recent score per provider, in order of first appearance
    pub latest_scores: Vec<Entity<CreditScore>>,
}

impl FinancialSummary {
    pub fn from_data(data: &AppData) -> Self {
        let total_credit_limit = data.credit_cards.iter().map(|c| c.credit_limit).sum();
        let total_debt = data.debts.iter().map(|d| d.current_balance).sum();
        let latest_scores = latest_scores_by_provider(&data.credit_scores);
        let average_credit_score = average_score(&latest_scores);

        FinancialSummary {
            total_credit_limit,
            total_debt,
            average_credit_score,
            latest_scores,
        }
    }
}

/// Keep, per provider, the score with the latest date.
///
/// Providers appear in the order they are first seen. On equal dates the
/// earlier record wins.
pub fn latest_scores_by_provider(scores: &[Entity<CreditScore>]) -> Vec<Entity<CreditScore>> {
    let mut latest: Vec<Entity<CreditScore>> = Vec::new();

    for score in scores {
        match latest.iter_mut().find(|s| s.provider == score.provider) {
            Some(current) if score.date > current.date => *current = score.clone(),
            Some(_) => {}
            None => latest.push(score.clone()),
        }
    }

    latest
}

fn average_score(scores: &[Entity<CreditScore>]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    let total: f64 = scores.iter().map(|s| f64::from(s.score)).sum();
    total / scores.len() as f64
}

/// All scores oldest first (stable for equal dates), for charting
pub fn score_history(data: &AppData) -> Vec<Entity<CreditScore>> {
    let mut history = data.credit_scores.clone();
    history.sort_by_key(|s| s.date);
    history
}

// ============================================================================
// FEES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeSummary {
    pub total_annual_fees: f64,
    pub cards_with_annual_fee: usize,
    pub credit_card_count: usize,
    pub total_monthly_bank_fees: f64,
}

impl FeeSummary {
    pub fn from_data(data: &AppData) -> Self {
        FeeSummary {
            total_annual_fees: data.credit_cards.iter().map(|c| c.annual_fee).sum(),
            cards_with_annual_fee: data.credit_cards.iter().filter(|c| c.has_annual_fee()).count(),
            credit_card_count: data.credit_cards.len(),
            total_monthly_bank_fees: data.bank_cards.iter().map(|b| b.monthly_fee).sum(),
        }
    }
}

// ============================================================================
// DEBTS
// ============================================================================

/// Figures over active debts only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtSummary {
    pub active_count: usize,
    pub active_balance: f64,
    pub monthly_minimum_payments: f64,
}

impl DebtSummary {
    pub fn from_data(data: &AppData) -> Self {
        let active: Vec<_> = data.debts.iter().filter(|d| d.is_active()).collect();

        DebtSummary {
            active_count: active.len(),
            active_balance: active.iter().map(|d| d.current_balance).sum(),
            monthly_minimum_payments: active.iter().map(|d| d.minimum_payment).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        BankAccountType, BankCard, CardColor, CardNetwork, CardStatus, CreditCard,
        CreditScoreProvider, Debt, DebtStatus, DebtType, PaymentFrequency,
    };
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn score(id: &str, provider: CreditScoreProvider, value: u16, on: NaiveDate) -> Entity<CreditScore> {
        Entity {
            id: id.to_string(),
            value: CreditScore {
                provider,
                score: value,
                date: on,
                notes: None,
            },
        }
    }

    fn card(limit: f64, fee: f64) -> Entity<CreditCard> {
        Entity::new(CreditCard {
            bank: "RBC".to_string(),
            name: "Avion".to_string(),
            network: CardNetwork::Visa,
            last_four_digits: "0001".to_string(),
            credit_limit: limit,
            annual_fee: fee,
            interest_rate: 20.99,
            statement_day: 1,
            autopay_enabled: true,
            associated_bank: "RBC".to_string(),
            card_color: CardColor::Blue,
            rewards: None,
            status: CardStatus::Active,
            opened_date: date(2020, 1, 1),
            closed_date: None,
            notes: None,
        })
    }

    fn debt(balance: f64, minimum: f64, status: DebtStatus) -> Entity<Debt> {
        Entity::new(Debt {
            name: "Loan".to_string(),
            debt_type: DebtType::PersonalLoan,
            creditor: "Lender".to_string(),
            original_amount: 10000.0,
            current_balance: balance,
            interest_rate: 9.5,
            minimum_payment: minimum,
            payment_frequency: PaymentFrequency::Monthly,
            due_date: date(2024, 8, 1),
            status,
            notes: None,
        })
    }

    fn bank_account(fee: f64) -> Entity<BankCard> {
        Entity::new(BankCard {
            bank: "TD".to_string(),
            account_name: "Everyday".to_string(),
            account_type: BankAccountType::Chequing,
            account_number: "7788".to_string(),
            monthly_fee: fee,
            minimum_balance_for_no_fee: 4000.0,
            interest_rate: None,
            card_color: CardColor::Green,
            transaction_limits: None,
            status: CardStatus::Active,
            opened_date: date(2015, 5, 5),
            closed_date: None,
            notes: None,
        })
    }

    #[test]
    fn test_latest_score_per_provider() {
        let mut data = AppData::empty();
        data.credit_scores = vec![
            score("1", CreditScoreProvider::Equifax, 700, date(2024, 1, 1)),
            score("2", CreditScoreProvider::Equifax, 720, date(2024, 6, 1)),
            score("3", CreditScoreProvider::Borrowell, 680, date(2024, 3, 1)),
        ];

        let summary = FinancialSummary::from_data(&data);

        assert_eq!(summary.latest_scores.len(), 2);
        assert_eq!(summary.latest_scores[0].provider, CreditScoreProvider::Equifax);
        assert_eq!(summary.latest_scores[0].score, 720);
        assert_eq!(summary.latest_scores[1].provider, CreditScoreProvider::Borrowell);
        assert_eq!(summary.latest_scores[1].score, 680);
        assert_eq!(summary.average_credit_score, 700.0);
    }

    #[test]
    fn test_older_score_added_later_is_ignored() {
        let scores = vec![
            score("new", CreditScoreProvider::Transunion, 760, date(2024, 5, 1)),
            score("old", CreditScoreProvider::Transunion, 640, date(2023, 5, 1)),
        ];

        let latest = latest_scores_by_provider(&scores);
        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].id, "new");
    }

    #[test]
    fn test_equal_dates_keep_first() {
        let scores = vec![
            score("first", CreditScoreProvider::CreditKarma, 701, date(2024, 2, 2)),
            score("second", CreditScoreProvider::CreditKarma, 705, date(2024, 2, 2)),
        ];

        let latest = latest_scores_by_provider(&scores);
        assert_eq!(latest[0].id, "first");
    }

    #[test]
    fn test_empty_summary() {
        let summary = FinancialSummary::from_data(&AppData::empty());

        assert_eq!(summary.total_credit_limit, 0.0);
        assert_eq!(summary.total_debt, 0.0);
        assert_eq!(summary.average_credit_score, 0.0);
        assert!(summary.latest_scores.is_empty());
    }

    #[test]
    fn test_totals_include_every_debt_status() {
        let mut data = AppData::empty();
        data.credit_cards = vec![card(5000.0, 0.0), card(7500.0, 120.0)];
        data.debts = vec![
            debt(1000.0, 50.0, DebtStatus::Active),
            debt(250.0, 25.0, DebtStatus::InCollection),
            debt(0.0, 0.0, DebtStatus::PaidOff),
        ];

        let summary = FinancialSummary::from_data(&data);
        assert_eq!(summary.total_credit_limit, 12500.0);
        assert_eq!(summary.total_debt, 1250.0);

        let debts = DebtSummary::from_data(&data);
        assert_eq!(debts.active_count, 1);
        assert_eq!(debts.active_balance, 1000.0);
        assert_eq!(debts.monthly_minimum_payments, 50.0);
    }

    #[test]
    fn test_fee_summary() {
        let mut data = AppData::empty();
        data.credit_cards = vec![card(5000.0, 0.0), card(7500.0, 120.0), card(2000.0, 39.0)];
        data.bank_cards = vec![bank_account(16.95), bank_account(4.0)];

        let fees = FeeSummary::from_data(&data);
        assert_eq!(fees.total_annual_fees, 159.0);
        assert_eq!(fees.cards_with_annual_fee, 2);
        assert_eq!(fees.credit_card_count, 3);
        assert!((fees.total_monthly_bank_fees - 20.95).abs() < 1e-9);
    }

    #[test]
    fn test_score_history_sorted() {
        let mut data = AppData::empty();
        data.credit_scores = vec![
            score("b", CreditScoreProvider::Equifax, 720, date(2024, 6, 1)),
            score("a", CreditScoreProvider::Equifax, 700, date(2024, 1, 1)),
            score("c", CreditScoreProvider::Borrowell, 680, date(2024, 3, 1)),
        ];

        let ids: Vec<_> = score_history(&data).into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["a", "c", "b"]);
        // insertion order untouched
        assert_eq!(data.credit_scores[0].id, "b");
    }
}
