// Payment reminders are part of the document shape but no operation creates
// or reads them yet. They are carried through load/save/import untouched.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReminderType {
    CreditCard,
    Debt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReminderStatus {
    Pending,
    Paid,
    Overdue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReminder {
    /// Id of the credit card or debt this reminder is for
    pub card_id: String,
    pub amount: f64,
    pub due_date: NaiveDate,
    #[serde(rename = "type")]
    pub reminder_type: ReminderType,
    pub status: ReminderStatus,
    pub autopay_enabled: bool,
}
