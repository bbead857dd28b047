// The persisted document: every collection plus a last-updated stamp,
// stored as one JSON value under one storage key.

use crate::entities::{
    BankCard, CreditCard, CreditScore, Debt, DerogatoryMark, Entity, PaymentReminder,
};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Whole-store document
///
/// Collections default to empty so documents written before a collection
/// existed still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppData {
    #[serde(default)]
    pub credit_scores: Vec<Entity<CreditScore>>,

    #[serde(default)]
    pub credit_cards: Vec<Entity<CreditCard>>,

    #[serde(default)]
    pub bank_cards: Vec<Entity<BankCard>>,

    #[serde(default)]
    pub debts: Vec<Entity<Debt>>,

    #[serde(default)]
    pub derogatory_marks: Vec<Entity<DerogatoryMark>>,

    #[serde(default)]
    pub payment_reminders: Vec<Entity<PaymentReminder>>,

    #[serde(default = "Utc::now", with = "iso_millis")]
    pub last_updated: DateTime<Utc>,
}

impl AppData {
    /// Empty document stamped with the current time
    pub fn empty() -> Self {
        AppData {
            credit_scores: Vec::new(),
            credit_cards: Vec::new(),
            bank_cards: Vec::new(),
            debts: Vec::new(),
            derogatory_marks: Vec::new(),
            payment_reminders: Vec::new(),
            last_updated: Utc::now(),
        }
    }

    /// Total records across the five managed collections
    pub fn record_count(&self) -> usize {
        self.credit_scores.len()
            + self.credit_cards.len()
            + self.bank_cards.len()
            + self.debts.len()
            + self.derogatory_marks.len()
    }

    /// True when every collection matches `other`, ignoring `last_updated`
    pub fn same_records(&self, other: &AppData) -> bool {
        self.credit_scores == other.credit_scores
            && self.credit_cards == other.credit_cards
            && self.bank_cards == other.bank_cards
            && self.debts == other.debts
            && self.derogatory_marks == other.derogatory_marks
            && self.payment_reminders == other.payment_reminders
    }

    pub fn touch(&mut self) {
        self.last_updated = Utc::now();
    }
}

impl Default for AppData {
    fn default() -> Self {
        Self::empty()
    }
}

// ============================================================================
// RECORD-BY-RECORD LOADING
// ============================================================================

/// A stored record that does not fit its typed shape (unknown enum value,
/// `null` amount, missing field). Kept verbatim and written back on every save.
#[derive(Debug, Clone, PartialEq)]
pub struct UnparsedRecord {
    /// JSON key of the collection it came from (e.g. `debts`)
    pub collection: &'static str,
    pub raw: Value,
    pub reason: String,
}

/// A document read from storage, plus the records that did not parse
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDocument {
    pub data: AppData,
    pub unparsed: Vec<UnparsedRecord>,
}

impl LoadedDocument {
    /// Parse stored text one record at a time.
    ///
    /// Fails only when the text is not a JSON object or a collection is not
    /// an array. A missing or unreadable `lastUpdated` becomes "now".
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        let Value::Object(mut root) = serde_json::from_str::<Value>(text)? else {
            return Err(serde::de::Error::custom("document must be a JSON object"));
        };

        let mut unparsed = Vec::new();
        let data = AppData {
            credit_scores: take_records(&mut root, "creditScores", &mut unparsed)?,
            credit_cards: take_records(&mut root, "creditCards", &mut unparsed)?,
            bank_cards: take_records(&mut root, "bankCards", &mut unparsed)?,
            debts: take_records(&mut root, "debts", &mut unparsed)?,
            derogatory_marks: take_records(&mut root, "derogatoryMarks", &mut unparsed)?,
            payment_reminders: take_records(&mut root, "paymentReminders", &mut unparsed)?,
            last_updated: take_timestamp(&mut root).unwrap_or_else(Utc::now),
        };

        Ok(LoadedDocument { data, unparsed })
    }
}

fn take_records<T: DeserializeOwned>(
    root: &mut Map<String, Value>,
    key: &'static str,
    unparsed: &mut Vec<UnparsedRecord>,
) -> Result<Vec<Entity<T>>, serde_json::Error> {
    let items = match root.remove(key) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(serde::de::Error::custom(format!("`{}` must be an array", key)));
        }
    };

    let mut records = Vec::with_capacity(items.len());
    for item in items {
        match serde_json::from_value::<Entity<T>>(item.clone()) {
            Ok(record) => records.push(record),
            Err(e) => unparsed.push(UnparsedRecord {
                collection: key,
                raw: item,
                reason: e.to_string(),
            }),
        }
    }
    Ok(records)
}

fn take_timestamp(root: &mut Map<String, Value>) -> Option<DateTime<Utc>> {
    let raw = root.remove("lastUpdated")?;
    DateTime::parse_from_rfc3339(raw.as_str()?)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

impl AppData {
    /// Document JSON with `unparsed` appended to their collections
    pub fn to_value_with(&self, unparsed: &[UnparsedRecord]) -> serde_json::Result<Value> {
        let mut value = serde_json::to_value(self)?;
        if let Some(root) = value.as_object_mut() {
            for record in unparsed {
                if let Some(Value::Array(items)) = root.get_mut(record.collection) {
                    items.push(record.raw.clone());
                }
            }
        }
        Ok(value)
    }
}

/// ISO-8601 with millisecond precision and a `Z` suffix
/// (e.g. `2024-06-01T12:30:00.000Z`). Any RFC 3339 offset is accepted on read.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|t| t.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
