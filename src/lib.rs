// Money Tracker - Core Library
// Local record store for credit scores, cards, bank accounts, debts and
// derogatory marks, plus the summaries the dashboard shows.

pub mod config;
pub mod db;
pub mod document;
pub mod entities;
pub mod error;
pub mod storage;
pub mod store;
pub mod summary;
pub mod telemetry;

// Re-export commonly used types
pub use config::{open_storage, StorageBackend, StoreConfig, DEFAULT_STORAGE_KEY};
pub use db::SqliteStorage;
pub use document::{AppData, LoadedDocument, UnparsedRecord};
pub use entities::{
    BankAccountType, BankCard, CardColor, CardNetwork, CardStatus,
    CreditCard, CreditScore, CreditScoreProvider, CreditTier,
    Debt, DebtStatus, DebtType, PaymentFrequency,
    DerogatoryMark, DerogatoryMarkType, MarkStatus,
    Entity, EntityKind, PaymentReminder, Rewards, RewardsType, TransactionLimits,
};
pub use error::StoreError;
pub use storage::{validate_storage_key, FileStorage, KeyValueStorage, MemoryStorage};
pub use store::DataStore;
pub use summary::{DebtSummary, FeeSummary, FinancialSummary};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
