//! Data models exchanged with the Regulus API

pub mod transaction;

pub use transaction::TransactionRecord;
