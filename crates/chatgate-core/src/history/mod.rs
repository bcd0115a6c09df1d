//! History domain module.
//!
//! - `model`: Backend identifiers and stored records
//! - `repository`: Storage port traits (`HistoryStore`, `UserDirectory`)

mod model;
mod repository;

pub use model::{HistoryRecord, QaPair, RecordId, UserId};
pub use repository::{HistoryStore, UserDirectory};
