//! Session domain module.
//!
//! - `model`: The authenticated identity (`Session`)
//! - `repository`: Client-local persistence of the marker (`SessionStore`)

mod model;
mod repository;

pub use model::Session;
pub use repository::SessionStore;
