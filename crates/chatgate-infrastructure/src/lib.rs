//! Local storage for the chatgate client: paths, configuration and the
//! session marker.

pub mod config_service;
pub mod paths;
pub mod storage;
pub mod toml_session_store;

pub use crate::config_service::ConfigService;
pub use crate::paths::ChatGatePaths;
pub use crate::toml_session_store::TomlSessionStore;
