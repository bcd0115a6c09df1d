//! REST clients for the chat/history service.

pub mod auth_api_client;
pub mod chat_api_client;
pub mod history_api_client;
pub mod service_client;

pub use auth_api_client::AuthApiClient;
pub use chat_api_client::ChatApiClient;
pub use history_api_client::HistoryApiClient;
pub use service_client::ServiceClient;
