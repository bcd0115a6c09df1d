//! AuthApiClient - registration and login against the user service.

use crate::service_client::{ServiceClient, error_detail, parse_json};
use async_trait::async_trait;
use chatgate_core::Result;
use chatgate_core::auth::{AuthError, AuthService};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    email: String,
}

/// Auth collaborator backed by `POST /users/register` and `POST /users/login`.
///
/// Every failure surfaces as [`chatgate_core::ChatGateError::Auth`] so the
/// auth screen can show it inline.
#[derive(Debug, Clone)]
pub struct AuthApiClient {
    service: ServiceClient,
}

impl AuthApiClient {
    pub fn new(service: ServiceClient) -> Self {
        Self { service }
    }
}

#[async_trait]
impl AuthService for AuthApiClient {
    async fn register(&self, email: &str, password: &str) -> Result<()> {
        let request = self
            .service
            .request(Method::POST, &["users", "register"])?
            .json(&Credentials { email, password });
        let response = self
            .service
            .execute(request)
            .await
            .map_err(|e| AuthError::RegistrationFailed(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            tracing::info!(%email, "registered user");
            return Ok(());
        }
        if status == StatusCode::CONFLICT || status == StatusCode::BAD_REQUEST {
            tracing::debug!(%email, %status, "registration rejected");
            return Err(AuthError::UserAlreadyExists.into());
        }
        let detail = error_detail(response).await;
        tracing::warn!(%email, %status, %detail, "registration failed");
        Err(AuthError::RegistrationFailed(detail).into())
    }

    async fn login(&self, email: &str, password: &str) -> Result<String> {
        let request = self
            .service
            .request(Method::POST, &["users", "login"])?
            .json(&Credentials { email, password });
        let response = self
            .service
            .execute(request)
            .await
            .map_err(|e| AuthError::LoginFailed(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::NOT_FOUND {
            tracing::debug!(%email, %status, "login rejected");
            return Err(AuthError::InvalidCredentials.into());
        }
        if !status.is_success() {
            let detail = error_detail(response).await;
            tracing::warn!(%email, %status, %detail, "login failed");
            return Err(AuthError::LoginFailed(detail).into());
        }

        let body: LoginResponse = parse_json(response)
            .await
            .map_err(|e| AuthError::LoginFailed(e.to_string()))?;
        tracing::info!(email = %body.email, "logged in");
        Ok(body.email)
    }
}
