//! Admin gate: a fixed shared secret checked on every admin request.
//! Keeps casual visitors out of the editor; it is not access control.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use tracing::warn;

use crate::errors::AppError;
use crate::state::AppState;

pub const ADMIN_PASSWORD_HEADER: &str = "x-admin-password";

/// Extractor that succeeds only when `x-admin-password` matches the configured secret.
pub struct RequireAdmin;

#[async_trait]
impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let supplied = parts
            .headers
            .get(ADMIN_PASSWORD_HEADER)
            .and_then(|val| val.to_str().ok());

        match supplied {
            Some(password) if password == state.config.admin_password => Ok(RequireAdmin),
            Some(_) => {
                warn!("Admin request with wrong password");
                Err(AppError::Unauthorized)
            }
            None => {
                warn!("Admin request without {ADMIN_PASSWORD_HEADER} header");
                Err(AppError::Unauthorized)
            }
        }
    }
}
