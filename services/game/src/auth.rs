//! Authentication middleware: validates the provider-issued session token
//! once per request and installs a typed [`Identity`] for every handler.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use qbm_auth_types::claims::validate_session_token;
use qbm_auth_types::identity::{Identity, session_token};
use qbm_core::error::AppError;

use crate::state::AppState;

/// Apply with `middleware::from_fn_with_state(state, authenticate)` on every
/// non-public route. Handlers then extract `Identity` and enforce roles.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = session_token(req.headers()).ok_or(AppError::Unauthorized)?;
    let claims =
        validate_session_token(&token, &state.session_secret).map_err(|_| AppError::Unauthorized)?;
    let identity = Identity::from_claims(&claims).ok_or(AppError::Unauthorized)?;
    req.extensions_mut().insert(identity);
    Ok(next.run(req).await)
}
