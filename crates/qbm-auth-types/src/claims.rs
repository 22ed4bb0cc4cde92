use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Cookie carrying the session token when no Authorization header is sent.
pub const QBM_SESSION_COOKIE: &str = "qbm_session";

/// Session-token lifetime in seconds (7 days), used when minting tokens
/// on behalf of the provider in tests and local development.
pub const SESSION_TOKEN_EXP: u64 = 604800;

/// Claims carried by the provider-issued session JWT.
///
/// `sub` is the provider's stable subject identifier for the account — the
/// key the identity bridge maps to a local user row. `role` and `locale`
/// use the wire formats of `qbm-domain`; `onboarded` flips to true once the
/// provider records onboarding completion in its user metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub role: u8,
    pub locale: String,
    pub onboarded: bool,
    pub exp: u64,
}

/// Token-level failures, all rendered as 401 by the middleware.
#[derive(Debug, thiserror::Error)]
pub enum SessionTokenError {
    #[error("invalid session token")]
    Invalid,
    #[error("could not sign session token")]
    Signing,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

/// Validate a session token (signature + expiry) and return its claims.
pub fn validate_session_token(
    token: &str,
    secret: &str,
) -> Result<SessionClaims, SessionTokenError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|_| SessionTokenError::Invalid)?;

    Ok(data.claims)
}

/// Sign a session token the way the provider does. Used by tests and local
/// development; production tokens come from the provider itself.
pub fn issue_session_token(
    sub: &str,
    role: u8,
    locale: &str,
    onboarded: bool,
    secret: &str,
) -> Result<String, SessionTokenError> {
    let claims = SessionClaims {
        sub: sub.to_owned(),
        role,
        locale: locale.to_owned(),
        onboarded,
        exp: now_secs() + SESSION_TOKEN_EXP,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| SessionTokenError::Signing)
}
