//! Typed identity context produced by the authentication middleware.

use axum::extract::FromRequestParts;
use axum_extra::extract::CookieJar;
use http::StatusCode;
use http::request::Parts;

use qbm_domain::locale::Locale;
use qbm_domain::role::UserRole;

use crate::claims::{QBM_SESSION_COOKIE, SessionClaims};

/// Verified caller identity, inserted as a request extension by the
/// service's `authenticate` middleware and extracted by handlers.
///
/// Role enforcement (403) stays in the handlers, after extraction.
#[derive(Debug, Clone)]
pub struct Identity {
    /// Provider subject id — the external-identity key of the user row.
    pub subject: String,
    pub role: UserRole,
    pub locale: Locale,
    pub onboarded: bool,
}

impl Identity {
    /// Build from validated claims. `None` if the role or locale wire
    /// values are out of range — treated as an invalid token upstream.
    pub fn from_claims(claims: &SessionClaims) -> Option<Self> {
        Some(Self {
            subject: claims.sub.clone(),
            role: UserRole::from_u8(claims.role)?,
            locale: Locale::parse(&claims.locale)?,
            onboarded: claims.onboarded,
        })
    }

    /// Whether the caller holds at least the given role.
    pub fn has_role(&self, role: UserRole) -> bool {
        self.role >= role
    }
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // In Rust 1.82+ precise capturing, `async fn` captures lifetimes differently,
    // causing E0195. Fix: extract values synchronously, return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let identity = parts.extensions.get::<Identity>().cloned();
        async move { identity.ok_or(StatusCode::UNAUTHORIZED) }
    }
}

/// Pull the raw session token out of request headers: `Authorization:
/// Bearer` first, then the `qbm_session` cookie.
pub fn session_token(headers: &http::HeaderMap) -> Option<String> {
    let bearer = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_owned);
    if bearer.is_some() {
        return bearer;
    }

    let jar = CookieJar::from_headers(headers);
    jar.get(QBM_SESSION_COOKIE).map(|c| c.value().to_owned())
}
