//! Session tokens minted the way the authentication provider mints them.

use qbm_auth_types::claims::issue_session_token;
use qbm_domain::locale::Locale;
use qbm_domain::role::UserRole;

/// Signing secret shared by test routers and test tokens.
pub const TEST_SESSION_SECRET: &str = "test-session-secret-for-tests-only";

/// Mint a session token for an arbitrary identity.
pub fn session_token_for(
    subject: &str,
    role: UserRole,
    locale: Locale,
    onboarded: bool,
    secret: &str,
) -> String {
    issue_session_token(subject, role.as_u8(), locale.as_str(), onboarded, secret)
        .expect("failed to sign test session token")
}

/// Onboarded French player token.
pub fn player_token(subject: &str) -> String {
    session_token_for(subject, UserRole::Player, Locale::Fr, true, TEST_SESSION_SECRET)
}

/// Admin token.
pub fn admin_token(subject: &str) -> String {
    session_token_for(subject, UserRole::Admin, Locale::Fr, true, TEST_SESSION_SECRET)
}

/// Manager token.
pub fn manager_token(subject: &str) -> String {
    session_token_for(subject, UserRole::Manager, Locale::Fr, true, TEST_SESSION_SECRET)
}

/// `Authorization` header value for a token.
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}
