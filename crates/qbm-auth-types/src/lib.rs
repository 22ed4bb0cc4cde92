//! Session-token claims and the typed identity context derived from them.
//!
//! The authentication provider is an external collaborator: it verifies the
//! login and issues an HS256-signed session token. Services validate that
//! token once in middleware and hand every handler the same typed
//! [`identity::Identity`].

pub mod claims;
pub mod identity;
