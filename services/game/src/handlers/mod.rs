pub mod game;
pub mod image;
pub mod onboarding;
pub mod play;
pub mod question;
pub mod section;
pub mod stage;
pub mod user;

use qbm_auth_types::identity::Identity;
use qbm_domain::role::UserRole;

use crate::error::GameServiceError;

/// Role floor check shared by all handlers.
pub(crate) fn require(identity: &Identity, role: UserRole) -> Result<(), GameServiceError> {
    if identity.has_role(role) {
        Ok(())
    } else {
        Err(GameServiceError::Forbidden)
    }
}

/// The player area is for players only — admins and managers have their own
/// areas — and only after onboarding completed.
pub(crate) fn require_player(identity: &Identity) -> Result<(), GameServiceError> {
    if identity.role != UserRole::Player || !identity.onboarded {
        return Err(GameServiceError::Forbidden);
    }
    Ok(())
}
