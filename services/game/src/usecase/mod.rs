pub mod game;
pub mod onboarding;
pub mod progress;
pub mod question;
pub mod section;
pub mod stage;
pub mod user;
