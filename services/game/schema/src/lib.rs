//! sea-orm entities for the game service.

pub mod answers;
pub mod games;
pub mod palmares;
pub mod questions;
pub mod sections;
pub mod stage_paragraphs;
pub mod stages;
pub mod users;
