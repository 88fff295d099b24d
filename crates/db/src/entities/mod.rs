//! `SeaORM` entity definitions.

pub mod calculations;
pub mod sessions;
pub mod users;
