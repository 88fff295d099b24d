//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod calculation;
pub mod session;
pub mod user;


pub use calculation::CalculationRepository;
pub use session::SessionRepository;
pub use user::{UserRepository, is_unique_violation};
