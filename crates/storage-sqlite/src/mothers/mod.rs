//! SQLite storage implementation for mothers.

mod model;
mod repository;

pub use model::MotherDB;
pub use repository::MotherRepository;
