//! SQLite storage implementation for home visits.

mod model;
mod repository;

pub use model::VisitDB;
pub use repository::VisitRepository;
