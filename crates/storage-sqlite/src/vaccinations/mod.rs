//! SQLite storage implementation for vaccination records.

mod model;
mod repository;

pub use model::VaccinationDB;
pub use repository::VaccinationRepository;
