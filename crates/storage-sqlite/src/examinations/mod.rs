//! SQLite storage implementation for examinations.

mod model;
mod repository;

pub use model::ExaminationDB;
pub use repository::ExaminationRepository;
