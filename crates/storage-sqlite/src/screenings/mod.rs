//! SQLite storage implementation for screenings.

mod model;
mod repository;

pub use model::ScreeningDB;
pub use repository::ScreeningRepository;
