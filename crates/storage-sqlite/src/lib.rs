//! SQLite storage implementation for BabyAssist.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `babyassist-core` and contains:
//! - Database connection pooling and the single-writer actor
//! - Embedded Diesel migrations
//! - Repository implementations for mothers, children, visits, examinations,
//!   screenings and vaccination records
//! - Database-specific row types (with Diesel derives)
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! Reads go through the r2d2 pool; writes are serialised through [`WriteHandle`].

pub mod db;
pub mod errors;
pub mod schema;
mod utils;

// Repository implementations
pub mod children;
pub mod examinations;
pub mod mothers;
pub mod screenings;
pub mod vaccinations;
pub mod visits;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from babyassist-core for convenience
pub use babyassist_core::errors::{DatabaseError, Error, Result};

pub use children::ChildRepository;
pub use examinations::ExaminationRepository;
pub use mothers::MotherRepository;
pub use screenings::ScreeningRepository;
pub use vaccinations::VaccinationRepository;
pub use visits::VisitRepository;
