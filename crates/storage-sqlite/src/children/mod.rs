//! SQLite storage implementation for children.

mod model;
mod repository;

pub use model::ChildDB;
pub use repository::ChildRepository;
pub(crate) use repository::modify_child;
