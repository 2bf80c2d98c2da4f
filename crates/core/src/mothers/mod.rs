//! Mothers module - domain models, services, and traits.

mod mothers_model;
mod mothers_service;
mod mothers_traits;


pub use mothers_model::{Mother, MotherUpdate, NewMother, RiskLevel};
pub use mothers_service::MotherService;
pub use mothers_traits::{MotherRepositoryTrait, MotherServiceTrait};
