//! Vaccinations module - the six-vaccine checklist and its progress.

mod vaccinations_model;
mod vaccinations_service;
mod vaccinations_traits;


pub use vaccinations_model::{
    calculate_progress, NewVaccination, Vaccination, VaccinationProgress, VaccineChecklist,
};
pub use vaccinations_service::VaccinationService;
pub use vaccinations_traits::{VaccinationRepositoryTrait, VaccinationServiceTrait};
