//! Visits module - scheduling, today's round and the nearest-visit search.

mod nearest;
mod visits_model;
mod visits_service;
mod visits_traits;


pub use nearest::{find_nearest, planar_distance, GeoPoint};
pub use visits_model::{NearestVisit, NewVisit, Visit, VisitStatus, VisitType, VisitUpdate};
pub use visits_service::VisitService;
pub use visits_traits::{VisitRepositoryTrait, VisitServiceTrait};
