//! Dashboard module - headline counts for the home screen.

mod dashboard_model;
mod dashboard_service;


pub use dashboard_model::DashboardStats;
pub use dashboard_service::{DashboardService, DashboardServiceTrait};
