use std::sync::Arc;

use anyhow::Context;
use babyassist_analysis::AnalysisClient;
use babyassist_core::{
    auth::{InMemoryRateLimitStore, LoginRateLimiter},
    children::{ChildService, ChildServiceTrait},
    dashboard::{DashboardService, DashboardServiceTrait},
    examinations::{ExaminationService, ExaminationServiceTrait},
    mothers::{MotherService, MotherServiceTrait},
    screenings::{ScreeningService, ScreeningServiceTrait},
    vaccinations::{VaccinationService, VaccinationServiceTrait},
    visits::{VisitService, VisitServiceTrait},
};
use babyassist_storage_sqlite::{
    db, ChildRepository, ExaminationRepository, MotherRepository, ScreeningRepository,
    VaccinationRepository, VisitRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::{auth::AuthManager, config::Config};

pub struct AppState {
    pub mother_service: Arc<dyn MotherServiceTrait + Send + Sync>,
    pub child_service: Arc<dyn ChildServiceTrait + Send + Sync>,
    pub visit_service: Arc<dyn VisitServiceTrait + Send + Sync>,
    pub examination_service: Arc<dyn ExaminationServiceTrait + Send + Sync>,
    pub vaccination_service: Arc<dyn VaccinationServiceTrait + Send + Sync>,
    pub screening_service: Arc<dyn ScreeningServiceTrait + Send + Sync>,
    pub dashboard_service: Arc<dyn DashboardServiceTrait + Send + Sync>,
    pub login_limiter: Arc<LoginRateLimiter>,
    pub auth: Option<Arc<AuthManager>>,
    pub trust_forwarded_for: bool,
}

pub fn init_tracing() {
    let log_format = std::env::var("BA_LOG_FORMAT").unwrap_or_else(|_| "json".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("text") {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    } else {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    let mother_repo = Arc::new(MotherRepository::new(pool.clone(), writer.clone()));
    let child_repo = Arc::new(ChildRepository::new(pool.clone(), writer.clone()));
    let visit_repo = Arc::new(VisitRepository::new(pool.clone(), writer.clone()));
    let examination_repo = Arc::new(ExaminationRepository::new(pool.clone(), writer.clone()));
    let vaccination_repo = Arc::new(VaccinationRepository::new(pool.clone(), writer.clone()));
    let screening_repo = Arc::new(ScreeningRepository::new(pool.clone(), writer));

    let analyzer = Arc::new(
        AnalysisClient::new(&config.analysis_url, config.analysis_timeout)
            .context("Invalid BA_ANALYSIS_URL")?,
    );
    tracing::info!("Image analysis service: {}", analyzer.base_url());

    let mother_service = Arc::new(MotherService::new(mother_repo.clone()));
    let child_service = Arc::new(ChildService::new(child_repo.clone(), mother_repo.clone()));
    let visit_service = Arc::new(VisitService::new(visit_repo.clone(), mother_repo.clone()));
    let examination_service = Arc::new(ExaminationService::new(
        examination_repo,
        mother_repo.clone(),
        child_repo.clone(),
    ));
    let vaccination_service = Arc::new(VaccinationService::new(
        vaccination_repo,
        child_repo.clone(),
    ));
    let screening_service = Arc::new(ScreeningService::new(
        screening_repo,
        child_repo.clone(),
        mother_repo.clone(),
        analyzer,
    ));
    let dashboard_service = Arc::new(DashboardService::new(mother_repo, child_repo, visit_repo));

    let login_limiter = Arc::new(LoginRateLimiter::new(
        Arc::new(InMemoryRateLimitStore::new()),
        config.login_policy,
    ));

    let auth = config
        .auth
        .as_ref()
        .map(AuthManager::new)
        .transpose()
        .context("Invalid BA_AUTH_PASSWORD_HASH")?
        .map(Arc::new);
    if config.trust_forwarded_for {
        tracing::info!("Login throttling keys on X-Forwarded-For");
    }
    if auth.is_none() {
        tracing::warn!("BA_AUTH_PASSWORD_HASH not set; the API is open to any client");
    }

    Ok(Arc::new(AppState {
        mother_service,
        child_service,
        visit_service,
        examination_service,
        vaccination_service,
        screening_service,
        dashboard_service,
        login_limiter,
        auth,
        trust_forwarded_for: config.trust_forwarded_for,
    }))
}
