use chrono::{Duration, Utc};
use log::{debug, info};
use serde_json::{json, Value};
use std::sync::Arc;

use super::analysis_model::ImageUpload;
use super::screenings_model::{
    AnalysisType, ChildConditionsUpdate, ChildScreeningOutcome, MotherScreeningOutcome, NewScreening, Screening,
    ScreeningStats, ScreeningUpdate,
};
use super::screenings_traits::{
    ImageAnalyzerTrait, ScreeningRepositoryTrait, ScreeningServiceTrait,
};
use crate::assessment::SubjectType;
use crate::children::ChildRepositoryTrait;
use crate::constants::RECENT_SCREENING_DAYS;
use crate::errors::{Error, Result};
use crate::mothers::{MotherRepositoryTrait, RiskLevel};

/// Service running image screenings and storing their results
pub struct ScreeningService {
    repository: Arc<dyn ScreeningRepositoryTrait>,
    child_repository: Arc<dyn ChildRepositoryTrait>,
    mother_repository: Arc<dyn MotherRepositoryTrait>,
    analyzer: Arc<dyn ImageAnalyzerTrait>,
}

impl ScreeningService {
    pub fn new(
        repository: Arc<dyn ScreeningRepositoryTrait>,
        child_repository: Arc<dyn ChildRepositoryTrait>,
        mother_repository: Arc<dyn MotherRepositoryTrait>,
        analyzer: Arc<dyn ImageAnalyzerTrait>,
    ) -> Self {
        Self {
            repository,
            child_repository,
            mother_repository,
            analyzer,
        }
    }

    fn record(
        person_type: SubjectType,
        person_id: &str,
        analysis_type: AnalysisType,
        analysis_results: Value,
        condition: Option<String>,
        risk_level: RiskLevel,
        notes: &Option<String>,
    ) -> NewScreening {
        NewScreening {
            id: None,
            person_id: person_id.to_string(),
            person_type,
            image_url: None,
            analysis_results,
            analysis_type,
            condition,
            notes: notes.clone(),
            risk_level,
        }
    }
}

#[async_trait::async_trait]
impl ScreeningServiceTrait for ScreeningService {
    async fn screen_child(
        &self,
        child_id: &str,
        image: ImageUpload,
        notes: Option<String>,
    ) -> Result<ChildScreeningOutcome> {
        self.child_repository.get_by_id(child_id)?;
        debug!(
            "Screening child {} with image {} ({} bytes)",
            child_id,
            image.file_name,
            image.bytes.len()
        );

        // Both requests are in flight at once; either failure aborts the screening.
        let (skin, posture) = tokio::join!(
            self.analyzer.assess_skin(&image),
            self.analyzer.analyze_posture(&image)
        );
        let (skin, posture) = (skin?, posture?);

        let skin_json = serde_json::to_value(&skin)?;
        let posture_json = serde_json::to_value(&posture)?;
        let skin_condition = skin.reported_condition().map(str::to_string);
        let posture_condition = posture.reported_condition().map(str::to_string);

        let mut records = Vec::with_capacity(3);
        if let Some(condition) = &skin_condition {
            records.push(Self::record(
                SubjectType::Child,
                child_id,
                AnalysisType::Skin,
                json!({ "skin": skin_json }),
                Some(condition.clone()),
                skin.risk_level(),
                &notes,
            ));
        }
        if let Some(condition) = &posture_condition {
            records.push(Self::record(
                SubjectType::Child,
                child_id,
                AnalysisType::Posture,
                json!({ "posture": posture_json }),
                Some(condition.clone()),
                RiskLevel::Low,
                &notes,
            ));
        }
        records.push(Self::record(
            SubjectType::Child,
            child_id,
            AnalysisType::Combined,
            json!({ "skin": skin_json, "posture": posture_json }),
            None,
            skin.risk_level(),
            &notes,
        ));

        let child_conditions = ChildConditionsUpdate {
            child_id: child_id.to_string(),
            skin_condition,
            posture_condition,
            screened_on: Utc::now().date_naive(),
        };
        let screenings = self
            .repository
            .create_batch(records, Some(child_conditions))
            .await?;

        info!(
            "Child {} screened, {} record(s) saved",
            child_id,
            screenings.len()
        );
        Ok(ChildScreeningOutcome {
            skin,
            posture,
            screenings,
        })
    }

    async fn screen_mother(
        &self,
        mother_id: &str,
        image: ImageUpload,
        notes: Option<String>,
    ) -> Result<MotherScreeningOutcome> {
        self.mother_repository.get_by_id(mother_id)?;
        debug!(
            "Extracting medical readings for mother {} from {}",
            mother_id, image.file_name
        );

        let readings = self.analyzer.extract_medical_readings(&image).await?;
        let results = json!({ "medicalReadings": serde_json::to_value(&readings)? });
        let device = readings.reported_device().map(str::to_string);

        let records = [
            Self::record(
                SubjectType::Mother,
                mother_id,
                AnalysisType::General,
                results.clone(),
                device.clone(),
                readings.risk_level(),
                &notes,
            ),
            Self::record(
                SubjectType::Mother,
                mother_id,
                AnalysisType::General,
                results,
                Some(device.unwrap_or_else(|| "general_health".to_string())),
                RiskLevel::Low,
                &notes,
            ),
        ];

        let screenings = self.repository.create_batch(records.into(), None).await?;

        info!("Mother {} screened from device readings", mother_id);
        Ok(MotherScreeningOutcome {
            medical_readings: readings,
            screenings,
        })
    }

    async fn create_screening(&self, new_screening: NewScreening) -> Result<Screening> {
        new_screening.validate()?;
        self.repository.create(new_screening).await
    }

    async fn update_screening(&self, screening_update: ScreeningUpdate) -> Result<Screening> {
        screening_update.validate()?;
        self.repository.update(screening_update).await
    }

    async fn delete_screening(&self, screening_id: &str) -> Result<()> {
        if self.repository.delete(screening_id).await? == 0 {
            return Err(Error::not_found("Screening", screening_id));
        }
        Ok(())
    }

    fn get_screening(&self, screening_id: &str) -> Result<Screening> {
        self.repository.get_by_id(screening_id)
    }

    fn get_screenings(&self) -> Result<Vec<Screening>> {
        self.repository.list()
    }

    fn get_screenings_for(
        &self,
        person_type: SubjectType,
        person_id: &str,
    ) -> Result<Vec<Screening>> {
        self.repository.list_by_person(person_id, person_type)
    }

    fn get_stats(&self) -> Result<ScreeningStats> {
        let since = Utc::now().naive_utc() - Duration::days(RECENT_SCREENING_DAYS);
        Ok(ScreeningStats {
            total: self.repository.count()?,
            recent: self.repository.count_created_since(since)?,
        })
    }
}
