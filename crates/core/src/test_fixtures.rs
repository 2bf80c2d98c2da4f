//! In-memory repositories shared by the service tests.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use std::sync::{Arc, Mutex};

use crate::assessment::{HealthStatus, SubjectType};
use crate::children::{Child, ChildRepositoryTrait, ChildUpdate, NewChild};
use crate::errors::{Error, Result};
use crate::examinations::{
    Examination, ExaminationRepositoryTrait, ExaminationUpdate, NewExamination,
};
use crate::mothers::{Mother, MotherRepositoryTrait, MotherUpdate, NewMother, RiskLevel};
use crate::screenings::{
    ChildConditionsUpdate, ImageAnalyzerTrait, ImageUpload, MedicalReadings, NewScreening,
    PostureAnalysis, Screening, ScreeningRepositoryTrait, ScreeningUpdate, SkinAssessment,
};
use crate::vaccinations::{NewVaccination, Vaccination, VaccinationRepositoryTrait};
use crate::visits::{NewVisit, Visit, VisitRepositoryTrait, VisitStatus, VisitUpdate};

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

fn next_id(prefix: &str, len: usize) -> String {
    format!("{}-{}", prefix, len + 1)
}

pub fn mother(id: &str, age: Option<i32>, location: Option<(f64, f64)>) -> Mother {
    Mother {
        id: id.to_string(),
        name: format!("Mother {}", id),
        age,
        mobile: None,
        address: None,
        risk_level: RiskLevel::Low,
        pregnancy_week: None,
        last_visit: None,
        children_count: 0,
        latitude: location.map(|l| l.0),
        longitude: location.map(|l| l.1),
        created_at: now(),
        updated_at: now(),
    }
}

pub fn child(id: &str, mother_id: &str, age_in_months: i32) -> Child {
    Child {
        id: id.to_string(),
        name: format!("Child {}", id),
        age_in_months,
        mother_id: mother_id.to_string(),
        health_status: HealthStatus::Healthy,
        last_screening: None,
        vaccinations_completed: 0,
        vaccinations_total: 6,
        has_photo: false,
        skin_condition: None,
        posture_condition: None,
        created_at: now(),
        updated_at: now(),
    }
}

pub fn visit(id: &str, mother_id: &str, date: NaiveDate, status: VisitStatus) -> Visit {
    Visit {
        id: id.to_string(),
        mother_id: mother_id.to_string(),
        visit_date: date,
        visit_type: crate::visits::VisitType::Prenatal,
        status,
        notes: None,
        created_at: now(),
        updated_at: now(),
    }
}

// --- Mothers ---

#[derive(Clone, Default)]
pub struct MockMotherRepository {
    pub mothers: Arc<Mutex<Vec<Mother>>>,
}

impl MockMotherRepository {
    pub fn with(mothers: Vec<Mother>) -> Self {
        Self {
            mothers: Arc::new(Mutex::new(mothers)),
        }
    }
}

#[async_trait]
impl MotherRepositoryTrait for MockMotherRepository {
    async fn create(&self, new_mother: NewMother) -> Result<Mother> {
        let mut mothers = self.mothers.lock().unwrap();
        let id = new_mother
            .id
            .clone()
            .unwrap_or_else(|| next_id("mother", mothers.len()));
        let mut created = mother(&id, new_mother.age, None);
        created.name = new_mother.name;
        created.risk_level = new_mother.risk_level;
        created.latitude = new_mother.latitude;
        created.longitude = new_mother.longitude;
        mothers.push(created.clone());
        Ok(created)
    }

    async fn update(&self, mother_update: MotherUpdate) -> Result<Mother> {
        let mut mothers = self.mothers.lock().unwrap();
        let id = mother_update.id.clone().unwrap_or_default();
        let existing = mothers
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| Error::not_found("Mother", id.clone()))?;
        existing.name = mother_update.name;
        existing.age = mother_update.age;
        existing.risk_level = mother_update.risk_level;
        Ok(existing.clone())
    }

    async fn delete(&self, mother_id: &str) -> Result<usize> {
        let mut mothers = self.mothers.lock().unwrap();
        let before = mothers.len();
        mothers.retain(|m| m.id != mother_id);
        Ok(before - mothers.len())
    }

    fn get_by_id(&self, mother_id: &str) -> Result<Mother> {
        self.mothers
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == mother_id)
            .cloned()
            .ok_or_else(|| Error::not_found("Mother", mother_id))
    }

    fn list(&self) -> Result<Vec<Mother>> {
        Ok(self.mothers.lock().unwrap().clone())
    }

    fn list_by_risk_level(&self, risk_level: RiskLevel) -> Result<Vec<Mother>> {
        Ok(self
            .mothers
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.risk_level == risk_level)
            .cloned()
            .collect())
    }
}

// --- Children ---

#[derive(Clone, Default)]
pub struct MockChildRepository {
    pub children: Arc<Mutex<Vec<Child>>>,
}

impl MockChildRepository {
    pub fn with(children: Vec<Child>) -> Self {
        Self {
            children: Arc::new(Mutex::new(children)),
        }
    }

    pub fn snapshot(&self, child_id: &str) -> Child {
        self.get_by_id(child_id).unwrap()
    }

    fn modify(&self, child_id: &str, f: impl FnOnce(&mut Child)) -> Result<Child> {
        let mut children = self.children.lock().unwrap();
        let existing = children
            .iter_mut()
            .find(|c| c.id == child_id)
            .ok_or_else(|| Error::not_found("Child", child_id))?;
        f(existing);
        Ok(existing.clone())
    }
}

#[async_trait]
impl ChildRepositoryTrait for MockChildRepository {
    async fn create(&self, new_child: NewChild) -> Result<Child> {
        let mut children = self.children.lock().unwrap();
        let id = new_child
            .id
            .clone()
            .unwrap_or_else(|| next_id("child", children.len()));
        let mut created = child(&id, &new_child.mother_id, new_child.age_in_months);
        created.name = new_child.name;
        created.health_status = new_child.health_status;
        children.push(created.clone());
        Ok(created)
    }

    async fn update(&self, child_update: ChildUpdate) -> Result<Child> {
        let id = child_update.id.clone().unwrap_or_default();
        self.modify(&id, |c| {
            c.name = child_update.name;
            c.age_in_months = child_update.age_in_months;
            c.health_status = child_update.health_status;
        })
    }

    async fn delete(&self, child_id: &str) -> Result<usize> {
        let mut children = self.children.lock().unwrap();
        let before = children.len();
        children.retain(|c| c.id != child_id);
        Ok(before - children.len())
    }

    async fn set_vaccination_summary(
        &self,
        child_id: &str,
        completed: i32,
        total: i32,
    ) -> Result<Child> {
        self.modify(child_id, |c| {
            c.vaccinations_completed = completed;
            c.vaccinations_total = total;
        })
    }

    fn get_by_id(&self, child_id: &str) -> Result<Child> {
        self.children
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == child_id)
            .cloned()
            .ok_or_else(|| Error::not_found("Child", child_id))
    }

    fn list(&self) -> Result<Vec<Child>> {
        Ok(self.children.lock().unwrap().clone())
    }

    fn list_by_mother(&self, mother_id: &str) -> Result<Vec<Child>> {
        Ok(self
            .children
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.mother_id == mother_id)
            .cloned()
            .collect())
    }

    fn list_by_age_range(&self, min_months: i32, max_months: i32) -> Result<Vec<Child>> {
        let mut found: Vec<Child> = self
            .children
            .lock()
            .unwrap()
            .iter()
            .filter(|c| (min_months..=max_months).contains(&c.age_in_months))
            .cloned()
            .collect();
        found.sort_by_key(|c| c.age_in_months);
        Ok(found)
    }

    fn list_by_health_status(&self, status: HealthStatus) -> Result<Vec<Child>> {
        Ok(self
            .children
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.health_status == status)
            .cloned()
            .collect())
    }
}

// --- Visits ---

#[derive(Clone, Default)]
pub struct MockVisitRepository {
    pub visits: Arc<Mutex<Vec<Visit>>>,
}

impl MockVisitRepository {
    pub fn with(visits: Vec<Visit>) -> Self {
        Self {
            visits: Arc::new(Mutex::new(visits)),
        }
    }

    fn filtered(&self, keep: impl Fn(&Visit) -> bool) -> Vec<Visit> {
        self.visits
            .lock()
            .unwrap()
            .iter()
            .filter(|v| keep(v))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl VisitRepositoryTrait for MockVisitRepository {
    async fn create(&self, new_visit: NewVisit) -> Result<Visit> {
        let mut visits = self.visits.lock().unwrap();
        let id = new_visit
            .id
            .clone()
            .unwrap_or_else(|| next_id("visit", visits.len()));
        let mut created = visit(&id, &new_visit.mother_id, new_visit.visit_date, new_visit.status);
        created.visit_type = new_visit.visit_type;
        created.notes = new_visit.notes;
        visits.push(created.clone());
        Ok(created)
    }

    async fn update(&self, visit_update: VisitUpdate) -> Result<Visit> {
        let mut visits = self.visits.lock().unwrap();
        let id = visit_update.id.clone().unwrap_or_default();
        let existing = visits
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| Error::not_found("Visit", id.clone()))?;
        existing.visit_date = visit_update.visit_date;
        existing.visit_type = visit_update.visit_type;
        existing.status = visit_update.status;
        existing.notes = visit_update.notes;
        Ok(existing.clone())
    }

    async fn delete(&self, visit_id: &str) -> Result<usize> {
        let mut visits = self.visits.lock().unwrap();
        let before = visits.len();
        visits.retain(|v| v.id != visit_id);
        Ok(before - visits.len())
    }

    fn get_by_id(&self, visit_id: &str) -> Result<Visit> {
        self.filtered(|v| v.id == visit_id)
            .pop()
            .ok_or_else(|| Error::not_found("Visit", visit_id))
    }

    fn list(&self) -> Result<Vec<Visit>> {
        Ok(self.filtered(|_| true))
    }

    fn list_by_date(&self, date: NaiveDate) -> Result<Vec<Visit>> {
        Ok(self.filtered(|v| v.visit_date == date))
    }

    fn list_by_mother(&self, mother_id: &str) -> Result<Vec<Visit>> {
        Ok(self.filtered(|v| v.mother_id == mother_id))
    }

    fn list_by_status(&self, status: VisitStatus) -> Result<Vec<Visit>> {
        Ok(self.filtered(|v| v.status == status))
    }
}

// --- Examinations ---

#[derive(Clone, Default)]
pub struct MockExaminationRepository {
    pub examinations: Arc<Mutex<Vec<Examination>>>,
    /// Receives the health status of child submissions.
    pub children: MockChildRepository,
}

impl MockExaminationRepository {
    pub fn linked(children: MockChildRepository) -> Self {
        Self {
            children,
            ..Self::default()
        }
    }
}

#[async_trait]
impl ExaminationRepositoryTrait for MockExaminationRepository {
    async fn create(&self, new_examination: NewExamination) -> Result<Examination> {
        let mut examinations = self.examinations.lock().unwrap();
        let created = Examination {
            id: new_examination
                .id
                .unwrap_or_else(|| next_id("exam", examinations.len())),
            person_id: new_examination.person_id,
            person_type: new_examination.person_type,
            answers: new_examination.answers,
            bmi: new_examination.bmi,
            bmi_category: new_examination.bmi_category,
            health_status: new_examination.health_status,
            notes: new_examination.notes,
            created_at: now(),
        };
        examinations.push(created.clone());
        Ok(created)
    }

    async fn create_submission(&self, new_examination: NewExamination) -> Result<Examination> {
        if new_examination.person_type == SubjectType::Child {
            let status = new_examination.health_status;
            self.children
                .modify(&new_examination.person_id, |c| c.health_status = status)?;
        }
        self.create(new_examination).await
    }

    async fn update(&self, examination_update: ExaminationUpdate) -> Result<Examination> {
        let mut examinations = self.examinations.lock().unwrap();
        let id = examination_update.id.clone().unwrap_or_default();
        let existing = examinations
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| Error::not_found("Examination", id.clone()))?;
        existing.answers = examination_update.answers;
        existing.bmi = examination_update.bmi;
        existing.bmi_category = examination_update.bmi_category;
        existing.health_status = examination_update.health_status;
        existing.notes = examination_update.notes;
        Ok(existing.clone())
    }

    async fn delete(&self, examination_id: &str) -> Result<usize> {
        let mut examinations = self.examinations.lock().unwrap();
        let before = examinations.len();
        examinations.retain(|e| e.id != examination_id);
        Ok(before - examinations.len())
    }

    fn get_by_id(&self, examination_id: &str) -> Result<Examination> {
        self.examinations
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == examination_id)
            .cloned()
            .ok_or_else(|| Error::not_found("Examination", examination_id))
    }

    fn list(&self) -> Result<Vec<Examination>> {
        Ok(self.examinations.lock().unwrap().clone())
    }

    fn list_by_person(
        &self,
        person_id: &str,
        person_type: SubjectType,
    ) -> Result<Vec<Examination>> {
        Ok(self
            .examinations
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.person_id == person_id && e.person_type == person_type)
            .cloned()
            .collect())
    }
}

// --- Vaccinations ---

#[derive(Clone, Default)]
pub struct MockVaccinationRepository {
    pub vaccinations: Arc<Mutex<Vec<Vaccination>>>,
}

#[async_trait]
impl VaccinationRepositoryTrait for MockVaccinationRepository {
    async fn create(&self, new_vaccination: NewVaccination) -> Result<Vaccination> {
        let mut vaccinations = self.vaccinations.lock().unwrap();
        if vaccinations
            .iter()
            .any(|v| v.child_id == new_vaccination.child_id)
        {
            return Err(Error::Database(crate::errors::DatabaseError::UniqueViolation(
                "vaccinations.child_id".to_string(),
            )));
        }
        let progress = new_vaccination.progress();
        let created = Vaccination {
            id: new_vaccination
                .id
                .unwrap_or_else(|| next_id("vacc", vaccinations.len())),
            child_id: new_vaccination.child_id,
            checklist: new_vaccination.checklist,
            total_vaccines: new_vaccination.total_vaccines,
            completed_vaccines: progress.completed,
            progress_percentage: progress.percentage,
            last_updated: now(),
            created_at: now(),
            updated_at: now(),
        };
        vaccinations.push(created.clone());
        Ok(created)
    }

    async fn update(&self, vaccination: Vaccination) -> Result<Vaccination> {
        let mut vaccinations = self.vaccinations.lock().unwrap();
        let existing = vaccinations
            .iter_mut()
            .find(|v| v.id == vaccination.id)
            .ok_or_else(|| Error::not_found("Vaccination", vaccination.id.clone()))?;
        *existing = vaccination;
        Ok(existing.clone())
    }

    async fn delete(&self, vaccination_id: &str) -> Result<usize> {
        let mut vaccinations = self.vaccinations.lock().unwrap();
        let before = vaccinations.len();
        vaccinations.retain(|v| v.id != vaccination_id);
        Ok(before - vaccinations.len())
    }

    fn get_by_id(&self, vaccination_id: &str) -> Result<Vaccination> {
        self.vaccinations
            .lock()
            .unwrap()
            .iter()
            .find(|v| v.id == vaccination_id)
            .cloned()
            .ok_or_else(|| Error::not_found("Vaccination", vaccination_id))
    }

    fn get_by_child(&self, child_id: &str) -> Result<Option<Vaccination>> {
        Ok(self
            .vaccinations
            .lock()
            .unwrap()
            .iter()
            .find(|v| v.child_id == child_id)
            .cloned())
    }
}

// --- Screenings ---

#[derive(Clone, Default)]
pub struct MockScreeningRepository {
    pub screenings: Arc<Mutex<Vec<Screening>>>,
    /// Receives the condition snapshot of child screenings.
    pub children: MockChildRepository,
}

impl MockScreeningRepository {
    pub fn linked(children: MockChildRepository) -> Self {
        Self {
            children,
            ..Self::default()
        }
    }
}

#[async_trait]
impl ScreeningRepositoryTrait for MockScreeningRepository {
    async fn create(&self, new_screening: NewScreening) -> Result<Screening> {
        let mut screenings = self.screenings.lock().unwrap();
        let created = Screening {
            id: new_screening
                .id
                .unwrap_or_else(|| next_id("screening", screenings.len())),
            person_id: new_screening.person_id,
            person_type: new_screening.person_type,
            image_url: new_screening.image_url,
            analysis_results: new_screening.analysis_results,
            analysis_type: new_screening.analysis_type,
            condition: new_screening.condition,
            notes: new_screening.notes,
            risk_level: new_screening.risk_level,
            created_at: now(),
            updated_at: now(),
        };
        screenings.push(created.clone());
        Ok(created)
    }

    async fn create_batch(
        &self,
        records: Vec<NewScreening>,
        child_conditions: Option<ChildConditionsUpdate>,
    ) -> Result<Vec<Screening>> {
        if let Some(update) = child_conditions {
            self.children.modify(&update.child_id, |c| {
                if update.skin_condition.is_some() {
                    c.skin_condition = update.skin_condition;
                }
                if update.posture_condition.is_some() {
                    c.posture_condition = update.posture_condition;
                }
                c.last_screening = Some(update.screened_on);
            })?;
        }
        let mut saved = Vec::with_capacity(records.len());
        for record in records {
            saved.push(self.create(record).await?);
        }
        Ok(saved)
    }

    async fn update(&self, screening_update: ScreeningUpdate) -> Result<Screening> {
        let mut screenings = self.screenings.lock().unwrap();
        let id = screening_update.id.clone().unwrap_or_default();
        let existing = screenings
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| Error::not_found("Screening", id.clone()))?;
        existing.condition = screening_update.condition;
        existing.notes = screening_update.notes;
        existing.risk_level = screening_update.risk_level;
        Ok(existing.clone())
    }

    async fn delete(&self, screening_id: &str) -> Result<usize> {
        let mut screenings = self.screenings.lock().unwrap();
        let before = screenings.len();
        screenings.retain(|s| s.id != screening_id);
        Ok(before - screenings.len())
    }

    fn get_by_id(&self, screening_id: &str) -> Result<Screening> {
        self.screenings
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == screening_id)
            .cloned()
            .ok_or_else(|| Error::not_found("Screening", screening_id))
    }

    fn list(&self) -> Result<Vec<Screening>> {
        Ok(self.screenings.lock().unwrap().clone())
    }

    fn list_by_person(&self, person_id: &str, person_type: SubjectType) -> Result<Vec<Screening>> {
        Ok(self
            .screenings
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.person_id == person_id && s.person_type == person_type)
            .cloned()
            .collect())
    }

    fn count(&self) -> Result<usize> {
        Ok(self.screenings.lock().unwrap().len())
    }

    fn count_created_since(&self, since: NaiveDateTime) -> Result<usize> {
        Ok(self
            .screenings
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.created_at >= since)
            .count())
    }
}

// --- Image analysis ---

/// Returns canned replies and records which endpoints were called.
#[derive(Clone, Default)]
pub struct MockAnalyzer {
    pub skin: SkinAssessment,
    pub posture: PostureAnalysis,
    pub readings: MedicalReadings,
    pub fail_posture: bool,
    pub calls: Arc<Mutex<Vec<&'static str>>>,
}

#[async_trait]
impl ImageAnalyzerTrait for MockAnalyzer {
    async fn assess_skin(&self, _image: &ImageUpload) -> Result<SkinAssessment> {
        self.calls.lock().unwrap().push("assess-skin");
        Ok(self.skin.clone())
    }

    async fn analyze_posture(&self, _image: &ImageUpload) -> Result<PostureAnalysis> {
        self.calls.lock().unwrap().push("analyze-posture");
        if self.fail_posture {
            return Err(Error::Analysis("posture service returned 502".to_string()));
        }
        Ok(self.posture.clone())
    }

    async fn extract_medical_readings(&self, _image: &ImageUpload) -> Result<MedicalReadings> {
        self.calls.lock().unwrap().push("extract-medical-readings");
        Ok(self.readings.clone())
    }
}
