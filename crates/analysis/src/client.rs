use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::de::DeserializeOwned;

use babyassist_core::screenings::{
    ImageAnalyzerTrait, ImageUpload, MedicalReadings, PostureAnalysis, SkinAssessment,
};
use babyassist_core::Result;

use crate::errors::AnalysisError;

/// Default HTTP request timeout. Image analysis is slow.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const FILE_FIELD: &str = "file";
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    AssessSkin,
    AnalyzePosture,
    ExtractMedicalReadings,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::AssessSkin => "/assess-skin",
            Endpoint::AnalyzePosture => "/analyze-posture",
            Endpoint::ExtractMedicalReadings => "/extract-medical-readings",
        }
    }
}

/// Multipart client for the image-analysis service.
///
/// ```ignore
/// let client = AnalysisClient::new("http://localhost:8000", DEFAULT_TIMEOUT)?;
/// let skin = client.assess_skin(&image).await?;
/// ```
#[derive(Clone)]
pub struct AnalysisClient {
    client: Client,
    base_url: String,
}

impl AnalysisClient {
    pub fn new(base_url: &str, timeout: Duration) -> std::result::Result<Self, AnalysisError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(AnalysisError::InvalidUrl(base_url));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn form_for(endpoint: Endpoint, image: &ImageUpload) -> std::result::Result<Form, AnalysisError> {
        let content_type = image
            .content_type
            .as_deref()
            .unwrap_or(DEFAULT_CONTENT_TYPE);
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(content_type)
            .map_err(|e| AnalysisError::Request {
                endpoint: endpoint.path(),
                message: e.to_string(),
            })?;
        Ok(Form::new().part(FILE_FIELD, part))
    }

    /// Posts the image to `endpoint` and decodes the JSON reply.
    pub async fn post_image<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        image: &ImageUpload,
    ) -> std::result::Result<T, AnalysisError> {
        let name = endpoint.path();
        let url = format!("{}{}", self.base_url, name);
        debug!(
            "Sending {} ({} bytes) to {}",
            image.file_name,
            image.bytes.len(),
            url
        );

        let response = self
            .client
            .post(&url)
            .multipart(Self::form_for(endpoint, image)?)
            .send()
            .await
            .map_err(|e| AnalysisError::from_reqwest(name, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Analysis endpoint {} returned {}", name, status);
            return Err(AnalysisError::Status {
                endpoint: name,
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AnalysisError::from_reqwest(name, e))?;
        serde_json::from_slice(&bytes).map_err(|e| AnalysisError::Decode {
            endpoint: name,
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl ImageAnalyzerTrait for AnalysisClient {
    async fn assess_skin(&self, image: &ImageUpload) -> Result<SkinAssessment> {
        Ok(self.post_image(Endpoint::AssessSkin, image).await?)
    }

    async fn analyze_posture(&self, image: &ImageUpload) -> Result<PostureAnalysis> {
        Ok(self.post_image(Endpoint::AnalyzePosture, image).await?)
    }

    async fn extract_medical_readings(&self, image: &ImageUpload) -> Result<MedicalReadings> {
        Ok(self
            .post_image(Endpoint::ExtractMedicalReadings, image)
            .await?)
    }
}
