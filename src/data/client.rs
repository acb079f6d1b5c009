//! Blocking HTTP client for the scoring service.
//!
//! One request per call, no retries. Transport errors, non-2xx statuses and
//! undecodable bodies all surface as exit-code-4 `AppError`s.

use log::{debug, info};
use reqwest::blocking::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::data::wire::{
    AssetRecommendationRequest, AssetRecommendationResponse, CreditScoreRequest,
    CreditScoreResponse, FinancialHealthResponse,
};
use crate::error::AppError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";
pub const BASE_URL_ENV: &str = "SCOUT_API_BASE_URL";

const CREDIT_SCORE_PATH: &str = "credit/score";
const FINANCIAL_HEALTH_PATH: &str = "financial-health/score";
const ASSET_RECOMMENDATION_PATH: &str = "asset-management/recommendation";

pub struct ScoringClient {
    client: Client,
    base_url: String,
}

impl ScoringClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Resolve the base URL: explicit override, then `SCOUT_API_BASE_URL`
    /// (after loading `.env`), then the local default.
    pub fn from_env(override_url: Option<&str>) -> Self {
        dotenvy::dotenv().ok();
        let base_url = match override_url {
            Some(url) => url.to_string(),
            None => std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        };
        info!("scoring service at {base_url}");
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credit_score(&self, req: &CreditScoreRequest) -> Result<CreditScoreResponse, AppError> {
        self.post(CREDIT_SCORE_PATH, req, "credit score")
    }

    pub fn financial_health(
        &self,
        req: &CreditScoreRequest,
    ) -> Result<FinancialHealthResponse, AppError> {
        self.post(FINANCIAL_HEALTH_PATH, req, "financial health")
    }

    pub fn asset_recommendation(
        &self,
        req: &AssetRecommendationRequest,
    ) -> Result<AssetRecommendationResponse, AppError> {
        self.post(ASSET_RECOMMENDATION_PATH, req, "asset recommendation")
    }

    fn post<Req, Resp>(&self, path: &str, body: &Req, what: &str) -> Result<Resp, AppError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let url = endpoint_url(&self.base_url, path);
        debug!("POST {url}");

        let resp = self
            .client
            .post(&url)
            .json(body)
            .send()
            .map_err(|e| AppError::new(4, format!("Failed to fetch {what}: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::new(
                4,
                format!("Failed to fetch {what}: service returned status {}.", resp.status()),
            ));
        }

        resp.json()
            .map_err(|e| AppError::new(4, format!("Failed to parse {what} response: {e}")))
    }
}

fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_url_joins_cleanly() {
        assert_eq!(
            endpoint_url("http://localhost:8000/api/", CREDIT_SCORE_PATH),
            "http://localhost:8000/api/credit/score"
        );
        assert_eq!(
            endpoint_url("http://h/api", "/asset-management/recommendation"),
            "http://h/api/asset-management/recommendation"
        );
    }

    #[test]
    fn override_wins_over_environment() {
        let client = ScoringClient::from_env(Some("http://scoring.internal/api"));
        assert_eq!(client.base_url(), "http://scoring.internal/api");
    }
}
