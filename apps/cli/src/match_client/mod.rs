/// Match client — the single point of entry for all job-match API calls.
///
/// ARCHITECTURAL RULE: No other module may talk to the backend directly.
/// All HTTP interactions MUST go through this module.
///
/// The backend historically exposed several slightly different contracts;
/// this client speaks exactly one: JSON POST bodies against the two paths
/// below, with responses accepted in both known success shapes.
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::Job;

const SEARCH_PATH: &str = "/get_jobs";
const APPLY_PATH: &str = "/get_jobs/apply";

/// Shown when a 422 body carries no usable detail.
const DEFAULT_VALIDATION_DETAIL: &str =
    "The server couldn't process your request due to validation errors.";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Validation rejected: {detail}")]
    Validation { detail: String },

    #[error("Unexpected status: {status}")]
    Server { status: StatusCode },

    #[error("JSON parse error: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    github_username: &'a str,
    resume_id: &'a str,
}

#[derive(Debug, Serialize)]
struct ApplyRequest<'a> {
    link: &'a str,
}

/// The search endpoint has returned both a bare array and an object wrapping
/// the array under `jobs`. Both are accepted; anything else is a decode error.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SearchResponse {
    Wrapped { jobs: Vec<Job> },
    Bare(Vec<Job>),
}

impl SearchResponse {
    pub fn into_jobs(self) -> Vec<Job> {
        match self {
            SearchResponse::Wrapped { jobs } => jobs,
            SearchResponse::Bare(jobs) => jobs,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<ErrorDetail>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorDetail {
    Text(String),
    Fields(Vec<FieldError>),
}

#[derive(Debug, Deserialize)]
struct FieldError {
    #[serde(default)]
    loc: Vec<Value>,
    msg: String,
}

impl FieldError {
    /// Dotted field path; segments may be strings or array indices.
    fn location(&self) -> String {
        let joined = self
            .loc
            .iter()
            .map(|segment| match segment.as_str() {
                Some(s) => s.to_string(),
                None => segment.to_string(),
            })
            .collect::<Vec<_>>()
            .join(".");
        if joined.is_empty() {
            "body".to_string()
        } else {
            joined
        }
    }
}

/// Best-effort extraction of a human-readable detail from a 422 body.
/// Accepts `{"detail": "..."}`, `{"detail": [{"loc": [...], "msg": "..."}]}`,
/// and `{"message": "..."}`; anything else falls back to a generic message.
fn validation_detail(body: &str) -> String {
    let parsed = match serde_json::from_str::<ErrorBody>(body) {
        Ok(p) => p,
        Err(_) => return DEFAULT_VALIDATION_DETAIL.to_string(),
    };

    match parsed.detail {
        Some(ErrorDetail::Text(text)) if !text.trim().is_empty() => text,
        Some(ErrorDetail::Fields(fields)) if !fields.is_empty() => fields
            .iter()
            .map(|f| format!("{} - {}", f.location(), f.msg))
            .collect::<Vec<_>>()
            .join("; "),
        _ => parsed
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_VALIDATION_DETAIL.to_string()),
    }
}

/// Backend surface the workflow session depends on.
/// Production uses `MatchClient`; tests substitute a scripted board.
#[async_trait]
pub trait JobBoard: Send + Sync {
    /// Runs one job search for the given user and resume reference.
    /// Single-shot: no retry, no timeout beyond the platform default.
    async fn search(&self, github_username: &str, resume_id: &str)
        -> Result<Vec<Job>, ApiError>;

    /// Submits an application for one job.
    async fn apply(&self, job_id: &str) -> Result<(), ApiError>;
}

/// The single HTTP client used against the job-match backend.
#[derive(Clone)]
pub struct MatchClient {
    client: Client,
    base_url: String,
}

impl MatchClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Maps a non-success response to its error class, consuming the body.
    async fn classify_failure(response: reqwest::Response) -> ApiError {
        let status = response.status();
        if status == StatusCode::UNPROCESSABLE_ENTITY {
            let body = response.text().await.unwrap_or_default();
            warn!("Backend rejected request as invalid: {body}");
            ApiError::Validation {
                detail: validation_detail(&body),
            }
        } else {
            warn!("Backend returned {status}");
            ApiError::Server { status }
        }
    }
}

#[async_trait]
impl JobBoard for MatchClient {
    async fn search(
        &self,
        github_username: &str,
        resume_id: &str,
    ) -> Result<Vec<Job>, ApiError> {
        let request_body = SearchRequest {
            github_username,
            resume_id,
        };

        let response = self
            .client
            .post(self.endpoint(SEARCH_PATH))
            .header("accept", "application/json")
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::classify_failure(response).await);
        }

        let body = response.text().await?;
        let parsed: SearchResponse = serde_json::from_str(&body)?;
        let jobs = parsed.into_jobs();

        debug!("Search returned {} jobs", jobs.len());

        Ok(jobs)
    }

    async fn apply(&self, job_id: &str) -> Result<(), ApiError> {
        let request_body = ApplyRequest { link: job_id };

        let response = self
            .client
            .post(self.endpoint(APPLY_PATH))
            .header("accept", "application/json")
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::classify_failure(response).await);
        }

        debug!("Application submitted for job {job_id}");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── response shapes ──

    #[test]
    fn test_search_response_bare_array() {
        let json = r#"[{
            "id": "a", "title": "T", "company": "C",
            "location": "L", "description": "D"
        }]"#;
        let parsed: SearchResponse = serde_json::from_str(json).unwrap();
        let jobs = parsed.into_jobs();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].id, "a");
    }

    #[test]
    fn test_search_response_wrapped_object() {
        let json = r#"{"jobs": [{
            "id": "b", "title": "T", "company": "C",
            "location": "L", "description": "D"
        }]}"#;
        let parsed: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.into_jobs().len(), 1);
    }

    #[test]
    fn test_search_response_empty_variants() {
        let bare: SearchResponse = serde_json::from_str("[]").unwrap();
        assert!(bare.into_jobs().is_empty());

        let wrapped: SearchResponse = serde_json::from_str(r#"{"jobs": []}"#).unwrap();
        assert!(wrapped.into_jobs().is_empty());
    }

    #[test]
    fn test_search_response_rejects_unknown_shape() {
        // A shape we don't know must fail loudly, not read as "no results".
        assert!(serde_json::from_str::<SearchResponse>(r#"{"data": []}"#).is_err());
        assert!(serde_json::from_str::<SearchResponse>(r#""oops""#).is_err());
    }

    // ── validation detail extraction ──

    #[test]
    fn test_validation_detail_string() {
        let body = r#"{"detail": "bad username"}"#;
        assert_eq!(validation_detail(body), "bad username");
    }

    #[test]
    fn test_validation_detail_field_list() {
        let body = r#"{"detail": [
            {"loc": ["body", "github_username"], "msg": "field required"},
            {"loc": ["body", "resume_id"], "msg": "field required"}
        ]}"#;
        assert_eq!(
            validation_detail(body),
            "body.github_username - field required; body.resume_id - field required"
        );
    }

    #[test]
    fn test_validation_detail_empty_loc_renders_body() {
        let body = r#"{"detail": [{"loc": [], "msg": "invalid payload"}]}"#;
        assert_eq!(validation_detail(body), "body - invalid payload");
    }

    #[test]
    fn test_validation_detail_numeric_loc_segments() {
        let body = r#"{"detail": [{"loc": ["body", "skills", 0], "msg": "too short"}]}"#;
        assert_eq!(validation_detail(body), "body.skills.0 - too short");
    }

    #[test]
    fn test_validation_detail_message_fallback() {
        let body = r#"{"message": "username looks wrong"}"#;
        assert_eq!(validation_detail(body), "username looks wrong");
    }

    #[test]
    fn test_validation_detail_garbage_falls_back_to_generic() {
        assert_eq!(validation_detail("<html>nope</html>"), DEFAULT_VALIDATION_DETAIL);
        assert_eq!(validation_detail(""), DEFAULT_VALIDATION_DETAIL);
        assert_eq!(validation_detail("{}"), DEFAULT_VALIDATION_DETAIL);
        assert_eq!(
            validation_detail(r#"{"detail": []}"#),
            DEFAULT_VALIDATION_DETAIL
        );
    }

    // ── request wire shapes ──

    #[test]
    fn test_search_request_body_shape() {
        let body = SearchRequest {
            github_username: "octocat",
            resume_id: "resume text here",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "github_username": "octocat",
                "resume_id": "resume text here"
            })
        );
    }

    #[test]
    fn test_apply_request_body_shape() {
        let body = ApplyRequest { link: "job-42" };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "link": "job-42" }));
    }

    // ── url building ──

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = MatchClient::new("http://localhost:8080/");
        assert_eq!(
            client.endpoint(SEARCH_PATH),
            "http://localhost:8080/get_jobs"
        );
        assert_eq!(
            client.endpoint(APPLY_PATH),
            "http://localhost:8080/get_jobs/apply"
        );
    }
}
