//! # HTTP Gateway
//!
//! `reqwest` implementation of the auth, report and match outbound ports
//! against the matching backend's JSON API.
//!
//! Every request carries a fresh `X-Request-Id` so backend logs can be
//! correlated with client logs. Error bodies follow the `{"detail": ...}`
//! convention; `detail` is either a message or a list of validation entries.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

use crate::container::ApiConfig;
use shared_types::{AuthToken, GatewayError, MatchDetail, SubmissionId, UserProfile};
use tc_01_session::{AccountDetails, AuthGateway, AuthGrant};
use tc_02_report_submission::{Report, ReportGateway, SubmitReportResponse};
use tc_03_match_lifecycle::{MatchGateway, MatchStatusReport};

const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Backend client implementing every outbound gateway port.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct MessageReply {
    #[serde(default)]
    message: String,
}

impl HttpGateway {
    /// Build a client with the configured timeouts.
    pub fn new(config: &ApiConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request_id = Uuid::new_v4().to_string();
        debug!("[http] {} {} ({})", method, path, request_id);
        self.client
            .request(method, self.url(path))
            .header(REQUEST_ID_HEADER, request_id)
    }

    fn authorized(&self, method: Method, path: &str, token: &AuthToken) -> RequestBuilder {
        self.request(method, path).bearer_auth(token.as_str())
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, GatewayError> {
        let response = request.send().await.map_err(transport_error)?;
        let response = check_status(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| GatewayError::MalformedResponse(e.to_string()))
    }

    /// Send and ignore the body of a successful reply.
    async fn send_ack(&self, request: RequestBuilder) -> Result<(), GatewayError> {
        let response = request.send().await.map_err(transport_error)?;
        check_status(response).await.map(|_| ())
    }
}

fn transport_error(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        GatewayError::Transport(format!("request timed out: {}", err))
    } else {
        GatewayError::Transport(err.to_string())
    }
}

async fn check_status(response: Response) -> Result<Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(error_from_body(status, &body))
}

/// Turn an error reply into a gateway error, preferring the backend's `detail`.
pub(crate) fn error_from_body(status: StatusCode, body: &str) -> GatewayError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("detail").map(detail_message))
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
        });

    match status {
        StatusCode::UNAUTHORIZED => GatewayError::Unauthorized(message),
        StatusCode::NOT_FOUND => GatewayError::NotFound(message),
        _ => GatewayError::Rejected(message),
    }
}

fn detail_message(detail: &Value) -> String {
    match detail {
        Value::String(s) => s.clone(),
        Value::Array(entries) => entries
            .iter()
            .map(|entry| match entry.get("msg").and_then(Value::as_str) {
                Some(msg) => msg.to_string(),
                None => entry.to_string(),
            })
            .collect::<Vec<_>>()
            .join("; "),
        other => other.to_string(),
    }
}

/// Multipart form for `POST /api/report`.
fn report_form(report: &Report) -> Result<Form, GatewayError> {
    let reporter = report.reporter();
    let child = report.child();
    let photo = Part::bytes(child.photo.bytes.clone())
        .file_name(child.photo.file_name.clone())
        .mime_str(&child.photo.content_type)
        .map_err(|e| GatewayError::Rejected(format!("invalid photo content type: {}", e)))?;

    Ok(Form::new()
        .text("role", report.role().as_str())
        .text("reporter_name", reporter.name.clone())
        .text("reporter_email", reporter.email.clone())
        .text("reporter_alt_email", reporter.alt_email.clone())
        .text("reporter_phone", reporter.phone.clone())
        .text("reporter_alt_phone", reporter.alt_phone.clone())
        .text("child_name", child.name.clone())
        .text("child_age", child.approx_age.to_string())
        .text("skin_complexion", child.skin_complexion.clone())
        .text("city", child.city.clone())
        .text("address", report.address().to_string())
        .text("birthmarks", report.birthmarks_json())
        .part("file", photo))
}

// =============================================================================
// AUTH
// =============================================================================

#[async_trait]
impl AuthGateway for HttpGateway {
    async fn login(&self, identifier: &str, password: &str) -> Result<AuthGrant, GatewayError> {
        let body = json!({ "identifier": identifier, "password": password });
        self.send(self.request(Method::POST, "/api/auth/login").json(&body))
            .await
    }

    async fn signup(
        &self,
        account: &AccountDetails,
        password: &str,
    ) -> Result<AuthGrant, GatewayError> {
        let body = json!({
            "username": account.username,
            "email": account.email,
            "phone": account.phone,
            "password": password,
        });
        self.send(self.request(Method::POST, "/api/auth/signup").json(&body))
            .await
    }

    async fn update_profile(
        &self,
        token: &AuthToken,
        update: &AccountDetails,
    ) -> Result<UserProfile, GatewayError> {
        self.send(
            self.authorized(Method::PUT, "/api/auth/me", token)
                .json(update),
        )
        .await
    }

    async fn change_password(
        &self,
        token: &AuthToken,
        old_password: &str,
        new_password: &str,
    ) -> Result<String, GatewayError> {
        let body = json!({ "old_password": old_password, "new_password": new_password });
        let reply: MessageReply = self
            .send(
                self.authorized(Method::POST, "/api/auth/me/password", token)
                    .json(&body),
            )
            .await?;
        Ok(reply.message)
    }
}

// =============================================================================
// REPORTS
// =============================================================================

#[async_trait]
impl ReportGateway for HttpGateway {
    async fn submit_report(
        &self,
        token: &AuthToken,
        report: &Report,
    ) -> Result<SubmitReportResponse, GatewayError> {
        let form = report_form(report)?;
        self.send(
            self.authorized(Method::POST, "/api/report", token)
                .multipart(form),
        )
        .await
    }
}

// =============================================================================
// MATCHES
// =============================================================================

#[async_trait]
impl MatchGateway for HttpGateway {
    async fn fetch_match_detail(
        &self,
        submission_id: &SubmissionId,
    ) -> Result<MatchDetail, GatewayError> {
        let path = format!("/api/match/{}", submission_id.as_str());
        self.send(self.request(Method::GET, &path)).await
    }

    async fn fetch_match_status(
        &self,
        token: &AuthToken,
    ) -> Result<MatchStatusReport, GatewayError> {
        self.send(self.authorized(Method::GET, "/api/auth/me/status", token))
            .await
    }

    async fn confirm_match(&self, submission_id: &SubmissionId) -> Result<(), GatewayError> {
        let body = json!({ "submission_id": submission_id });
        self.send_ack(self.request(Method::POST, "/api/confirm").json(&body))
            .await
    }

    async fn reject_match(&self, submission_id: &SubmissionId) -> Result<(), GatewayError> {
        let body = json!({ "submission_id": submission_id });
        self.send_ack(self.request(Method::POST, "/api/reject").json(&body))
            .await
    }
}
