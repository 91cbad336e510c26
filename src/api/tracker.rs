// SPDX-License-Identifier: MPL-2.0

use crate::widgets::location_select::LocationNode;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Budget summary aggregated server-side for one activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityBudget {
    pub activity_id: i64,
    pub allocated: Decimal,
    pub spent: Decimal,
    pub balance: Decimal,
    #[serde(default)]
    pub currency: Option<String>,
}

/// Workflow state of a budget request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

/// A request for additional activity budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetRequest {
    pub id: i64,
    pub activity_id: i64,
    pub amount: Decimal,
    pub reason: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

/// Body for submitting a new budget request.
#[derive(Debug, Clone, Serialize)]
pub struct NewBudgetRequest {
    pub activity_id: i64,
    pub amount: Decimal,
    pub reason: String,
}

/// A checklist entry attached to an activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checklist {
    pub id: i64,
    pub activity_id: i64,
    pub title: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub remarks: Option<String>,
}

/// Body for creating a checklist entry.
#[derive(Debug, Clone, Serialize)]
pub struct NewChecklist {
    pub activity_id: i64,
    pub title: String,
}

/// Partial update for a checklist entry; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChecklistUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

/// An evidence file uploaded against a checklist entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: i64,
    pub checklist_id: i64,
    pub file_name: String,
    pub url: String,
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub metadata: Option<HashMap<String, serde_json::Value>>,
}

/// One entry of the notification/conversation feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    #[serde(default)]
    pub conversation_id: Option<i64>,
    pub body: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub read: bool,
}

/// Rank of a node in a project's results chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    Goal,
    Outcome,
    Output,
    Activity,
}

/// A node of the results chain, parent-referenced like the location catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultNode {
    pub id: i64,
    pub title: String,
    pub kind: ResultKind,
    #[serde(default)]
    pub parent_id: Option<i64>,
}

#[derive(Debug, Clone)]
pub enum ApiError {
    ConnectionFailed(String),
    RequestFailed(String),
    InvalidResponse(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            ApiError::RequestFailed(msg) => write!(f, "Request failed: {}", msg),
            ApiError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
        }
    }
}

/// Client for the tracker backend's REST API.
#[derive(Debug, Clone)]
pub struct TrackerClient {
    client: reqwest::Client,
    base_url: String,
}

impl TrackerClient {
    /// Create a new tracker client.
    /// auth_header_type: "authorization" for Bearer token, "x-api-key" for X-Api-Key header
    pub fn new(base_url: &str, auth_token: &str, auth_header_type: &str) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();

        if !auth_token.is_empty() {
            match auth_header_type {
                "x-api-key" => {
                    // Use X-Api-Key header (token without Bearer prefix)
                    let header_name = HeaderName::from_static("x-api-key");
                    let auth_value = HeaderValue::from_str(auth_token)
                        .map_err(|e| ApiError::ConnectionFailed(e.to_string()))?;
                    headers.insert(header_name, auth_value);
                }
                _ => {
                    // Default: Use Authorization: Bearer header
                    let auth_value = HeaderValue::from_str(&format!("Bearer {}", auth_token))
                        .map_err(|e| ApiError::ConnectionFailed(e.to_string()))?;
                    headers.insert(AUTHORIZATION, auth_value);
                }
            }
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::ConnectionFailed(e.to_string()))?;

        // Normalize base URL (remove trailing slash)
        let base_url = base_url.trim_end_matches('/').to_string();
        debug!(base_url = %base_url, "tracker client ready");

        Ok(Self { client, base_url })
    }

    fn api_prefix(&self) -> String {
        format!("{}/api", self.base_url)
    }

    /// Check server health
    pub async fn ping(&self) -> Result<(), ApiError> {
        let url = format!("{}/health", self.api_prefix());

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::ConnectionFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ApiError::RequestFailed(format!(
                "Server returned status: {}",
                response.status()
            )));
        }

        Ok(())
    }

    /// Fetch the entire location catalog in one shot
    pub async fn list_locations(&self) -> Result<Vec<LocationNode>, ApiError> {
        let url = format!("{}/locations", self.api_prefix());

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::ConnectionFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::RequestFailed(format!(
                "Failed to list locations: {} - {}",
                status, body
            )));
        }

        response
            .json::<Vec<LocationNode>>()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    /// Get the aggregated budget summary for an activity
    pub async fn get_activity_budget(&self, activity_id: i64) -> Result<ActivityBudget, ApiError> {
        let url = format!("{}/activities/{}/budget", self.api_prefix(), activity_id);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::ConnectionFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::RequestFailed(format!(
                "Failed to get budget for activity {}: {} - {}",
                activity_id, status, body
            )));
        }

        response
            .json::<ActivityBudget>()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    /// List budget requests raised against an activity
    pub async fn list_budget_requests(
        &self,
        activity_id: i64,
    ) -> Result<Vec<BudgetRequest>, ApiError> {
        let url = format!(
            "{}/activities/{}/budget-requests",
            self.api_prefix(),
            activity_id
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::ConnectionFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::RequestFailed(format!(
                "Failed to list budget requests for activity {}: {} - {}",
                activity_id, status, body
            )));
        }

        response
            .json::<Vec<BudgetRequest>>()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    /// Submit a new budget request
    pub async fn create_budget_request(
        &self,
        request: &NewBudgetRequest,
    ) -> Result<BudgetRequest, ApiError> {
        let url = format!("{}/budget-requests", self.api_prefix());

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::ConnectionFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::RequestFailed(format!(
                "Failed to create budget request: {} - {}",
                status, body
            )));
        }

        response
            .json::<BudgetRequest>()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    /// List the checklist entries of an activity
    pub async fn list_checklists(&self, activity_id: i64) -> Result<Vec<Checklist>, ApiError> {
        let url = format!("{}/activities/{}/checklists", self.api_prefix(), activity_id);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::ConnectionFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::RequestFailed(format!(
                "Failed to list checklists for activity {}: {} - {}",
                activity_id, status, body
            )));
        }

        response
            .json::<Vec<Checklist>>()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    /// Create a new checklist entry
    pub async fn create_checklist(&self, checklist: &NewChecklist) -> Result<Checklist, ApiError> {
        let url = format!("{}/checklists", self.api_prefix());

        let response = self
            .client
            .post(&url)
            .json(checklist)
            .send()
            .await
            .map_err(|e| ApiError::ConnectionFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::RequestFailed(format!(
                "Failed to create checklist: {} - {}",
                status, body
            )));
        }

        response
            .json::<Checklist>()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    /// Apply a partial update to a checklist entry
    pub async fn update_checklist(
        &self,
        id: i64,
        update: &ChecklistUpdate,
    ) -> Result<Checklist, ApiError> {
        let url = format!("{}/checklists/{}", self.api_prefix(), id);

        let response = self
            .client
            .put(&url)
            .json(update)
            .send()
            .await
            .map_err(|e| ApiError::ConnectionFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::RequestFailed(format!(
                "Failed to update checklist {}: {} - {}",
                id, status, body
            )));
        }

        response
            .json::<Checklist>()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    /// Delete a checklist entry
    pub async fn delete_checklist(&self, id: i64) -> Result<(), ApiError> {
        let url = format!("{}/checklists/{}", self.api_prefix(), id);

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| ApiError::ConnectionFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::RequestFailed(format!(
                "Failed to delete checklist {}: {} - {}",
                id, status, body
            )));
        }

        Ok(())
    }

    /// List the evidence attachments of a checklist entry
    pub async fn list_attachments(&self, checklist_id: i64) -> Result<Vec<Attachment>, ApiError> {
        let url = format!(
            "{}/checklists/{}/attachments",
            self.api_prefix(),
            checklist_id
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::ConnectionFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::RequestFailed(format!(
                "Failed to list attachments for checklist {}: {} - {}",
                checklist_id, status, body
            )));
        }

        response
            .json::<Vec<Attachment>>()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    /// Fetch a page of the notification feed, optionally only entries newer
    /// than `since`
    pub async fn list_notifications(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<Notification>, ApiError> {
        let url = match since {
            Some(since) => format!(
                "{}/notifications?since={}",
                self.api_prefix(),
                since.to_rfc3339_opts(SecondsFormat::Secs, true)
            ),
            None => format!("{}/notifications", self.api_prefix()),
        };

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::ConnectionFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::RequestFailed(format!(
                "Failed to list notifications: {} - {}",
                status, body
            )));
        }

        response
            .json::<Vec<Notification>>()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    /// Fetch the results chain of a project as a flat parent-referenced list
    pub async fn get_results_chain(&self, project_id: i64) -> Result<Vec<ResultNode>, ApiError> {
        let url = format!("{}/projects/{}/results-chain", self.api_prefix(), project_id);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::ConnectionFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::RequestFailed(format!(
                "Failed to get results chain for project {}: {} - {}",
                project_id, status, body
            )));
        }

        response
            .json::<Vec<ResultNode>>()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }
}
