// SPDX-License-Identifier: MPL-2.0

//! Async helper functions for the Fieldmark application.
//! These functions handle tracker backend API interactions.

use crate::api::{
    ActivityBudget, Attachment, BudgetRequest, Checklist, ChecklistUpdate, NewBudgetRequest,
    NewChecklist, Notification, ResultNode, TrackerClient,
};
use crate::widgets::location_select::LocationNode;
use chrono::{DateTime, Utc};

/// Helper to create a client for the configured server
pub fn create_client(url: &str, token: &str, auth_header_type: &str) -> Result<TrackerClient, String> {
    TrackerClient::new(url, token, auth_header_type).map_err(|e| e.to_string())
}

/// Test connection to the tracker server
pub async fn test_connection(url: &str, token: &str, auth_header_type: &str) -> Result<(), String> {
    let client = create_client(url, token, auth_header_type)?;
    client.ping().await.map_err(|e| e.to_string())
}

/// Fetch the full location catalog
pub async fn fetch_locations(
    url: &str,
    token: &str,
    auth_header_type: &str,
) -> Result<Vec<LocationNode>, String> {
    let client = create_client(url, token, auth_header_type)?;
    client.list_locations().await.map_err(|e| e.to_string())
}

/// Fetch the budget summary for an activity
pub async fn fetch_activity_budget(
    url: &str,
    token: &str,
    auth_header_type: &str,
    activity_id: i64,
) -> Result<ActivityBudget, String> {
    let client = create_client(url, token, auth_header_type)?;
    client.get_activity_budget(activity_id).await.map_err(|e| e.to_string())
}

/// Fetch the budget requests raised against an activity
pub async fn fetch_budget_requests(
    url: &str,
    token: &str,
    auth_header_type: &str,
    activity_id: i64,
) -> Result<Vec<BudgetRequest>, String> {
    let client = create_client(url, token, auth_header_type)?;
    client.list_budget_requests(activity_id).await.map_err(|e| e.to_string())
}

/// Submit a new budget request
pub async fn submit_budget_request(
    url: &str,
    token: &str,
    auth_header_type: &str,
    request: NewBudgetRequest,
) -> Result<BudgetRequest, String> {
    let client = create_client(url, token, auth_header_type)?;
    client.create_budget_request(&request).await.map_err(|e| e.to_string())
}

/// Fetch the checklist entries of an activity
pub async fn fetch_checklists(
    url: &str,
    token: &str,
    auth_header_type: &str,
    activity_id: i64,
) -> Result<Vec<Checklist>, String> {
    let client = create_client(url, token, auth_header_type)?;
    client.list_checklists(activity_id).await.map_err(|e| e.to_string())
}

/// Add a checklist entry to an activity
pub async fn add_checklist(
    url: &str,
    token: &str,
    auth_header_type: &str,
    activity_id: i64,
    title: String,
) -> Result<Checklist, String> {
    let client = create_client(url, token, auth_header_type)?;
    let checklist = NewChecklist { activity_id, title };
    client.create_checklist(&checklist).await.map_err(|e| e.to_string())
}

/// Toggle the done flag of a checklist entry
pub async fn set_checklist_done(
    url: &str,
    token: &str,
    auth_header_type: &str,
    id: i64,
    done: bool,
) -> Result<Checklist, String> {
    let client = create_client(url, token, auth_header_type)?;
    let update = ChecklistUpdate {
        done: Some(done),
        ..Default::default()
    };
    client.update_checklist(id, &update).await.map_err(|e| e.to_string())
}

/// Delete a checklist entry
pub async fn remove_checklist(
    url: &str,
    token: &str,
    auth_header_type: &str,
    id: i64,
) -> Result<(), String> {
    let client = create_client(url, token, auth_header_type)?;
    client.delete_checklist(id).await.map_err(|e| e.to_string())
}

/// Fetch the evidence attachments of a checklist entry
pub async fn fetch_attachments(
    url: &str,
    token: &str,
    auth_header_type: &str,
    checklist_id: i64,
) -> Result<Vec<Attachment>, String> {
    let client = create_client(url, token, auth_header_type)?;
    client.list_attachments(checklist_id).await.map_err(|e| e.to_string())
}

/// Fetch notification feed entries, optionally only those newer than `since`
pub async fn fetch_notifications(
    url: &str,
    token: &str,
    auth_header_type: &str,
    since: Option<DateTime<Utc>>,
) -> Result<Vec<Notification>, String> {
    let client = create_client(url, token, auth_header_type)?;
    client.list_notifications(since).await.map_err(|e| e.to_string())
}

/// Fetch the results chain of a project
pub async fn fetch_results_chain(
    url: &str,
    token: &str,
    auth_header_type: &str,
    project_id: i64,
) -> Result<Vec<ResultNode>, String> {
    let client = create_client(url, token, auth_header_type)?;
    client.get_results_chain(project_id).await.map_err(|e| e.to_string())
}

/// Fetch the budget summary and checklist of an activity in one round
pub async fn fetch_activity_overview(
    url: &str,
    token: &str,
    auth_header_type: &str,
    activity_id: i64,
) -> Result<(ActivityBudget, Vec<Checklist>), String> {
    let client = create_client(url, token, auth_header_type)?;
    futures_util::try_join!(
        client.get_activity_budget(activity_id),
        client.list_checklists(activity_id),
    )
    .map_err(|e| e.to_string())
}
