// SPDX-License-Identifier: MPL-2.0

//! HTTP client for the tracker backend API.

mod tracker;

pub use tracker::{
    ActivityBudget, ApiError, Attachment, BudgetRequest, Checklist, ChecklistUpdate,
    NewBudgetRequest, NewChecklist, Notification, RequestStatus, ResultKind, ResultNode,
    TrackerClient,
};
