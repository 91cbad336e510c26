// SPDX-License-Identifier: MPL-2.0

//! Core building blocks for the Fieldmark activity tracker.
//!
//! The crate is split into the tracker backend client ([`api`]), async
//! task helpers ([`helpers`]), application configuration ([`config`]),
//! and reusable widget cores ([`widgets`]) such as the administrative
//! location selector.

pub mod api;
pub mod config;
pub mod helpers;
pub mod widgets;

pub use api::{ApiError, TrackerClient};
pub use config::Config;
