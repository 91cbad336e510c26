// SPDX-License-Identifier: MPL-2.0

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Tracker server URL (e.g., http://localhost:8080)
    pub server_url: String,
    /// Authentication token for the tracker server
    pub auth_token: String,
    /// Authentication header type: "authorization" (Bearer) or "x-api-key"
    pub auth_header_type: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: String::from("http://localhost:8080"),
            auth_token: String::new(),
            auth_header_type: String::from("authorization"),
        }
    }
}
