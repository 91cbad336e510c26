// SPDX-License-Identifier: MPL-2.0

//! Cascading selector for the five-level administrative-location hierarchy.
//!
//! The catalog endpoint serves every location as a flat list of nodes that
//! carry only a parent reference. This widget core rebuilds the
//! country -> county -> sub_county -> ward -> parish structure from that list,
//! resolves the full ancestor chain for a pre-selected leaf, and drives a
//! progressive-disclosure selection flow: picking a value at one level
//! reveals its children at the next, down to a configurable target depth.
//!
//! The module is rendering-agnostic. A shell owns a [`LocationSelect`],
//! routes [`SelectMessage`]s into it from its update function, and draws one
//! dropdown per [`AdminLevel`] the selector reports as visible.
//!
//! # Example
//!
//! ```
//! use fieldmark::widgets::location_select::{
//!     AdminLevel, LocationNode, LocationSelect, SelectEvent, SelectMessage, SelectionPolicy,
//! };
//!
//! let mut select = LocationSelect::new(SelectionPolicy {
//!     max_level: AdminLevel::SubCounty,
//!     ..SelectionPolicy::default()
//! });
//!
//! // The shell fetched the catalog (see `helpers::fetch_locations`).
//! select.update(SelectMessage::CatalogLoaded {
//!     result: Ok(vec![
//!         LocationNode::new(1, "Kenya", AdminLevel::Country, None),
//!         LocationNode::new(2, "Nairobi", AdminLevel::County, Some(1)),
//!         LocationNode::new(3, "Westlands", AdminLevel::SubCounty, Some(2)),
//!     ]),
//! });
//!
//! // User picks country and county; nothing is committed yet.
//! select.update(SelectMessage::LevelChanged { level: AdminLevel::Country, id: Some(1) });
//! select.update(SelectMessage::LevelChanged { level: AdminLevel::County, id: Some(2) });
//!
//! // Reaching the target level surfaces the resolved node.
//! let event = select.update(SelectMessage::LevelChanged {
//!     level: AdminLevel::SubCounty,
//!     id: Some(3),
//! });
//! assert!(matches!(event, Some(SelectEvent::Committed { id: 3, .. })));
//! ```

mod ancestry;
mod catalog;
mod level;
mod message;
mod state;

pub use ancestry::{resolve, ResolveError};
pub use catalog::{LocationCatalog, LocationId, LocationNode};
pub use level::AdminLevel;
pub use message::{SelectEvent, SelectMessage};
pub use state::{CatalogState, LocationSelect, SelectionPolicy, SelectionState};
