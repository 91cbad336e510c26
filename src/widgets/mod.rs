// SPDX-License-Identifier: MPL-2.0

//! Reusable widget cores for the Fieldmark application.

pub mod location_select;

pub use location_select::{
    AdminLevel, CatalogState, LocationCatalog, LocationId, LocationNode, LocationSelect,
    ResolveError, SelectEvent, SelectMessage, SelectionPolicy, SelectionState,
};
