// SPDX-License-Identifier: MPL-2.0

//! Messages consumed and events emitted by the location selector.

use super::catalog::{LocationId, LocationNode};
use super::level::AdminLevel;

/// Inputs to the selector's state machine.
///
/// A parent component wraps these in its own message type and routes them to
/// [`LocationSelect::update`](super::LocationSelect::update) from its update
/// function.
#[derive(Debug, Clone)]
pub enum SelectMessage {
    /// The one-shot catalog fetch finished.
    CatalogLoaded {
        /// The flat node list, or the fetch error rendered as text.
        result: Result<Vec<LocationNode>, String>,
    },

    /// The user picked (or cleared) the value at one level.
    LevelChanged {
        /// The level that changed.
        level: AdminLevel,
        /// The newly selected node id, or `None` when the field was cleared.
        id: Option<LocationId>,
    },

    /// The externally supplied value changed.
    ///
    /// Carries the leaf id the selection should be hydrated from. Hydration
    /// runs as soon as both this value and the catalog are available,
    /// whichever arrives last.
    InitialValue {
        /// The pre-selected leaf id, or `None` to start from an empty
        /// selection.
        value: Option<LocationId>,
    },
}

/// The committed-result callback payload.
///
/// Emitted only when a level change lands on the policy's `max_level`;
/// intermediate levels never produce one. `Cleared` makes invalidation
/// explicit: it fires when the max-level slot goes from set to empty, whether
/// the user cleared that field directly or a coarser change cascaded over a
/// committed choice.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectEvent {
    /// The selection reached the configured target depth.
    Committed {
        /// Id of the resolved node.
        id: LocationId,
        /// The full record of the resolved node.
        node: LocationNode,
    },
    /// A previously committed selection is no longer valid.
    Cleared,
}

impl SelectEvent {
    /// The selected id, `None` for a clear.
    pub fn id(&self) -> Option<LocationId> {
        match self {
            SelectEvent::Committed { id, .. } => Some(*id),
            SelectEvent::Cleared => None,
        }
    }

    /// The selected node record, `None` for a clear.
    pub fn node(&self) -> Option<&LocationNode> {
        match self {
            SelectEvent::Committed { node, .. } => Some(node),
            SelectEvent::Cleared => None,
        }
    }
}
