// SPDX-License-Identifier: MPL-2.0

//! The immutable location catalog and its level-filtered lookups.

use super::level::AdminLevel;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identifier of a location node, stable for the lifetime of a session.
pub type LocationId = i64;

/// A single administrative location as served by the catalog endpoint.
///
/// `parent_id` is a back-reference only: it names the immediate ancestor but
/// never owns it. Root-level (`country`) nodes carry no parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationNode {
    /// Unique identifier for this location.
    pub id: LocationId,
    /// Display label for the location.
    pub name: String,
    /// The rank of this location in the hierarchy.
    #[serde(rename = "type")]
    pub level: AdminLevel,
    /// Identifier of the immediate ancestor, absent for the root level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<LocationId>,
}

impl LocationNode {
    /// Creates a new location node.
    pub fn new(
        id: LocationId,
        name: impl Into<String>,
        level: AdminLevel,
        parent_id: Option<LocationId>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            level,
            parent_id,
        }
    }
}

/// An immutable snapshot of every location node for the current session.
///
/// Loaded exactly once per selector session. The nodes live in a flat arena
/// kept in fetch order, with an id index on the side; an ancestor is found by
/// index lookup, never by following a reference into a linked structure.
///
/// An empty catalog means the data has not arrived yet, not that no locations
/// exist.
#[derive(Debug, Clone, Default)]
pub struct LocationCatalog {
    nodes: Vec<LocationNode>,
    index: HashMap<LocationId, usize>,
}

impl LocationCatalog {
    /// Builds a catalog from the flat node list returned by the server.
    ///
    /// Insertion order is preserved; it is the order level filters report
    /// their results in.
    pub fn from_nodes(nodes: Vec<LocationNode>) -> Self {
        let index = nodes
            .iter()
            .enumerate()
            .map(|(position, node)| (node.id, position))
            .collect();
        Self { nodes, index }
    }

    /// Every node in the catalog, in fetch order.
    pub fn all(&self) -> &[LocationNode] {
        &self.nodes
    }

    /// Looks up a node by id.
    pub fn by_id(&self, id: LocationId) -> Option<&LocationNode> {
        self.index.get(&id).map(|&position| &self.nodes[position])
    }

    /// Nodes at `level` whose parent is `parent`, in catalog order.
    ///
    /// The root level has no parents, so `parent` is ignored there and every
    /// root node is returned. No sorting is applied; callers wanting an
    /// alphabetical display sort themselves.
    pub fn children_of(
        &self,
        level: AdminLevel,
        parent: Option<LocationId>,
    ) -> Vec<&LocationNode> {
        self.nodes
            .iter()
            .filter(|node| {
                node.level == level && (level.is_root() || node.parent_id == parent)
            })
            .collect()
    }

    /// Number of nodes in the catalog.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the catalog holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
