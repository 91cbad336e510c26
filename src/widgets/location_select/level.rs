// SPDX-License-Identifier: MPL-2.0

//! The five fixed ranks of the administrative-location hierarchy.

use serde::{Deserialize, Serialize};

/// A rank in the administrative-location hierarchy, coarsest first.
///
/// The five ranks form a strict total order: every location node sits exactly
/// one level below its parent, so the derived `Ord` mirrors tree depth
/// (`Country` is the root level, `Parish` the finest).
///
/// On the wire the rank travels as its snake_case name (`"sub_county"` etc.),
/// matching the catalog endpoint's `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminLevel {
    Country,
    County,
    SubCounty,
    Ward,
    Parish,
}

impl AdminLevel {
    /// Number of defined levels. Also bounds the ancestry walk.
    pub const COUNT: usize = 5;

    /// All levels in hierarchy order, coarsest first.
    pub const ALL: [AdminLevel; Self::COUNT] = [
        AdminLevel::Country,
        AdminLevel::County,
        AdminLevel::SubCounty,
        AdminLevel::Ward,
        AdminLevel::Parish,
    ];

    /// Zero-based depth of this level (`Country` is 0, `Parish` is 4).
    pub fn depth(self) -> usize {
        self as usize
    }

    /// The level at the given depth, if it exists.
    pub fn from_depth(depth: usize) -> Option<AdminLevel> {
        Self::ALL.get(depth).copied()
    }

    /// The immediately coarser level, or `None` for the root level.
    pub fn parent(self) -> Option<AdminLevel> {
        self.depth().checked_sub(1).and_then(Self::from_depth)
    }

    /// The immediately finer level, or `None` for the finest level.
    pub fn child(self) -> Option<AdminLevel> {
        Self::from_depth(self.depth() + 1)
    }

    /// Returns true for the root level (`Country`).
    pub fn is_root(self) -> bool {
        self == AdminLevel::Country
    }

    /// The snake_case name used on the wire and in configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            AdminLevel::Country => "country",
            AdminLevel::County => "county",
            AdminLevel::SubCounty => "sub_county",
            AdminLevel::Ward => "ward",
            AdminLevel::Parish => "parish",
        }
    }

    /// Parses a level from its snake_case name, e.g. from a configuration
    /// value. Returns `None` for anything that is not one of the five names.
    pub fn parse(name: &str) -> Option<AdminLevel> {
        Self::ALL.into_iter().find(|level| level.as_str() == name)
    }
}

impl std::fmt::Display for AdminLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_totally_ordered() {
        for pair in AdminLevel::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert!(AdminLevel::Country < AdminLevel::Parish);
    }

    #[test]
    fn test_depth_round_trips() {
        for level in AdminLevel::ALL {
            assert_eq!(AdminLevel::from_depth(level.depth()), Some(level));
        }
        assert_eq!(AdminLevel::from_depth(AdminLevel::COUNT), None);
    }

    #[test]
    fn test_parent_child_adjacency() {
        assert_eq!(AdminLevel::Country.parent(), None);
        assert_eq!(AdminLevel::Parish.child(), None);

        for level in AdminLevel::ALL {
            if let Some(child) = level.child() {
                assert_eq!(child.parent(), Some(level));
                assert_eq!(child.depth(), level.depth() + 1);
            }
        }
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(AdminLevel::SubCounty.as_str(), "sub_county");
        assert_eq!(
            serde_json::to_string(&AdminLevel::SubCounty).unwrap(),
            "\"sub_county\""
        );
        assert_eq!(AdminLevel::parse("ward"), Some(AdminLevel::Ward));
        assert_eq!(AdminLevel::parse("village"), None);
    }
}
