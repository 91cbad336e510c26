// SPDX-License-Identifier: MPL-2.0

//! State management for the cascading location selector.

use super::ancestry;
use super::catalog::{LocationCatalog, LocationId, LocationNode};
use super::level::AdminLevel;
use super::message::{SelectEvent, SelectMessage};
use tracing::{debug, warn};

/// Loading state for the one-shot catalog fetch.
#[derive(Debug, Clone, Default)]
pub enum CatalogState {
    /// Nothing fetched yet.
    #[default]
    NotLoaded,
    /// Fetch in flight; interaction is blocked until it resolves.
    Loading,
    /// Catalog available for the rest of the session.
    Loaded(LocationCatalog),
    /// Fetch failed; the selector stays empty and disabled.
    Error(String),
}

impl CatalogState {
    /// Returns true while the fetch is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, CatalogState::Loading)
    }

    /// Returns true once the catalog has been loaded.
    pub fn is_loaded(&self) -> bool {
        matches!(self, CatalogState::Loaded(_))
    }

    /// Returns true once a catalog with at least one node is available.
    ///
    /// A fetch that succeeds with zero nodes is indistinguishable from data
    /// that has not arrived yet, so it does not count as ready.
    pub fn is_ready(&self) -> bool {
        matches!(self, CatalogState::Loaded(catalog) if !catalog.is_empty())
    }

    /// Returns true if the fetch failed.
    pub fn is_error(&self) -> bool {
        matches!(self, CatalogState::Error(_))
    }

    /// The loaded catalog, if any.
    pub fn catalog(&self) -> Option<&LocationCatalog> {
        match self {
            CatalogState::Loaded(catalog) => Some(catalog),
            _ => None,
        }
    }

    /// The fetch error, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            CatalogState::Error(e) => Some(e),
            _ => None,
        }
    }
}

/// Caller-supplied behaviour of a selector instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionPolicy {
    /// The deepest level the caller wants resolved. Selecting at this level
    /// is what commits a result.
    pub max_level: AdminLevel,
    /// Whether the root level is offered at all, or the chain above the
    /// target is driven entirely by a pre-supplied value.
    pub show_all_levels: bool,
    /// Whether the target level must hold a value for the selection to count
    /// as complete.
    pub required: bool,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            max_level: AdminLevel::Parish,
            show_all_levels: true,
            required: false,
        }
    }
}

/// One optional selected id per level.
///
/// Kept consistent by construction: a set slot always has every coarser slot
/// set along the same parent chain, and mutation happens only through the
/// selector's transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionState {
    slots: [Option<LocationId>; AdminLevel::COUNT],
}

impl SelectionState {
    /// The selected id at `level`, if any.
    pub fn get(&self, level: AdminLevel) -> Option<LocationId> {
        self.slots[level.depth()]
    }

    /// Returns true when no level holds a selection.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// The finest set slot, if any.
    pub fn deepest(&self) -> Option<(AdminLevel, LocationId)> {
        AdminLevel::ALL
            .iter()
            .rev()
            .find_map(|&level| self.get(level).map(|id| (level, id)))
    }

    fn set(&mut self, level: AdminLevel, id: Option<LocationId>) {
        self.slots[level.depth()] = id;
    }

    fn clear_below(&mut self, level: AdminLevel) {
        for depth in level.depth() + 1..AdminLevel::COUNT {
            self.slots[depth] = None;
        }
    }
}

/// The cascading location selector.
///
/// Owns the per-level selection state and the catalog snapshot for one
/// selector session. All mutation flows through [`update`](Self::update) (or
/// the named transition methods it dispatches to); rendering shells read the
/// per-level accessors and never touch the state directly.
#[derive(Debug, Clone, Default)]
pub struct LocationSelect {
    policy: SelectionPolicy,
    catalog: CatalogState,
    selection: SelectionState,
    /// Externally supplied leaf id to hydrate from, remembered so hydration
    /// can run whenever the catalog arrives.
    initial: Option<LocationId>,
}

impl LocationSelect {
    /// Creates an empty selector with the given policy.
    pub fn new(policy: SelectionPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// The policy this selector was created with.
    pub fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    /// The catalog fetch state.
    pub fn catalog_state(&self) -> &CatalogState {
        &self.catalog
    }

    /// Returns true while the catalog fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.catalog.is_loading()
    }

    /// The current per-level selection.
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Routes a message to the matching transition.
    ///
    /// The returned event, when present, is the committed-result callback the
    /// surrounding form is waiting on.
    pub fn update(&mut self, message: SelectMessage) -> Option<SelectEvent> {
        match message {
            SelectMessage::CatalogLoaded { result } => {
                match result {
                    Ok(nodes) => self.catalog_loaded(nodes),
                    Err(error) => self.catalog_failed(error),
                }
                None
            }
            SelectMessage::LevelChanged { level, id } => self.change_level(level, id),
            SelectMessage::InitialValue { value } => {
                self.set_initial(value);
                None
            }
        }
    }

    /// Marks the catalog fetch as in flight.
    pub fn set_loading(&mut self) {
        self.catalog = CatalogState::Loading;
    }

    /// Installs the fetched catalog and hydrates from the remembered initial
    /// value, if one was supplied.
    ///
    /// Any selection made against a previous snapshot is discarded first;
    /// node ids are only guaranteed stable within one snapshot.
    pub fn catalog_loaded(&mut self, nodes: Vec<LocationNode>) {
        self.catalog = CatalogState::Loaded(LocationCatalog::from_nodes(nodes));
        self.selection = SelectionState::default();
        self.hydrate();
    }

    /// Records a failed catalog fetch. The selector degrades to an empty,
    /// disabled state rather than surfacing a blocking error.
    pub fn catalog_failed(&mut self, error: String) {
        warn!(error = %error, "location catalog unavailable; selector disabled");
        self.catalog = CatalogState::Error(error);
        self.selection = SelectionState::default();
    }

    /// Sets the externally supplied value and hydrates from it if the
    /// catalog is already available; otherwise hydration runs on load.
    ///
    /// Re-invoking with the same id against an unchanged catalog reproduces
    /// the same selection state.
    pub fn set_initial(&mut self, value: Option<LocationId>) {
        self.initial = value;
        if self.catalog.is_loaded() {
            self.selection = SelectionState::default();
            self.hydrate();
        }
    }

    /// Fills every level slot from the initial value's ancestry chain.
    ///
    /// Resolution failures leave the selection empty: a stale or corrupt id
    /// is not worth interrupting the surrounding form for.
    fn hydrate(&mut self) {
        let CatalogState::Loaded(ref catalog) = self.catalog else {
            return;
        };
        let Some(leaf) = self.initial else {
            return;
        };

        match ancestry::resolve(catalog, leaf) {
            Ok(chain) => {
                let mut hydrated = SelectionState::default();
                for node in chain {
                    hydrated.set(node.level, Some(node.id));
                }
                self.selection = hydrated;
            }
            Err(err) => {
                debug!(leaf, %err, "hydration failed; leaving selection empty");
            }
        }
    }

    /// Applies a user selection (or clear) at one level.
    ///
    /// Every strictly finer slot is cleared: a coarser change invalidates all
    /// finer choices, which are no longer guaranteed to descend from the new
    /// ancestor. Emits [`SelectEvent::Committed`] only when the change lands
    /// on the policy's target level with a value, and [`SelectEvent::Cleared`]
    /// when the target slot goes from set to empty.
    pub fn change_level(
        &mut self,
        level: AdminLevel,
        id: Option<LocationId>,
    ) -> Option<SelectEvent> {
        if !self.catalog.is_ready() {
            debug!(%level, "level change ignored; catalog not ready");
            return None;
        }

        let was_committed = self.selection.get(self.policy.max_level).is_some();
        self.selection.set(level, id);
        self.selection.clear_below(level);

        if level == self.policy.max_level {
            if let Some(picked) = id {
                match self.catalog.catalog().and_then(|c| c.by_id(picked)) {
                    Some(node) => {
                        return Some(SelectEvent::Committed {
                            id: picked,
                            node: node.clone(),
                        });
                    }
                    None => {
                        debug!(id = picked, "selected id missing from catalog; not emitting");
                        return None;
                    }
                }
            }
        }

        if was_committed && self.selection.get(self.policy.max_level).is_none() {
            return Some(SelectEvent::Cleared);
        }

        None
    }

    /// The candidate nodes for `level` under the currently selected parent,
    /// in catalog order. Empty until the catalog has loaded.
    pub fn options_at(&self, level: AdminLevel) -> Vec<&LocationNode> {
        match self.catalog.catalog() {
            Some(catalog) => {
                let parent = level.parent().and_then(|p| self.selection.get(p));
                catalog.children_of(level, parent)
            }
            None => Vec::new(),
        }
    }

    /// The selected id at `level`, if any.
    pub fn selected_at(&self, level: AdminLevel) -> Option<LocationId> {
        self.selection.get(level)
    }

    /// Whether `level` should currently be offered to the user.
    ///
    /// A level is offered only below or at the target depth, and only once
    /// its immediate parent holds a selection; the root level is offered
    /// whenever the policy shows the full chain. Nothing is offered before
    /// the catalog is ready or after a failed load.
    pub fn is_level_visible(&self, level: AdminLevel) -> bool {
        if !self.catalog.is_ready() || level > self.policy.max_level {
            return false;
        }
        match level.parent() {
            None => self.policy.show_all_levels,
            Some(parent) => self.selection.get(parent).is_some(),
        }
    }

    /// The levels currently offered, coarsest first.
    pub fn visible_levels(&self) -> Vec<AdminLevel> {
        AdminLevel::ALL
            .into_iter()
            .filter(|&level| self.is_level_visible(level))
            .collect()
    }

    /// Whether `level` should be rendered as a required field.
    ///
    /// The root and terminal levels follow the policy's `required` flag; an
    /// intermediate level is required exactly when it is the target level.
    pub fn is_level_required(&self, level: AdminLevel) -> bool {
        if level.is_root() || level == AdminLevel::Parish {
            self.policy.required
        } else {
            level == self.policy.max_level
        }
    }

    /// The record of the finest selected node, if any.
    pub fn selected_node(&self) -> Option<&LocationNode> {
        let catalog = self.catalog.catalog()?;
        let (_, id) = self.selection.deepest()?;
        catalog.by_id(id)
    }

    /// The committed value: the selection at the target level, if reached.
    pub fn value(&self) -> Option<LocationId> {
        self.selection.get(self.policy.max_level)
    }

    /// Whether the selection satisfies the policy: always, unless a value at
    /// the target level is required and still missing.
    pub fn is_complete(&self) -> bool {
        !self.policy.required || self.value().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nodes() -> Vec<LocationNode> {
        vec![
            LocationNode::new(1, "Kenya", AdminLevel::Country, None),
            LocationNode::new(2, "Nairobi", AdminLevel::County, Some(1)),
            LocationNode::new(3, "Westlands", AdminLevel::SubCounty, Some(2)),
            LocationNode::new(4, "Mombasa", AdminLevel::County, Some(1)),
            LocationNode::new(5, "Kangemi", AdminLevel::Ward, Some(3)),
            LocationNode::new(6, "Mountain View", AdminLevel::Parish, Some(5)),
        ]
    }

    fn loaded(policy: SelectionPolicy) -> LocationSelect {
        let mut select = LocationSelect::new(policy);
        select.catalog_loaded(nodes());
        select
    }

    fn sub_county_policy() -> SelectionPolicy {
        SelectionPolicy {
            max_level: AdminLevel::SubCounty,
            ..SelectionPolicy::default()
        }
    }

    #[test]
    fn test_interaction_blocked_until_catalog_ready() {
        let mut select = LocationSelect::new(SelectionPolicy::default());
        assert!(select.visible_levels().is_empty());
        assert!(select.options_at(AdminLevel::Country).is_empty());

        let event = select.change_level(AdminLevel::Country, Some(1));
        assert_eq!(event, None);
        assert!(select.selection().is_empty());

        select.set_loading();
        assert!(select.is_loading());
        assert!(select.visible_levels().is_empty());
    }

    #[test]
    fn test_failed_load_degrades_to_disabled_selector() {
        let mut select = LocationSelect::new(SelectionPolicy::default());
        select.catalog_failed("connection refused".to_string());

        assert!(select.catalog_state().is_error());
        assert_eq!(select.catalog_state().error(), Some("connection refused"));
        assert!(select.visible_levels().is_empty());
        assert!(select.selection().is_empty());
        assert_eq!(select.change_level(AdminLevel::Country, Some(1)), None);
    }

    #[test]
    fn test_catalog_loaded_with_zero_nodes_is_not_ready() {
        let mut select = LocationSelect::new(SelectionPolicy::default());
        select.catalog_loaded(Vec::new());

        // An empty catalog reads as data-not-arrived, never "no locations".
        assert!(select.catalog_state().is_loaded());
        assert!(!select.catalog_state().is_ready());
        assert!(select.visible_levels().is_empty());
        assert!(select.options_at(AdminLevel::Country).is_empty());

        // No node 42 exists, so nothing may land in the slots.
        assert_eq!(select.change_level(AdminLevel::Country, Some(42)), None);
        assert!(select.selection().is_empty());
    }

    #[test]
    fn test_walkthrough_emits_only_at_target_level() {
        let mut select = loaded(sub_county_policy());

        assert_eq!(select.change_level(AdminLevel::Country, Some(1)), None);
        let counties: Vec<_> = select
            .options_at(AdminLevel::County)
            .iter()
            .map(|n| n.name.clone())
            .collect();
        assert!(counties.contains(&"Nairobi".to_string()));

        assert_eq!(select.change_level(AdminLevel::County, Some(2)), None);
        let subs: Vec<_> = select
            .options_at(AdminLevel::SubCounty)
            .iter()
            .map(|n| n.name.clone())
            .collect();
        assert_eq!(subs, vec!["Westlands".to_string()]);

        let event = select.change_level(AdminLevel::SubCounty, Some(3));
        match event {
            Some(SelectEvent::Committed { id, node }) => {
                assert_eq!(id, 3);
                assert_eq!(node.name, "Westlands");
            }
            other => panic!("expected a committed event, got {:?}", other),
        }
    }

    #[test]
    fn test_no_emission_for_intermediates_when_target_is_parish() {
        let mut select = loaded(SelectionPolicy::default());

        assert_eq!(select.change_level(AdminLevel::Country, Some(1)), None);
        assert_eq!(select.change_level(AdminLevel::County, Some(2)), None);
        assert_eq!(select.change_level(AdminLevel::SubCounty, Some(3)), None);
        assert_eq!(select.change_level(AdminLevel::Ward, Some(5)), None);

        let event = select.change_level(AdminLevel::Parish, Some(6));
        assert_eq!(event.as_ref().and_then(SelectEvent::id), Some(6));
    }

    #[test]
    fn test_coarser_change_clears_every_finer_slot() {
        let mut select = loaded(SelectionPolicy::default());
        select.change_level(AdminLevel::Country, Some(1));
        select.change_level(AdminLevel::County, Some(2));
        select.change_level(AdminLevel::SubCounty, Some(3));
        select.change_level(AdminLevel::Ward, Some(5));

        select.change_level(AdminLevel::County, Some(4));

        assert_eq!(select.selected_at(AdminLevel::Country), Some(1));
        assert_eq!(select.selected_at(AdminLevel::County), Some(4));
        assert_eq!(select.selected_at(AdminLevel::SubCounty), None);
        assert_eq!(select.selected_at(AdminLevel::Ward), None);
        assert_eq!(select.selected_at(AdminLevel::Parish), None);
    }

    #[test]
    fn test_hydration_fills_chain_without_interaction() {
        let mut select = loaded(sub_county_policy());
        select.set_initial(Some(3));

        assert_eq!(select.selected_at(AdminLevel::Country), Some(1));
        assert_eq!(select.selected_at(AdminLevel::County), Some(2));
        assert_eq!(select.selected_at(AdminLevel::SubCounty), Some(3));
        assert_eq!(select.value(), Some(3));
    }

    #[test]
    fn test_hydration_is_idempotent() {
        let mut select = loaded(SelectionPolicy::default());
        select.set_initial(Some(6));
        let first = *select.selection();

        select.set_initial(Some(6));
        assert_eq!(*select.selection(), first);
        assert!(!first.is_empty());
    }

    #[test]
    fn test_hydration_with_unknown_id_stays_empty() {
        let mut select = loaded(SelectionPolicy::default());
        select.set_initial(Some(999));
        assert!(select.selection().is_empty());
    }

    #[test]
    fn test_hydration_runs_when_catalog_arrives_last() {
        let mut select = LocationSelect::new(sub_county_policy());
        select.set_initial(Some(3));
        assert!(select.selection().is_empty());

        select.catalog_loaded(nodes());
        assert_eq!(select.selected_at(AdminLevel::SubCounty), Some(3));
    }

    #[test]
    fn test_reloading_the_catalog_discards_manual_selection() {
        let mut select = loaded(SelectionPolicy::default());
        select.set_initial(Some(3));
        select.change_level(AdminLevel::County, Some(4));

        select.catalog_loaded(nodes());
        // Back to the hydrated chain; the manual pick was made against the
        // previous snapshot.
        assert_eq!(select.selected_at(AdminLevel::County), Some(2));
        assert_eq!(select.selected_at(AdminLevel::SubCounty), Some(3));
    }

    #[test]
    fn test_clearing_the_target_level_emits_cleared() {
        let mut select = loaded(sub_county_policy());
        select.set_initial(Some(3));

        let event = select.change_level(AdminLevel::SubCounty, None);
        assert_eq!(event, Some(SelectEvent::Cleared));
        assert_eq!(select.value(), None);

        // Nothing was committed anymore, so a second clear is silent.
        assert_eq!(select.change_level(AdminLevel::SubCounty, None), None);
    }

    #[test]
    fn test_ancestor_change_over_a_commitment_emits_cleared() {
        let mut select = loaded(sub_county_policy());
        select.change_level(AdminLevel::Country, Some(1));
        select.change_level(AdminLevel::County, Some(2));
        select.change_level(AdminLevel::SubCounty, Some(3));

        let event = select.change_level(AdminLevel::County, Some(4));
        assert_eq!(event, Some(SelectEvent::Cleared));
        assert_eq!(select.value(), None);
    }

    #[test]
    fn test_progressive_disclosure() {
        let mut select = loaded(sub_county_policy());
        assert_eq!(select.visible_levels(), vec![AdminLevel::Country]);

        select.change_level(AdminLevel::Country, Some(1));
        assert_eq!(
            select.visible_levels(),
            vec![AdminLevel::Country, AdminLevel::County]
        );

        select.change_level(AdminLevel::County, Some(2));
        select.change_level(AdminLevel::SubCounty, Some(3));
        // Ward sits past the target level and never shows.
        assert_eq!(
            select.visible_levels(),
            vec![
                AdminLevel::Country,
                AdminLevel::County,
                AdminLevel::SubCounty
            ]
        );
    }

    #[test]
    fn test_hidden_root_is_driven_by_hydration() {
        let policy = SelectionPolicy {
            max_level: AdminLevel::SubCounty,
            show_all_levels: false,
            ..SelectionPolicy::default()
        };
        let mut select = loaded(policy);
        assert!(select.visible_levels().is_empty());

        select.set_initial(Some(3));
        assert_eq!(
            select.visible_levels(),
            vec![AdminLevel::County, AdminLevel::SubCounty]
        );
    }

    #[test]
    fn test_required_markers_follow_policy() {
        let required = loaded(SelectionPolicy {
            required: true,
            ..SelectionPolicy::default()
        });
        assert!(required.is_level_required(AdminLevel::Country));
        assert!(!required.is_level_required(AdminLevel::County));
        assert!(!required.is_level_required(AdminLevel::Ward));
        assert!(required.is_level_required(AdminLevel::Parish));

        // An intermediate level is required exactly when it is the target.
        let county_target = loaded(SelectionPolicy {
            max_level: AdminLevel::County,
            ..SelectionPolicy::default()
        });
        assert!(!county_target.is_level_required(AdminLevel::Country));
        assert!(county_target.is_level_required(AdminLevel::County));
        assert!(!county_target.is_level_required(AdminLevel::SubCounty));
    }

    #[test]
    fn test_completeness_tracks_required_flag() {
        let mut optional = loaded(sub_county_policy());
        assert!(optional.is_complete());

        let mut required = loaded(SelectionPolicy {
            required: true,
            ..sub_county_policy()
        });
        assert!(!required.is_complete());

        for select in [&mut optional, &mut required] {
            select.change_level(AdminLevel::Country, Some(1));
            select.change_level(AdminLevel::County, Some(2));
            select.change_level(AdminLevel::SubCounty, Some(3));
        }
        assert!(optional.is_complete());
        assert!(required.is_complete());
    }

    #[test]
    fn test_selected_node_is_the_deepest_slot() {
        let mut select = loaded(SelectionPolicy::default());
        select.change_level(AdminLevel::Country, Some(1));
        select.change_level(AdminLevel::County, Some(2));
        assert_eq!(select.selected_node().map(|n| n.name.as_str()), Some("Nairobi"));
    }

    #[test]
    fn test_update_routes_messages() {
        let mut select = LocationSelect::new(sub_county_policy());

        let event = select.update(SelectMessage::CatalogLoaded {
            result: Ok(nodes()),
        });
        assert_eq!(event, None);
        assert!(select.catalog_state().is_loaded());

        assert_eq!(
            select.update(SelectMessage::InitialValue { value: Some(3) }),
            None
        );
        assert_eq!(select.value(), Some(3));

        let event = select.update(SelectMessage::LevelChanged {
            level: AdminLevel::SubCounty,
            id: None,
        });
        assert_eq!(event, Some(SelectEvent::Cleared));

        let event = select.update(SelectMessage::CatalogLoaded {
            result: Err("boom".to_string()),
        });
        assert_eq!(event, None);
        assert!(select.catalog_state().is_error());
    }
}
