//! Expand/collapse state for the drill-down tree.
//!
//! Split in two on purpose: [`ExpansionState`] is the policy-free data model
//! (it supports any number of simultaneously expanded nodes and enforces only
//! the cascading-collapse invariant), while [`ExpansionCoordinator`] applies
//! the single-path drill-down policy of this UI and triggers cache fetches on
//! expand. Relaxing the policy later does not touch the data model.

use crate::cache::{CacheKey, CacheStore};
use crate::gateway::EntityGateway;
use crate::model::{Floor, ParkingSpace};
use crate::notify::ChangeNotifier;
use crate::types::{AreaId, FloorId};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, warn};

/// Which tree nodes are currently expanded.
///
/// Each expanded floor records the area that owned it at expand time, so
/// collapsing an area cascades to exactly its own floors. Re-expanding an
/// area does not restore previously expanded floors.
#[derive(Debug, Default)]
pub struct ExpansionState {
    areas: HashSet<AreaId>,
    /// Expanded floor → owning area, captured at expand time.
    floors: HashMap<FloorId, AreaId>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_area_expanded(&self, area_id: AreaId) -> bool {
        self.areas.contains(&area_id)
    }

    pub fn is_floor_expanded(&self, floor_id: FloorId) -> bool {
        self.floors.contains_key(&floor_id)
    }

    /// Areas currently expanded. At most one under the single-path policy.
    pub fn expanded_areas(&self) -> Vec<AreaId> {
        self.areas.iter().copied().collect()
    }

    pub fn expand_area(&mut self, area_id: AreaId) {
        self.areas.insert(area_id);
    }

    /// Collapse an area and cascade to the floors it owns.
    pub fn collapse_area(&mut self, area_id: AreaId) {
        self.areas.remove(&area_id);
        self.floors.retain(|_, owner| *owner != area_id);
    }

    /// Record a floor as expanded under its owning area.
    ///
    /// Refused when the owner is not expanded: a floor's expansion flag is
    /// only meaningful while its ancestor is open. Returns whether the flag
    /// was set.
    pub fn expand_floor(&mut self, floor_id: FloorId, owner: AreaId) -> bool {
        if !self.areas.contains(&owner) {
            return false;
        }
        self.floors.insert(floor_id, owner);
        true
    }

    pub fn collapse_floor(&mut self, floor_id: FloorId) {
        self.floors.remove(&floor_id);
    }

    /// Collapse every expanded floor, regardless of owner.
    pub fn collapse_all_floors(&mut self) {
        self.floors.clear();
    }

    /// Collapse everything.
    pub fn collapse_all(&mut self) {
        self.areas.clear();
        self.floors.clear();
    }
}

/// Maps user expand/collapse intent to state changes and cache fetches.
///
/// Enforces single-path drill-down: at most one expanded area and, within
/// it, at most one expanded floor.
pub struct ExpansionCoordinator {
    state: Arc<RwLock<ExpansionState>>,
    floors: Arc<CacheStore<Floor>>,
    spaces: Arc<CacheStore<ParkingSpace>>,
    gateway: Arc<dyn EntityGateway>,
    notifier: Arc<ChangeNotifier>,
}

impl ExpansionCoordinator {
    pub fn new(
        state: Arc<RwLock<ExpansionState>>,
        floors: Arc<CacheStore<Floor>>,
        spaces: Arc<CacheStore<ParkingSpace>>,
        gateway: Arc<dyn EntityGateway>,
        notifier: Arc<ChangeNotifier>,
    ) -> Self {
        Self {
            state,
            floors,
            spaces,
            gateway,
            notifier,
        }
    }

    pub fn is_area_expanded(&self, area_id: AreaId) -> bool {
        self.state.read().is_area_expanded(area_id)
    }

    pub fn is_floor_expanded(&self, floor_id: FloorId) -> bool {
        self.state.read().is_floor_expanded(floor_id)
    }

    /// The currently expanded area, if any.
    pub fn expanded_area(&self) -> Option<AreaId> {
        self.state.read().expanded_areas().into_iter().next()
    }

    /// Toggle an area. Expanding makes it the sole expanded area, collapses
    /// any floor, and ensures its floors listing is loaded; toggling the
    /// already-expanded area collapses it (cascade).
    pub async fn toggle_area(&self, area_id: AreaId) {
        let expanding = {
            let mut state = self.state.write();
            if state.is_area_expanded(area_id) {
                state.collapse_area(area_id);
                false
            } else {
                state.collapse_all();
                state.expand_area(area_id);
                true
            }
        };
        self.notifier.notify();

        if !expanding {
            debug!(area_id, "collapsed area");
            return;
        }
        debug!(area_id, "expanded area");
        let gateway = self.gateway.clone();
        self.floors
            .ensure(&CacheKey::floors(area_id), area_id, false, move |id| async move {
                gateway.list_floors(id).await
            })
            .await;
    }

    /// Toggle a floor within the currently expanded area. Ignored with a
    /// warning when no area is expanded.
    pub async fn toggle_floor(&self, floor_id: FloorId) {
        let expanding = {
            let mut state = self.state.write();
            if state.is_floor_expanded(floor_id) {
                state.collapse_floor(floor_id);
                false
            } else {
                let Some(owner) = state.expanded_areas().into_iter().next() else {
                    warn!(floor_id, "ignoring floor toggle with no expanded area");
                    return;
                };
                state.collapse_all_floors();
                state.expand_floor(floor_id, owner);
                true
            }
        };
        self.notifier.notify();

        if !expanding {
            debug!(floor_id, "collapsed floor");
            return;
        }
        debug!(floor_id, "expanded floor");
        let gateway = self.gateway.clone();
        self.spaces
            .ensure(&CacheKey::spaces(floor_id), floor_id, false, move |id| async move {
                gateway.list_spaces(id).await
            })
            .await;
    }
}
