//! Per-lot view facade.
//!
//! One `LotView` backs one mounted Area → Floor → Space drill-down view. It
//! owns the caches, the expansion state, and the coordinators, and exposes
//! the read/toggle/submit surface that presentation adapters consume. Drop it
//! when the view unmounts or the lot changes; nothing persists.

use crate::cache::{CacheEntry, CacheKey, CacheStore};
use crate::config::ViewConfig;
use crate::error::MutationError;
use crate::expansion::{ExpansionCoordinator, ExpansionState};
use crate::gateway::{AreaDraft, EntityGateway, FloorDraft, SpaceDraft};
use crate::model::{Floor, ParkingSpace};
use crate::mutation::MutationCoordinator;
use crate::notify::ChangeNotifier;
use crate::types::{AreaId, FloorId, LotId, SpaceId};
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::watch;

/// State manager for one parking lot's drill-down view.
pub struct LotView {
    lot_id: LotId,
    notifier: Arc<ChangeNotifier>,
    floors: Arc<CacheStore<Floor>>,
    spaces: Arc<CacheStore<ParkingSpace>>,
    expansion: ExpansionCoordinator,
    mutations: MutationCoordinator,
}

impl LotView {
    pub fn new(lot_id: LotId, gateway: Arc<dyn EntityGateway>, config: &ViewConfig) -> Self {
        let notifier = Arc::new(ChangeNotifier::new());
        let floors = Arc::new(CacheStore::new(notifier.clone(), config.fetch_timeout()));
        let spaces = Arc::new(CacheStore::new(notifier.clone(), config.fetch_timeout()));
        let state = Arc::new(RwLock::new(ExpansionState::new()));

        let expansion = ExpansionCoordinator::new(
            state.clone(),
            floors.clone(),
            spaces.clone(),
            gateway.clone(),
            notifier.clone(),
        );
        let mutations = MutationCoordinator::new(
            state,
            floors.clone(),
            spaces.clone(),
            gateway,
            notifier.clone(),
        );

        Self {
            lot_id,
            notifier,
            floors,
            spaces,
            expansion,
            mutations,
        }
    }

    pub fn lot_id(&self) -> LotId {
        self.lot_id
    }

    /// Subscribe to change notifications; re-read snapshots on every bump.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.notifier.subscribe()
    }

    // ---- Reads ---------------------------------------------------------

    pub fn area_floors(&self, area_id: AreaId) -> Option<CacheEntry<Floor>> {
        self.floors.get(&CacheKey::floors(area_id))
    }

    pub fn floor_spaces(&self, floor_id: FloorId) -> Option<CacheEntry<ParkingSpace>> {
        self.spaces.get(&CacheKey::spaces(floor_id))
    }

    pub fn is_area_expanded(&self, area_id: AreaId) -> bool {
        self.expansion.is_area_expanded(area_id)
    }

    pub fn is_floor_expanded(&self, floor_id: FloorId) -> bool {
        self.expansion.is_floor_expanded(floor_id)
    }

    // ---- Expansion -------------------------------------------------------

    pub async fn toggle_area(&self, area_id: AreaId) {
        self.expansion.toggle_area(area_id).await;
    }

    pub async fn toggle_floor(&self, floor_id: FloorId) {
        self.expansion.toggle_floor(floor_id).await;
    }

    // ---- Mutations -------------------------------------------------------

    pub async fn submit_area_create(&self, draft: AreaDraft) -> Result<(), MutationError> {
        self.mutations.submit_area_create(draft).await
    }

    pub async fn submit_area_update(
        &self,
        area_id: AreaId,
        draft: AreaDraft,
    ) -> Result<(), MutationError> {
        self.mutations.submit_area_update(area_id, draft).await
    }

    pub async fn submit_area_delete(&self, area_id: AreaId) -> Result<(), MutationError> {
        self.mutations.submit_area_delete(area_id).await
    }

    pub async fn submit_floor_create(&self, draft: FloorDraft) -> Result<(), MutationError> {
        self.mutations.submit_floor_create(draft).await
    }

    pub async fn submit_floor_update(
        &self,
        floor_id: FloorId,
        draft: FloorDraft,
    ) -> Result<(), MutationError> {
        self.mutations.submit_floor_update(floor_id, draft).await
    }

    pub async fn submit_floor_delete(
        &self,
        floor_id: FloorId,
        area_id: AreaId,
    ) -> Result<(), MutationError> {
        self.mutations.submit_floor_delete(floor_id, area_id).await
    }

    pub async fn submit_space_create(&self, draft: SpaceDraft) -> Result<(), MutationError> {
        self.mutations.submit_space_create(draft).await
    }

    pub async fn submit_space_update(
        &self,
        space_id: SpaceId,
        draft: SpaceDraft,
    ) -> Result<(), MutationError> {
        self.mutations.submit_space_update(space_id, draft).await
    }

    pub async fn submit_space_delete(
        &self,
        space_id: SpaceId,
        floor_id: FloorId,
    ) -> Result<(), MutationError> {
        self.mutations.submit_space_delete(space_id, floor_id).await
    }
}
