//! Mutation coordination.
//!
//! Wraps create/update/delete calls to the gateway. On success, invalidates
//! and force-refetches exactly the cache entries whose listing is affected;
//! on failure, the cache is left untouched since the mutation did not take
//! effect. Validation errors never reach the gateway.

use crate::cache::{CacheKey, CacheStore, FetchStatus};
use crate::error::MutationError;
use crate::expansion::ExpansionState;
use crate::gateway::{AreaDraft, EntityGateway, FloorDraft, SpaceDraft};
use crate::model::{Floor, ParkingSpace};
use crate::notify::ChangeNotifier;
use crate::types::{AreaId, FloorId, SpaceId};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{info, warn};

/// Coordinates mutations and the cache refreshes they require.
pub struct MutationCoordinator {
    state: Arc<RwLock<ExpansionState>>,
    floors: Arc<CacheStore<Floor>>,
    spaces: Arc<CacheStore<ParkingSpace>>,
    gateway: Arc<dyn EntityGateway>,
    notifier: Arc<ChangeNotifier>,
}

/// Names must be non-empty after trimming.
fn validate_name(name: &str) -> Result<(), MutationError> {
    if name.trim().is_empty() {
        return Err(MutationError::Validation("name cannot be empty".to_string()));
    }
    Ok(())
}

/// Parent linkage is typed, but the remote API treats id 0 as "unset"; an
/// unselected parent arrives here as 0 and must be caught before the call.
fn validate_parent(id: u64, field: &str) -> Result<(), MutationError> {
    if id == 0 {
        return Err(MutationError::Validation(format!(
            "{} is required",
            field
        )));
    }
    Ok(())
}

impl MutationCoordinator {
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

    // ---- Areas -------------------------------------------------------

    /// Create an area under the lot. The lot's area listing is owned by the
    /// caller; no nested cache key is affected.
    pub async fn submit_area_create(&self, draft: AreaDraft) -> Result<(), MutationError> {
        validate_name(&draft.name)?;
        validate_parent(draft.lot_id, "lot_id")?;
        let area = self.gateway.create_area(draft).await.map_err(log_gateway_err)?;
        info!(area_id = area.id, "area created");
        Ok(())
    }

    pub async fn submit_area_update(
        &self,
        area_id: AreaId,
        draft: AreaDraft,
    ) -> Result<(), MutationError> {
        validate_name(&draft.name)?;
        validate_parent(draft.lot_id, "lot_id")?;
        self.gateway
            .update_area(area_id, draft)
            .await
            .map_err(log_gateway_err)?;
        info!(area_id, "area updated");
        Ok(())
    }

    /// Delete an area. Clears its expansion (cascading to its floors) and
    /// drops its descendant cache entries so a reused numeric id can never
    /// serve a stale listing.
    pub async fn submit_area_delete(&self, area_id: AreaId) -> Result<(), MutationError> {
        self.gateway
            .delete_area(area_id)
            .await
            .map_err(log_gateway_err)?;

        let floors_key = CacheKey::floors(area_id);
        if let Some(entry) = self.floors.get(&floors_key) {
            if entry.status == FetchStatus::Ready {
                for floor in &entry.items {
                    self.spaces.invalidate(&CacheKey::spaces(floor.id));
                }
            }
        }
        self.floors.invalidate(&floors_key);
        self.state.write().collapse_area(area_id);
        self.notifier.notify();
        info!(area_id, "area deleted");
        Ok(())
    }

    // ---- Floors ------------------------------------------------------

    pub async fn submit_floor_create(&self, draft: FloorDraft) -> Result<(), MutationError> {
        validate_name(&draft.name)?;
        validate_parent(draft.area_id, "area_id")?;
        let area_id = draft.area_id;
        let floor = self
            .gateway
            .create_floor(draft)
            .await
            .map_err(log_gateway_err)?;
        info!(floor_id = floor.id, area_id, "floor created");
        self.refresh_floors(area_id).await;
        Ok(())
    }

    pub async fn submit_floor_update(
        &self,
        floor_id: FloorId,
        draft: FloorDraft,
    ) -> Result<(), MutationError> {
        validate_name(&draft.name)?;
        validate_parent(draft.area_id, "area_id")?;
        let area_id = draft.area_id;
        self.gateway
            .update_floor(floor_id, draft)
            .await
            .map_err(log_gateway_err)?;
        info!(floor_id, area_id, "floor updated");
        self.refresh_floors(area_id).await;
        Ok(())
    }

    /// Delete a floor under `area_id`. Clears the floor's expansion if it is
    /// currently expanded and drops its spaces entry before refreshing the
    /// owning area's floors listing.
    pub async fn submit_floor_delete(
        &self,
        floor_id: FloorId,
        area_id: AreaId,
    ) -> Result<(), MutationError> {
        self.gateway
            .delete_floor(floor_id)
            .await
            .map_err(log_gateway_err)?;

        self.spaces.invalidate(&CacheKey::spaces(floor_id));
        self.state.write().collapse_floor(floor_id);
        self.notifier.notify();
        info!(floor_id, area_id, "floor deleted");
        self.refresh_floors(area_id).await;
        Ok(())
    }

    // ---- Spaces ------------------------------------------------------

    pub async fn submit_space_create(&self, draft: SpaceDraft) -> Result<(), MutationError> {
        validate_name(&draft.name)?;
        validate_parent(draft.floor_id, "floor_id")?;
        let floor_id = draft.floor_id;
        let space = self
            .gateway
            .create_space(draft)
            .await
            .map_err(log_gateway_err)?;
        info!(space_id = space.id, floor_id, "space created");
        self.refresh_spaces(floor_id).await;
        Ok(())
    }

    pub async fn submit_space_update(
        &self,
        space_id: SpaceId,
        draft: SpaceDraft,
    ) -> Result<(), MutationError> {
        validate_name(&draft.name)?;
        validate_parent(draft.floor_id, "floor_id")?;
        let floor_id = draft.floor_id;
        self.gateway
            .update_space(space_id, draft)
            .await
            .map_err(log_gateway_err)?;
        info!(space_id, floor_id, "space updated");
        self.refresh_spaces(floor_id).await;
        Ok(())
    }

    pub async fn submit_space_delete(
        &self,
        space_id: SpaceId,
        floor_id: FloorId,
    ) -> Result<(), MutationError> {
        self.gateway
            .delete_space(space_id)
            .await
            .map_err(log_gateway_err)?;
        info!(space_id, floor_id, "space deleted");
        self.refresh_spaces(floor_id).await;
        Ok(())
    }

    async fn refresh_floors(&self, area_id: AreaId) {
        let gateway = self.gateway.clone();
        self.floors
            .force_refresh(&CacheKey::floors(area_id), area_id, move |id| async move {
                gateway.list_floors(id).await
            })
            .await;
    }

    async fn refresh_spaces(&self, floor_id: FloorId) {
        let gateway = self.gateway.clone();
        self.spaces
            .force_refresh(&CacheKey::spaces(floor_id), floor_id, move |id| async move {
                gateway.list_spaces(id).await
            })
            .await;
    }
}

fn log_gateway_err(error: crate::error::GatewayError) -> crate::error::GatewayError {
    warn!(error = %error, "mutation rejected by gateway, cache untouched");
    error
}
