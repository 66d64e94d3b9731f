//! Entity gateway contract.
//!
//! The remote API for areas, floors, and spaces is an external collaborator;
//! the core is agnostic to its transport. Implementations are expected to
//! normalize wire quirks (notably the mixed integer/string space status
//! encoding, handled by the serde impls in `model`) before values cross this
//! boundary.

use crate::error::GatewayError;
use crate::model::{Area, Floor, LevelStatus, ParkingSpace, SpaceStatus};
use crate::types::{AreaId, FloorId, LotId, SpaceId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Payload for creating or updating an area under a lot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaDraft {
    pub lot_id: LotId,
    pub name: String,
    pub status: LevelStatus,
}

/// Payload for creating or updating a floor under an area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorDraft {
    pub area_id: AreaId,
    pub name: String,
    pub status: LevelStatus,
}

/// Payload for creating or updating a parking space on a floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpaceDraft {
    pub floor_id: FloorId,
    pub name: String,
    pub status: SpaceStatus,
}

/// Remote CRUD operations per entity level.
///
/// Every method is a suspension point; between initiating a call and its
/// resolution the coordinators stay responsive and may issue further calls.
#[async_trait]
pub trait EntityGateway: Send + Sync {
    async fn list_floors(&self, area_id: AreaId) -> Result<Vec<Floor>, GatewayError>;
    async fn list_spaces(&self, floor_id: FloorId) -> Result<Vec<ParkingSpace>, GatewayError>;

    async fn create_area(&self, draft: AreaDraft) -> Result<Area, GatewayError>;
    async fn update_area(&self, area_id: AreaId, draft: AreaDraft) -> Result<Area, GatewayError>;
    async fn delete_area(&self, area_id: AreaId) -> Result<(), GatewayError>;

    async fn create_floor(&self, draft: FloorDraft) -> Result<Floor, GatewayError>;
    async fn update_floor(
        &self,
        floor_id: FloorId,
        draft: FloorDraft,
    ) -> Result<Floor, GatewayError>;
    async fn delete_floor(&self, floor_id: FloorId) -> Result<(), GatewayError>;

    async fn create_space(&self, draft: SpaceDraft) -> Result<ParkingSpace, GatewayError>;
    async fn update_space(
        &self,
        space_id: SpaceId,
        draft: SpaceDraft,
    ) -> Result<ParkingSpace, GatewayError>;
    async fn delete_space(&self, space_id: SpaceId) -> Result<(), GatewayError>;
}
