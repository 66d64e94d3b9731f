//! Core identifier types for the lot drill-down tree.

/// LotId: Identifier of the parking lot that scopes one view.
pub type LotId = u64;

/// AreaId: Identifier of a first-level subdivision of a lot.
pub type AreaId = u64;

/// FloorId: Identifier of a floor within an area.
pub type FloorId = u64;

/// SpaceId: Identifier of an individual parking space on a floor.
pub type SpaceId = u64;
