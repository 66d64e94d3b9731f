//! In-memory gateway for drill-down integration tests.

use async_trait::async_trait;
use lottree::error::GatewayError;
use lottree::gateway::{AreaDraft, EntityGateway, FloorDraft, SpaceDraft};
use lottree::model::{Area, Floor, LevelStatus, ParkingSpace, SpaceStatus};
use lottree::types::{AreaId, FloorId, SpaceId};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

#[derive(Default)]
struct Tables {
    floors: HashMap<AreaId, Vec<Floor>>,
    spaces: HashMap<FloorId, Vec<ParkingSpace>>,
}

/// Gateway backed by in-memory tables, with call counters and failure
/// injection per listing parent.
#[derive(Default)]
pub struct InMemoryGateway {
    tables: Mutex<Tables>,
    failing_floor_lists: Mutex<HashSet<AreaId>>,
    failing_space_lists: Mutex<HashSet<FloorId>>,
    fail_mutations: Mutex<bool>,
    floor_list_calls: AtomicUsize,
    space_list_calls: AtomicUsize,
    mutation_calls: AtomicUsize,
    next_id: AtomicU64,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1000),
            ..Self::default()
        }
    }

    pub fn seed_floor(&self, floor: Floor) {
        self.tables
            .lock()
            .floors
            .entry(floor.area_id)
            .or_default()
            .push(floor);
    }

    pub fn seed_space(&self, space: ParkingSpace) {
        self.tables
            .lock()
            .spaces
            .entry(space.floor_id)
            .or_default()
            .push(space);
    }

    pub fn floor_list_calls(&self) -> usize {
        self.floor_list_calls.load(Ordering::SeqCst)
    }

    pub fn space_list_calls(&self) -> usize {
        self.space_list_calls.load(Ordering::SeqCst)
    }

    pub fn mutation_calls(&self) -> usize {
        self.mutation_calls.load(Ordering::SeqCst)
    }

    /// Make `list_spaces` fail for one floor until cleared.
    pub fn fail_space_list(&self, floor_id: FloorId, failing: bool) {
        let mut set = self.failing_space_lists.lock();
        if failing {
            set.insert(floor_id);
        } else {
            set.remove(&floor_id);
        }
    }

    /// Make every mutation fail until cleared.
    pub fn fail_mutations(&self, failing: bool) {
        *self.fail_mutations.lock() = failing;
    }

    fn check_mutation(&self) -> Result<(), GatewayError> {
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        if *self.fail_mutations.lock() {
            Err(GatewayError::Request("injected mutation failure".into()))
        } else {
            Ok(())
        }
    }

    fn assign_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }
}

#[async_trait]
impl EntityGateway for InMemoryGateway {
    async fn list_floors(&self, area_id: AreaId) -> Result<Vec<Floor>, GatewayError> {
        self.floor_list_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_floor_lists.lock().contains(&area_id) {
            return Err(GatewayError::Request("injected floor list failure".into()));
        }
        Ok(self
            .tables
            .lock()
            .floors
            .get(&area_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_spaces(&self, floor_id: FloorId) -> Result<Vec<ParkingSpace>, GatewayError> {
        self.space_list_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_space_lists.lock().contains(&floor_id) {
            return Err(GatewayError::Request("injected space list failure".into()));
        }
        Ok(self
            .tables
            .lock()
            .spaces
            .get(&floor_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn create_area(&self, draft: AreaDraft) -> Result<Area, GatewayError> {
        self.check_mutation()?;
        Ok(Area {
            id: self.assign_id(),
            lot_id: draft.lot_id,
            name: draft.name,
            status: draft.status,
        })
    }

    async fn update_area(&self, area_id: AreaId, draft: AreaDraft) -> Result<Area, GatewayError> {
        self.check_mutation()?;
        Ok(Area {
            id: area_id,
            lot_id: draft.lot_id,
            name: draft.name,
            status: draft.status,
        })
    }

    async fn delete_area(&self, area_id: AreaId) -> Result<(), GatewayError> {
        self.check_mutation()?;
        let mut tables = self.tables.lock();
        if let Some(floors) = tables.floors.remove(&area_id) {
            for floor in floors {
                tables.spaces.remove(&floor.id);
            }
        }
        Ok(())
    }

    async fn create_floor(&self, draft: FloorDraft) -> Result<Floor, GatewayError> {
        self.check_mutation()?;
        let floor = Floor {
            id: self.assign_id(),
            area_id: draft.area_id,
            name: draft.name,
            status: draft.status,
        };
        self.tables
            .lock()
            .floors
            .entry(floor.area_id)
            .or_default()
            .push(floor.clone());
        Ok(floor)
    }

    async fn update_floor(
        &self,
        floor_id: FloorId,
        draft: FloorDraft,
    ) -> Result<Floor, GatewayError> {
        self.check_mutation()?;
        let updated = Floor {
            id: floor_id,
            area_id: draft.area_id,
            name: draft.name,
            status: draft.status,
        };
        let mut tables = self.tables.lock();
        for floors in tables.floors.values_mut() {
            for floor in floors.iter_mut() {
                if floor.id == floor_id {
                    *floor = updated.clone();
                }
            }
        }
        Ok(updated)
    }

    async fn delete_floor(&self, floor_id: FloorId) -> Result<(), GatewayError> {
        self.check_mutation()?;
        let mut tables = self.tables.lock();
        for floors in tables.floors.values_mut() {
            floors.retain(|floor| floor.id != floor_id);
        }
        tables.spaces.remove(&floor_id);
        Ok(())
    }

    async fn create_space(&self, draft: SpaceDraft) -> Result<ParkingSpace, GatewayError> {
        self.check_mutation()?;
        let space = ParkingSpace {
            id: self.assign_id(),
            floor_id: draft.floor_id,
            name: draft.name,
            status: draft.status,
        };
        self.tables
            .lock()
            .spaces
            .entry(space.floor_id)
            .or_default()
            .push(space.clone());
        Ok(space)
    }

    async fn update_space(
        &self,
        space_id: SpaceId,
        draft: SpaceDraft,
    ) -> Result<ParkingSpace, GatewayError> {
        self.check_mutation()?;
        let updated = ParkingSpace {
            id: space_id,
            floor_id: draft.floor_id,
            name: draft.name,
            status: draft.status,
        };
        let mut tables = self.tables.lock();
        for spaces in tables.spaces.values_mut() {
            for space in spaces.iter_mut() {
                if space.id == space_id {
                    *space = updated.clone();
                }
            }
        }
        Ok(updated)
    }

    async fn delete_space(&self, space_id: SpaceId) -> Result<(), GatewayError> {
        self.check_mutation()?;
        let mut tables = self.tables.lock();
        for spaces in tables.spaces.values_mut() {
            spaces.retain(|space| space.id != space_id);
        }
        Ok(())
    }
}

pub fn floor(id: FloorId, area_id: AreaId, name: &str) -> Floor {
    Floor {
        id,
        area_id,
        name: name.to_string(),
        status: LevelStatus::Active,
    }
}

pub fn space(id: SpaceId, floor_id: FloorId, name: &str, status: SpaceStatus) -> ParkingSpace {
    ParkingSpace {
        id,
        floor_id,
        name: name.to_string(),
        status,
    }
}
