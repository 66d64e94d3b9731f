//! Entity model for the Area → Floor → Space tree.
//!
//! Status normalization happens here, at the serde boundary: the remote API
//! encodes a space's status sometimes as an integer code (0–4) and sometimes
//! as a string. `SpaceStatus` accepts both so the ambiguity never reaches the
//! cache or the coordinators.

use crate::types::{AreaId, FloorId, LotId, SpaceId};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operational status shared by areas and floors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelStatus {
    Active,
    Inactive,
}

/// Occupancy status of an individual parking space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpaceStatus {
    Available,
    Occupied,
    Reserved,
    Pending,
    Disabled,
}

impl SpaceStatus {
    /// Map the remote API's integer code to a status.
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            0 => Some(SpaceStatus::Available),
            1 => Some(SpaceStatus::Occupied),
            2 => Some(SpaceStatus::Reserved),
            3 => Some(SpaceStatus::Pending),
            4 => Some(SpaceStatus::Disabled),
            _ => None,
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "available" => Some(SpaceStatus::Available),
            "occupied" => Some(SpaceStatus::Occupied),
            "reserved" => Some(SpaceStatus::Reserved),
            "pending" => Some(SpaceStatus::Pending),
            "disabled" => Some(SpaceStatus::Disabled),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for SpaceStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SpaceStatusVisitor;

        impl<'de> Visitor<'de> for SpaceStatusVisitor {
            type Value = SpaceStatus;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a space status string or integer code 0-4")
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<SpaceStatus, E> {
                SpaceStatus::from_code(value).ok_or_else(|| {
                    E::custom(format!("unknown space status code: {}", value))
                })
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<SpaceStatus, E> {
                if value < 0 {
                    return Err(E::custom(format!("unknown space status code: {}", value)));
                }
                self.visit_u64(value as u64)
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<SpaceStatus, E> {
                // Some API endpoints send the numeric code as a string.
                if let Ok(code) = value.parse::<u64>() {
                    return self.visit_u64(code);
                }
                SpaceStatus::from_name(&value.to_ascii_lowercase()).ok_or_else(|| {
                    E::custom(format!("unknown space status: {}", value))
                })
            }
        }

        deserializer.deserialize_any(SpaceStatusVisitor)
    }
}

/// First-level subdivision of a parking lot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub id: AreaId,
    pub lot_id: LotId,
    pub name: String,
    pub status: LevelStatus,
}

/// A floor within an area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    pub id: FloorId,
    pub area_id: AreaId,
    pub name: String,
    pub status: LevelStatus,
}

/// An individual parking space on a floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkingSpace {
    pub id: SpaceId,
    pub floor_id: FloorId,
    pub name: String,
    pub status: SpaceStatus,
}
