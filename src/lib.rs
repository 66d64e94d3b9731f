//! Lottree: Lazy-Loading Parking-Lot Drill-Down State
//!
//! Client-local state manager for an Area → Floor → Parking-Space tree:
//! per-parent listing cache with duplicate-fetch suppression, cascading
//! expand/collapse state, and mutation-triggered branch refreshes.

pub mod cache;
pub mod config;
pub mod error;
pub mod expansion;
pub mod gateway;
pub mod logging;
pub mod model;
pub mod mutation;
pub mod notify;
pub mod types;
pub mod view;
