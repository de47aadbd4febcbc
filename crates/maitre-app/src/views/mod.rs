//! # View State Module
//!
//! Pure view composition: serializable view-state types computed from the
//! capability vector, the cache snapshot, and the delete error slot. No
//! side effects live here; frontends render these types directly.

pub mod restaurants;

pub use restaurants::{Cell, Column, ListContent, RestaurantListView, Row};
