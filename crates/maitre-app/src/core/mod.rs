//! # Core Application Module
//!
//! [`AppCore`] is the entry point frontends hold: it wires the access
//! policy, the data source, the collection cache, and the delete workflow,
//! and exposes the render and action surface of the restaurant list.

mod app;

pub use app::AppCore;
