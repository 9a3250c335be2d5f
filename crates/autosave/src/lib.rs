//! Client-side autosave engine for an open workout session.
//!
//! The UI mutates set rows optimistically against a local mirror; a
//! trailing-edge debounce timer batches the dirty rows into one flush per
//! quiet period, and every change reaches persistent storage exactly once
//! per distinct edit. Rows leave the dirty set only when their own write
//! confirms, so a dropped connection can never silently lose input.

pub mod engine;
pub mod http;
pub mod store;

pub use engine::{DEFAULT_DEBOUNCE, SessionEditor};
pub use http::HttpSetStore;
pub use store::{SetPatch, SetRow, SetStore, StoreError, StoreResult};
