//! # Storage Module
//!
//! Handles all data persistence for the meal tracker.
//!
//! The domain layer only sees the traits in [`traits`]; the concrete
//! file-based implementation lives in [`json`]. Every write replaces a whole
//! file atomically, and [`save_queue`] makes sure snapshots of the entry
//! collection reach disk one at a time and in order.
//!
//! ## Design Principles
//!
//! - **Repository Pattern**: Clean separation between domain and data access
//! - **Dependency Inversion**: Domain depends on storage abstractions, not implementations
//! - **Testability**: In-memory implementations for unit testing

pub mod error;
pub mod json;
pub mod save_queue;
pub mod traits;

pub use error::StorageError;
pub use save_queue::{PersistMode, Persister, SaveQueue};
pub use traits::{EntryStorage, LoadPolicy, SettingsStorage};
