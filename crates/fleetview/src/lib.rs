//! `fleetview` - fetch a collection of vehicle records and render it as a list
//!
//! A [`RecordProvider`] supplies records, a [`Mount`] runs one fetch per view
//! lifetime and publishes [`Snapshot`]s, and a [`ListView`] renders each
//! snapshot as either a loading indicator or a counted list of rows.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod mount;
pub mod present;
pub mod provider;
pub mod record;
pub mod storage;
pub mod view;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use mount::{mount, Mount, Phase};
pub use present::{present, OutputFormat};
pub use provider::{MemoryProvider, RecordProvider, Snapshot, StorageProvider};
pub use record::{NewRecord, Record, RecordId};
pub use storage::{Storage, StorageStats};
pub use view::{Header, ListView, Row, ViewTree};
