pub mod json_backend;

use crate::{
    domain::{Device, ReadingEntry},
    errors::Result,
};

/// Abstraction over the persistence of readings, the initial reading, and devices.
///
/// Every save overwrites the whole collection; a missing file loads as "no data".
pub trait StorageBackend: Send + Sync {
    fn load_history(&self) -> Result<Vec<ReadingEntry>>;
    fn save_history(&self, entries: &[ReadingEntry]) -> Result<()>;
    fn clear_history(&self) -> Result<()>;

    fn load_initial_reading(&self) -> Result<Option<f64>>;
    fn save_initial_reading(&self, value: f64) -> Result<()>;
    fn clear_initial_reading(&self) -> Result<()>;

    fn load_devices(&self) -> Result<Vec<Device>>;
    fn save_devices(&self, devices: &[Device]) -> Result<()>;
}

pub use json_backend::JsonStorage;
