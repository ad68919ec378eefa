pub mod date;
pub mod device;
pub mod period;
pub mod reading;

pub use date::{format_iso_date, format_storage_date, parse_date, STORAGE_DATE_FORMAT};
pub use device::{Device, DAYS_PER_MONTH};
pub use period::{FilterMode, Granularity};
pub use reading::{InitialReading, ReadingEntry};
