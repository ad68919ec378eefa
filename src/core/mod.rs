pub mod device_registry;
pub mod ledger;
pub mod services;
pub mod time;
pub mod utils;

pub use device_registry::{Comparison, ComparisonBand, DeviceRegistry};
pub use ledger::{Ledger, LedgerSummary};
pub use time::{Clock, FixedClock, SystemClock};
