pub mod aggregation_service;
pub mod billing_service;

pub use aggregation_service::{month_name, ordinal, week_of_month, AggregationService, Bucket};
pub use billing_service::{parse_reading, Bill, BillingService};
