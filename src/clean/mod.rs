pub mod algorithm;

pub use algorithm::{BundleCleaner, CleanError, CleanParams, EndpointRule};
