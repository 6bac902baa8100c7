mod error;
pub mod operations;
mod registry;
mod scan;

#[cfg(test)]
pub mod mocks;

pub use error::{OperationError, Result};
pub use registry::{ClientFactory, ClientRegistry};
pub use scan::{DetectedClient, ScanRequest, scan_usable_client};
