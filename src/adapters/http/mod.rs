//! HTTP Adapters
//!
//! - **HttpBatchTransport** - Submits the pending queue to the batch endpoint
//! - **HttpConnectivityProbe** - HEAD request reachability check

mod batch_transport;
mod connectivity_probe;

pub use batch_transport::{HttpBatchTransport, HttpTransportConfig};
pub use connectivity_probe::HttpConnectivityProbe;
