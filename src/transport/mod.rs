pub mod http;
pub mod request;

use crate::transport::request::{AuthRequest, TransportOutcome};

/// Performs exactly one exchange with the auth API per call.
pub trait Transport {
    fn send(&self, request: &AuthRequest) -> TransportOutcome;
}
