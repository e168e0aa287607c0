//! The `CallTransport` trait — one POST of a contract-call body.

use async_trait::async_trait;

use crate::error::TransportError;
use crate::request::{ConstantCallRequest, HttpResponse};

/// Sends a single contract-call request. No retry; see [`Requester`](crate::Requester).
///
/// The trait is object-safe and is stored as `Arc<dyn CallTransport>`.
#[async_trait]
pub trait CallTransport: Send + Sync + 'static {
    async fn send(&self, req: &ConstantCallRequest) -> Result<HttpResponse, TransportError>;

    /// Return the transport's identifier (URL or name).
    fn url(&self) -> &str;
}
