/**
 * Request Transport
 *
 * The seam between the executor and the network. The executor builds a
 * complete `reqwest::Request`; a transport only has to deliver it.
 */

use async_trait::async_trait;
use reqwest::{Client, Request, Response};

/// Delivers a built request and returns the raw response
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: Request) -> Result<Response, reqwest::Error>;
}

/// Transport backed by a pooled `reqwest::Client`
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: Request) -> Result<Response, reqwest::Error> {
        self.client.execute(request).await
    }
}
