//! HTTP client integration
//!
//! Wires the pending tracker into the request pipeline: every request sent
//! through [`TrackedClient`] is counted while in flight, keyed on its full
//! URL (query string included), so exclusion patterns can match against the
//! exact target.

use crate::tracker::PendingTracker;
use async_trait::async_trait;
use reqwest::{Client, IntoUrl, Method, Request, Response};
use std::sync::Arc;

/// Downstream handler the tracker wraps; the last link is the transport.
#[async_trait]
pub trait RequestHandler: Send + Sync {
    async fn handle(&self, request: Request) -> reqwest::Result<Response>;
}

/// Terminal handler that sends the request with a `reqwest::Client`.
pub struct ReqwestHandler {
    client: Client,
}

impl ReqwestHandler {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RequestHandler for ReqwestHandler {
    async fn handle(&self, request: Request) -> reqwest::Result<Response> {
        self.client.execute(request).await
    }
}

/// HTTP client with pending-request tracking applied to every request.
#[derive(Clone)]
pub struct TrackedClient {
    handler: Arc<dyn RequestHandler>,
    tracker: PendingTracker,
}

impl TrackedClient {
    /// Track requests sent with a fresh `reqwest::Client`.
    pub fn new(tracker: PendingTracker) -> Self {
        Self::with_client(Client::new(), tracker)
    }

    /// Track requests sent with an existing client.
    pub fn with_client(client: Client, tracker: PendingTracker) -> Self {
        Self::with_handler(Arc::new(ReqwestHandler::new(client)), tracker)
    }

    /// Track requests forwarded to a custom downstream handler.
    pub fn with_handler(handler: Arc<dyn RequestHandler>, tracker: PendingTracker) -> Self {
        Self { handler, tracker }
    }

    pub fn tracker(&self) -> &PendingTracker {
        &self.tracker
    }

    /// Send `request`, counting it as pending until the terminal response
    /// or error.
    ///
    /// Requests whose URL matches an exclusion pattern are forwarded
    /// untouched. Transport errors come back unchanged, after the pending
    /// count has been released.
    pub async fn execute(&self, request: Request) -> reqwest::Result<Response> {
        let url = request.url().as_str().to_string();
        self.tracker.track(&url, self.handler.handle(request)).await
    }

    /// GET `url` and wait for the response head.
    pub async fn get<U: IntoUrl>(&self, url: U) -> reqwest::Result<Response> {
        let request = Request::new(Method::GET, url.into_url()?);
        self.execute(request).await
    }

    /// GET `url` and read the full JSON body.
    ///
    /// The pending count is held through the body read, so a streaming
    /// response keeps the spinner open until the last byte.
    pub async fn get_json<U: IntoUrl>(&self, url: U) -> reqwest::Result<serde_json::Value> {
        let request = Request::new(Method::GET, url.into_url()?);
        let url = request.url().as_str().to_string();
        let handler = Arc::clone(&self.handler);
        self.tracker
            .track(&url, async move {
                let response = handler.handle(request).await?;
                response.json::<serde_json::Value>().await
            })
            .await
    }
}
