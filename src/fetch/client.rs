use async_trait::async_trait;
use reqwest::{Request, Response};

/// Minimal request executor, so tests can stand in a fake transport.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
