use async_trait::async_trait;
use tracing::{info, warn};

use crate::transport::WebClient;

/// Re-renders the current view so it reflects server-side changes.
#[async_trait]
pub trait PageRefresh: Send + Sync {
    async fn refresh(&self);
}

/// Reloads one page of the file manager. Reload problems are logged and
/// otherwise ignored, the same way a browser reload has no caller-visible
/// result.
pub struct ReloadPage {
    client: WebClient,
    page: Vec<String>,
}

impl ReloadPage {
    pub fn new(client: WebClient, page: &[&str]) -> Self {
        Self {
            client,
            page: page.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[async_trait]
impl PageRefresh for ReloadPage {
    async fn refresh(&self) {
        let segments: Vec<&str> = self.page.iter().map(String::as_str).collect();
        match self.client.get_page(&segments).await {
            Ok(body) => info!(page = %segments.join("/"), bytes = body.len(), "page reloaded"),
            Err(e) => warn!(error = %e, "page reload failed"),
        }
    }
}
