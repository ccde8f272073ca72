//! HTTP access to the file manager.

use std::path::Path;

use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use reqwest::multipart;
use reqwest::{Client, Method};
use tokio::io::AsyncWriteExt;
use tracing::debug;
use url::Url;

use crate::error::TransportError;
use crate::page::{Form, CSRF_FIELD};
use crate::utils::format_size;

/// Raw outcome of a request that reached the server. Status is kept for
/// diagnostics only.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Bytes,
}

#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Sends `DELETE` to the path built from `segments`, each segment
    /// percent-encoded on its own, with the given headers and no body.
    async fn delete(
        &self,
        segments: &[&str],
        headers: &[(&str, &str)],
    ) -> Result<HttpResponse, TransportError>;
}

/// Where an upload submission ended up after redirects.
#[derive(Debug, Clone)]
pub struct UploadReceipt {
    pub status: u16,
    pub final_url: Url,
}

impl UploadReceipt {
    /// The server redirects to the listing page when it stored the file
    /// and back to the upload form otherwise.
    pub fn accepted(&self) -> bool {
        self.final_url
            .path_segments()
            .and_then(|mut s| s.next_back())
            .map(|last| last == "uploads")
            .unwrap_or(false)
    }
}

/// `reqwest` client bound to one file manager instance. Cookies persist
/// across calls so the CSRF token read from a page stays valid for the
/// session that issued it.
#[derive(Debug, Clone)]
pub struct WebClient {
    base: Url,
    client: Client,
}

impl WebClient {
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        let base =
            Url::parse(base_url).map_err(|e| TransportError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(TransportError::InvalidUrl(base_url.to_string()));
        }
        let client = Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| TransportError::RequestFailed(format!("Failed to build client: {}", e)))?;
        Ok(Self { base, client })
    }

    pub fn url_for(&self, segments: &[&str]) -> Result<Url, TransportError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| TransportError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Fetches a page and returns its body as text.
    pub async fn get_page(&self, segments: &[&str]) -> Result<String, TransportError> {
        let url = self.url_for(segments)?;
        debug!(%url, "GET page");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TransportError::RequestFailed(format!("Failed to send request: {}", e)))?;
        response
            .text()
            .await
            .map_err(|e| TransportError::RequestFailed(format!("Failed to read body: {}", e)))
    }

    /// Loads a page and collects its form inputs.
    pub async fn load_form(&self, segments: &[&str]) -> Result<Form, TransportError> {
        let html = self.get_page(segments).await?;
        let form = Form::from_html(&html);
        debug!(fields = form.len(), "collected form inputs");
        Ok(form)
    }

    /// Posts `file` to `/upload` as multipart form data together with the
    /// form's CSRF token.
    pub async fn upload(&self, form: &Form, file: &Path) -> Result<UploadReceipt, TransportError> {
        let file_name = file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| {
                TransportError::RequestFailed(format!("Not a file path: {}", file.display()))
            })?;
        let content_type = mime_guess::from_path(file)
            .first_or_octet_stream()
            .to_string();
        let data = tokio::fs::read(file).await.map_err(|e| {
            TransportError::RequestFailed(format!("Failed to read {}: {}", file.display(), e))
        })?;
        debug!(%file_name, %content_type, size = data.len(), "prepared upload");

        let part = multipart::Part::bytes(data)
            .file_name(file_name)
            .mime_str(&content_type)
            .map_err(|e| TransportError::RequestFailed(format!("Invalid content type: {}", e)))?;
        let mut body = multipart::Form::new().part("file", part);
        if let Some(token) = form.field(CSRF_FIELD) {
            body = body.text(CSRF_FIELD, token.to_string());
        }

        let response = self
            .client
            .post(self.url_for(&["upload"])?)
            .multipart(body)
            .send()
            .await
            .map_err(|e| TransportError::RequestFailed(format!("Failed to send request: {}", e)))?;

        Ok(UploadReceipt {
            status: response.status().as_u16(),
            final_url: response.url().clone(),
        })
    }

    /// Streams `/download/{file_name}` into `output`. Returns the number of
    /// bytes written.
    pub async fn download(
        &self,
        file_name: &str,
        output: &Path,
        verbose: bool,
    ) -> Result<u64, TransportError> {
        let response = self
            .client
            .get(self.url_for(&["download", file_name])?)
            .send()
            .await
            .map_err(|e| TransportError::RequestFailed(format!("Failed to send request: {}", e)))?;

        if !response.status().is_success() {
            return Err(TransportError::RequestFailed(format!(
                "HTTP error: {}",
                response.status()
            )));
        }
        // A missing file redirects back to the listing page.
        if !response.url().path().contains("/download/") {
            return Err(TransportError::RequestFailed(format!(
                "File not available: {}",
                file_name
            )));
        }

        let content_length = response.content_length().unwrap_or(0);
        let mut file = tokio::fs::File::create(output).await.map_err(|e| {
            TransportError::RequestFailed(format!("Failed to create {}: {}", output.display(), e))
        })?;

        let mut downloaded: u64 = 0;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk
                .map_err(|e| TransportError::RequestFailed(format!("Failed to read chunk: {}", e)))?;
            downloaded += chunk.len() as u64;
            file.write_all(&chunk).await.map_err(|e| {
                TransportError::RequestFailed(format!("Failed to write chunk: {}", e))
            })?;

            if verbose && content_length > 0 {
                let percent = (downloaded as f64 / content_length as f64 * 100.0) as u32;
                print!(
                    "\r  Progress: {}% ({}/{})",
                    percent,
                    format_size(downloaded),
                    format_size(content_length)
                );
            }
        }
        if verbose && content_length > 0 {
            println!();
        }

        file.flush()
            .await
            .map_err(|e| TransportError::RequestFailed(format!("Failed to flush file: {}", e)))?;
        Ok(downloaded)
    }
}

#[async_trait]
impl HttpClient for WebClient {
    async fn delete(
        &self,
        segments: &[&str],
        headers: &[(&str, &str)],
    ) -> Result<HttpResponse, TransportError> {
        let url = self.url_for(segments)?;
        debug!(%url, "DELETE");
        let mut request = self.client.request(Method::DELETE, url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TransportError::RequestFailed(format!("Failed to send request: {}", e)))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::RequestFailed(format!("Failed to read body: {}", e)))?;
        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
