use std::time::Duration;

use crate::errors::Result;

/// Bound on a single upload round-trip so a hung server cannot stall
/// the polling loop indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Narrow HTTP seam: POST a binary body, report the status code.
pub trait HttpTransport {
    async fn post(&self, url: &str, body: Vec<u8>) -> Result<u16>;
}

/// reqwest-backed transport sending `application/octet-stream` bodies.
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }
}

impl HttpTransport for HttpClient {
    async fn post(&self, url: &str, body: Vec<u8>) -> Result<u16> {
        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/octet-stream")
            .body(body)
            .send()
            .await?;
        Ok(response.status().as_u16())
    }
}
