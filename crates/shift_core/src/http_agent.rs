use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::{ShiftOutcome, ShiftRequest},
    protocol::{TimeShiftRequest, TimeShiftResponse, TIME_SHIFT_PATH},
};
use tracing::debug;
use url::Url;

use crate::agent::TimeShiftAgent;

/// [`TimeShiftAgent`] reached over HTTP/JSON.
///
/// The request timeout belongs to this agent; the controller never adds one.
pub struct HttpShiftAgent {
    http: Client,
    endpoint: Url,
}

impl HttpShiftAgent {
    pub fn new(agent_url: &str, timeout: Duration) -> Result<Self> {
        let endpoint = format!("{}{TIME_SHIFT_PATH}", agent_url.trim_end_matches('/'));
        let endpoint = Url::parse(&endpoint)
            .with_context(|| format!("invalid shifting agent url '{agent_url}'"))?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build shifting agent http client")?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl TimeShiftAgent for HttpShiftAgent {
    async fn shift(&self, request: ShiftRequest) -> Result<ShiftOutcome> {
        let body = TimeShiftRequest::new(request);
        let request_id = body.request_id;
        debug!(%request_id, endpoint = %self.endpoint, "sending time shift request");

        let res = self
            .http
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await
            .with_context(|| format!("time shift request {request_id} did not reach the agent"))?;

        let status = res.status();
        if !status.is_success() {
            let detail = res.text().await.unwrap_or_default();
            return Err(anyhow!(
                "shifting agent responded with {status}: {}",
                detail.trim()
            ));
        }

        let reply: TimeShiftResponse = res
            .json()
            .await
            .with_context(|| format!("malformed reply to time shift request {request_id}"))?;
        debug!(%request_id, ok = reply.ok, "time shift reply received");
        Ok(reply.into())
    }
}

#[cfg(test)]
#[path = "tests/http_agent_tests.rs"]
mod tests;
