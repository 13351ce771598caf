//! crates/thriftlife_client/src/http.rs
//!
//! The REST adapter behind the `ThriftBackend` port.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thriftlife_core::domain::{
    Donation, DonationStatus, ImpactStats, NewDonation, NewThriftItem, ThriftItem,
};
use thriftlife_core::ports::{PortError, PortResult, ThriftBackend};
use tracing::debug;
use uuid::Uuid;

use crate::config::ClientConfig;

/// Talks to the ThriftLife API over HTTP.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

/// Error body returned by the API.
#[derive(Deserialize)]
struct Detail {
    detail: String,
}

impl HttpBackend {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.backend_url.clone(),
        }
    }

    /// Builds `<base>/api/<segments..>`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> PortResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| PortError::Unexpected(format!("{} is not a base URL", self.base_url)))?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> PortResult<T> {
        let response = request
            .send()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        let response = check_status(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| PortError::Unexpected(format!("malformed response: {}", e)))
    }
}

/// Maps a 404 to `NotFound` and any other failure status to `Unexpected`.
async fn check_status(response: Response) -> PortResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let detail = match response.json::<Detail>().await {
        Ok(body) => body.detail,
        Err(_) => status.to_string(),
    };
    debug!("Backend answered {}: {}", status, detail);
    if status == StatusCode::NOT_FOUND {
        Err(PortError::NotFound(detail))
    } else {
        Err(PortError::Unexpected(format!("{}: {}", status, detail)))
    }
}

#[async_trait]
impl ThriftBackend for HttpBackend {
    async fn seed_sample_data(&self) -> PortResult<()> {
        let url = self.endpoint(&["seed-mock-data"])?;
        self.send::<serde_json::Value>(self.client.post(url))
            .await
            .map(|_| ())
    }

    async fn create_donation(&self, donation: &NewDonation) -> PortResult<Donation> {
        let url = self.endpoint(&["donations"])?;
        self.send(self.client.post(url).json(donation)).await
    }

    async fn get_donation(&self, tracking_id: &str) -> PortResult<Donation> {
        let url = self.endpoint(&["donations", tracking_id])?;
        self.send(self.client.get(url)).await
    }

    async fn list_donations(&self) -> PortResult<Vec<Donation>> {
        let url = self.endpoint(&["donations"])?;
        self.send(self.client.get(url)).await
    }

    async fn update_donation_status(
        &self,
        donation_id: Uuid,
        status: DonationStatus,
        assigned_agent: Option<&str>,
    ) -> PortResult<Donation> {
        let id = donation_id.to_string();
        let url = self.endpoint(&["donations", &id, "status"])?;
        let mut query = vec![("new_status", status.as_str())];
        if let Some(agent) = assigned_agent {
            query.push(("assigned_agent", agent));
        }
        self.send(self.client.put(url).query(&query)).await
    }

    async fn list_thrift_items(&self) -> PortResult<Vec<ThriftItem>> {
        let url = self.endpoint(&["thrift-items"])?;
        self.send(self.client.get(url)).await
    }

    async fn create_thrift_item(&self, item: &NewThriftItem) -> PortResult<ThriftItem> {
        let url = self.endpoint(&["thrift-items"])?;
        self.send(self.client.post(url).json(item)).await
    }

    async fn impact_stats(&self) -> PortResult<ImpactStats> {
        let url = self.endpoint(&["impact-stats"])?;
        self.send(self.client.get(url)).await
    }
}
