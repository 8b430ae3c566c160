//! Remote collection service.
//!
//! [`RemoteCollection`] is the seam between the sync adapter and the
//! transport. [`HttpCollection`] speaks the REST shape:
//!
//! - `GET {base}` lists every record
//! - `POST {base}` creates one from `{name, age}`
//! - `PUT {base}/{id}` updates one from `{name, age}`
//! - `DELETE {base}/{id}` removes one

use crate::config::Config;
use crate::error::{Result, SyncError};
use roster_engine::{Record, RecordId, RecordInput};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::rc::Rc;
use std::time::Duration;

/// Operations offered by the remote record collection.
///
/// Futures are not required to be `Send`; everything runs on one thread.
#[allow(async_fn_in_trait)]
pub trait RemoteCollection {
    /// Fetch the full collection in service order.
    async fn list(&self) -> Result<Vec<Record>>;

    /// Create a record; the result carries the service-assigned id.
    async fn create(&self, input: &RecordInput) -> Result<Record>;

    /// Overwrite the record with `id`.
    async fn update(&self, id: &RecordId, input: &RecordInput) -> Result<Record>;

    /// Delete the record with `id`, returning the acknowledgement body.
    async fn delete(&self, id: &RecordId) -> Result<Value>;
}

impl<T: RemoteCollection> RemoteCollection for Rc<T> {
    async fn list(&self) -> Result<Vec<Record>> {
        (**self).list().await
    }

    async fn create(&self, input: &RecordInput) -> Result<Record> {
        (**self).create(input).await
    }

    async fn update(&self, id: &RecordId, input: &RecordInput) -> Result<Record> {
        (**self).update(id, input).await
    }

    async fn delete(&self, id: &RecordId) -> Result<Value> {
        (**self).delete(id).await
    }
}

/// [`RemoteCollection`] over HTTP with JSON bodies.
#[derive(Debug, Clone)]
pub struct HttpCollection {
    client: reqwest::Client,
    base: String,
}

impl HttpCollection {
    /// Build a client for `base` with the given transport timeout.
    pub fn new(base: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base: base.into(),
        })
    }

    /// Build a client from loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.api_url.clone(), config.http_timeout)
    }

    fn item_url(&self, id: &RecordId) -> String {
        format!("{}/{}", self.base.trim_end_matches('/'), id)
    }
}

impl RemoteCollection for HttpCollection {
    async fn list(&self) -> Result<Vec<Record>> {
        tracing::debug!(url = %self.base, "GET collection");
        let response = self.client.get(&self.base).send().await?;
        read_json(response).await
    }

    async fn create(&self, input: &RecordInput) -> Result<Record> {
        tracing::debug!(url = %self.base, "POST record");
        let response = self.client.post(&self.base).json(input).send().await?;
        read_json(response).await
    }

    async fn update(&self, id: &RecordId, input: &RecordInput) -> Result<Record> {
        let url = self.item_url(id);
        tracing::debug!(url = %url, "PUT record");
        let response = self.client.put(&url).json(input).send().await?;
        read_json(response).await
    }

    async fn delete(&self, id: &RecordId) -> Result<Value> {
        let url = self.item_url(id);
        tracing::debug!(url = %url, "DELETE record");
        let response = self.client.delete(&url).send().await?;
        let response = check_status(response).await?;

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body).unwrap_or(Value::String(body)))
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(SyncError::from_status(status.as_u16(), &body))
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let response = check_status(response).await?;
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_urls() {
        let remote = HttpCollection::new("http://host/users", Duration::from_secs(1)).unwrap();
        assert_eq!(remote.item_url(&RecordId::Int(5)), "http://host/users/5");

        let remote = HttpCollection::new("http://host/users/", Duration::from_secs(1)).unwrap();
        assert_eq!(
            remote.item_url(&RecordId::Text("a1".into())),
            "http://host/users/a1"
        );
    }
}
