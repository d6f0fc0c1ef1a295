//! Table API client.
//!
//! # Responsibilities
//! - Build `{base}/api/now/table/{table}[/{id}]` URLs
//! - Attach basic-auth credentials to every call
//! - Turn non-2xx statuses into errors and unwrap the `{result}` envelope
//!
//! No retries and no explicit timeouts; transport defaults apply.

use std::sync::Arc;

use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::config::UpstreamConfig;
use crate::observability::metrics;
use crate::upstream::types::{TableEnvelope, UpstreamError, UpstreamResult};

/// Stateless client for the upstream table API.
#[derive(Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    config: Arc<UpstreamConfig>,
}

impl UpstreamClient {
    /// Create a client for the given instance and credentials.
    pub fn new(config: UpstreamConfig) -> UpstreamResult<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(UpstreamError::Transport)?;

        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    /// Address of a table, or of one record in it.
    ///
    /// Segments are percent-encoded, so an id cannot escape the table path.
    pub fn table_url(&self, table: &str, id: Option<&str>) -> UpstreamResult<Url> {
        let invalid = |reason: String| UpstreamError::InvalidBaseUrl {
            url: self.config.base_url.clone(),
            reason,
        };

        let mut url = Url::parse(&self.config.base_url).map_err(|e| invalid(e.to_string()))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| invalid("cannot be a base".to_string()))?;
            segments.pop_if_empty().extend(["api", "now", "table", table]);
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    /// Fetch every record of a table.
    pub async fn list(&self, table: &str) -> UpstreamResult<Value> {
        let envelope = self.send(Method::GET, table, None, |req| req).await?;
        Ok(envelope.result)
    }

    /// Fetch one record. `None` when the upstream returns an empty result.
    pub async fn get(&self, table: &str, id: &str) -> UpstreamResult<Option<Value>> {
        let envelope = self.send(Method::GET, table, Some(id), |req| req).await?;
        Ok(envelope.into_record())
    }

    /// Fetch the records matching the given field filters.
    pub async fn query<Q>(&self, table: &str, filter: &Q) -> UpstreamResult<Value>
    where
        Q: Serialize + ?Sized,
    {
        let envelope = self
            .send(Method::GET, table, None, |req| req.query(filter))
            .await?;
        Ok(envelope.result)
    }

    /// Insert a record and return it as stored.
    pub async fn create<B>(&self, table: &str, payload: &B) -> UpstreamResult<Value>
    where
        B: Serialize + ?Sized,
    {
        let envelope = self
            .send(Method::POST, table, None, |req| req.json(payload))
            .await?;
        Ok(envelope.result)
    }

    /// Update a record. `None` when the upstream returns an empty result.
    pub async fn update<B>(&self, table: &str, id: &str, payload: &B) -> UpstreamResult<Option<Value>>
    where
        B: Serialize + ?Sized,
    {
        let envelope = self
            .send(Method::PUT, table, Some(id), |req| req.json(payload))
            .await?;
        Ok(envelope.into_record())
    }

    /// Delete a record. The response body is ignored.
    pub async fn delete(&self, table: &str, id: &str) -> UpstreamResult<()> {
        self.execute(Method::DELETE, table, Some(id), |req| req)
            .await
            .map(drop)
    }

    async fn send<F>(
        &self,
        method: Method,
        table: &str,
        id: Option<&str>,
        build: F,
    ) -> UpstreamResult<TableEnvelope>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let response = self.execute(method, table, id, build).await?;
        response
            .json::<TableEnvelope>()
            .await
            .map_err(UpstreamError::Decode)
    }

    async fn execute<F>(
        &self,
        method: Method,
        table: &str,
        id: Option<&str>,
        build: F,
    ) -> UpstreamResult<reqwest::Response>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let url = self.table_url(table, id)?;

        tracing::debug!(method = %method, url = %url, "Calling upstream");

        let request = self
            .http
            .request(method.clone(), url.clone())
            .basic_auth(&self.config.username, Some(&self.config.password));

        let response = match build(request).send().await {
            Ok(r) => r,
            Err(e) => {
                metrics::record_upstream_call(table, method.as_str(), "error");
                return Err(UpstreamError::Transport(e));
            }
        };

        let status = response.status();
        if !status.is_success() {
            metrics::record_upstream_call(table, method.as_str(), "error");
            return Err(UpstreamError::Status {
                status,
                url: url.to_string(),
            });
        }

        metrics::record_upstream_call(table, method.as_str(), "ok");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> UpstreamClient {
        UpstreamClient::new(UpstreamConfig {
            base_url: base_url.into(),
            username: "admin".into(),
            password: "secret".into(),
        })
        .unwrap()
    }

    #[test]
    fn test_table_url() {
        let c = client("https://dev1.service-now.com");
        assert_eq!(
            c.table_url("problem", None).unwrap().as_str(),
            "https://dev1.service-now.com/api/now/table/problem"
        );
        assert_eq!(
            c.table_url("problem", Some("abc123")).unwrap().as_str(),
            "https://dev1.service-now.com/api/now/table/problem/abc123"
        );
    }

    #[test]
    fn test_table_url_trailing_slash() {
        let c = client("https://dev1.service-now.com/");
        assert_eq!(
            c.table_url("sys_journal_field", None).unwrap().as_str(),
            "https://dev1.service-now.com/api/now/table/sys_journal_field"
        );
    }

    #[test]
    fn test_table_url_encodes_id() {
        let c = client("https://dev1.service-now.com");
        let url = c.table_url("problem", Some("../incident")).unwrap();
        assert_eq!(url.path(), "/api/now/table/problem/..%2Fincident");
    }

    #[test]
    fn test_missing_base_url() {
        let c = client("");
        assert!(matches!(
            c.table_url("problem", None),
            Err(UpstreamError::InvalidBaseUrl { .. })
        ));
    }
}
