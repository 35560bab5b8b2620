use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;

use crate::config::{DATASET_NAME, FIELD_ACTIVE, FIELD_WIDGET_ID, SERVER_URL};
use crate::error::{BannerError, Result};

use super::{ConfigRecord, ConfigSource, Constraint, DatasetPayload, DatasetRequest};

/// HTTP client for the platform dataset service.
#[derive(Clone)]
pub struct DatasetClient {
    client: Client,
    base_url: String,
}

impl DatasetClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn query(&self, dataset: &str, constraints: &[Constraint]) -> Result<DatasetPayload> {
        let request = DatasetRequest {
            name: dataset,
            fields: &[],
            constraints,
            order: &[],
        };

        debug!(
            "querying dataset '{dataset}' with {} constraints",
            constraints.len()
        );

        let resp = self
            .client
            .post(format!("{}/api/public/ecm/dataset/datasets", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| BannerError::QueryFailed(format!("network error: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(BannerError::QueryFailed(format!(
                "HTTP {status}: {}",
                extract_error(&body)
            )));
        }

        resp.json::<DatasetPayload>()
            .await
            .map_err(|e| BannerError::QueryFailed(format!("parse error: {e}")))
    }
}

impl Default for DatasetClient {
    fn default() -> Self {
        Self::new(SERVER_URL)
    }
}

#[async_trait]
impl ConfigSource for DatasetClient {
    async fn fetch(&self, widget_id: &str) -> Result<ConfigRecord> {
        debug!("fetching banner configuration for '{widget_id}'");

        let constraints = [
            Constraint::equals(FIELD_WIDGET_ID, widget_id),
            Constraint::equals(FIELD_ACTIVE, "true"),
        ];

        let payload = self.query(DATASET_NAME, &constraints).await?;

        match payload.values.into_iter().next() {
            Some(record) => {
                debug!("mapped columns: {:?}", record.columns());
                Ok(record)
            }
            None => {
                warn!(
                    "no rows in '{DATASET_NAME}' for '{widget_id}': does the \
                     record exist and is it still active?"
                );
                Err(BannerError::NotFound(widget_id.to_string()))
            }
        }
    }
}

fn extract_error(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message")?.as_str().map(|s| s.to_string()))
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_constraint_wire_shape() {
        let c = Constraint::equals("WIDGET_ID", "banner-home");
        let json = serde_json::to_value(&c).unwrap();

        assert_eq!(json["field"], "WIDGET_ID");
        assert_eq!(json["initialValue"], "banner-home");
        assert_eq!(json["finalValue"], "banner-home");
        assert_eq!(json["matchType"], "MUST");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = DatasetClient::new("https://fluig.example.com/");
        assert_eq!(client.base_url(), "https://fluig.example.com");
    }

    #[test]
    fn test_extract_error_prefers_service_message() {
        let body = r#"{"message":"dataset not published"}"#;
        assert_eq!(extract_error(body), "dataset not published");
        assert_eq!(extract_error("plain failure"), "plain failure");
    }

    #[test]
    fn test_payload_rows_deserialize_as_records() {
        let raw = r#"{"columns":["ATIVO_1"],"values":[{"ATIVO_1":"Sim"}]}"#;
        let payload: DatasetPayload = serde_json::from_str(raw).unwrap();

        assert_eq!(payload.values.len(), 1);
        assert_eq!(payload.values[0].get("ATIVO_1"), Some("Sim"));
    }
}
