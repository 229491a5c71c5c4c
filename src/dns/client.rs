//! Cloudflare API client

use serde::Deserialize;
use std::time::Duration;

use crate::models::{MonitorError, MonitorResult};

/// A DNS zone as returned by the zone list endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct Zone {
    pub id: String,
    pub name: String,
}

/// An existing DNS record
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DnsRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub content: String,
}

/// Cloudflare v4 response envelope
#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    success: bool,
    #[serde(default)]
    result: Option<T>,
}

/// What the record upsert did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordAction {
    Created,
    Updated,
}

impl std::fmt::Display for RecordAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordAction::Created => write!(f, "created"),
            RecordAction::Updated => write!(f, "updated"),
        }
    }
}

/// Client for the Cloudflare DNS API
pub struct CloudflareClient {
    api_base: String,
    api_token: String,
    http_client: reqwest::Client,
}

impl CloudflareClient {
    /// Create a new client
    pub fn new(api_token: impl Into<String>, api_base: impl Into<String>) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_base: api_base.into(),
            api_token: api_token.into(),
            http_client,
        }
    }

    /// Find the zone id for a zone name
    pub async fn find_zone_id(&self, zone_name: &str) -> MonitorResult<Option<String>> {
        let url = format!("{}/zones", self.api_base);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.api_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MonitorError::DnsSetup(format!(
                "Zone list failed: {}",
                response.status()
            )));
        }

        let envelope: ApiEnvelope<Vec<Zone>> = response.json().await?;
        if !envelope.success {
            return Err(MonitorError::DnsSetup("Zone list rejected".to_string()));
        }

        Ok(envelope
            .result
            .unwrap_or_default()
            .into_iter()
            .find(|zone| zone.name == zone_name)
            .map(|zone| zone.id))
    }

    /// Current public IP as seen from the outside
    pub async fn lookup_public_ip(&self, ip_service: &str) -> MonitorResult<String> {
        let response = self.http_client.get(ip_service).send().await?;

        if !response.status().is_success() {
            return Err(MonitorError::DnsSetup(format!(
                "Public IP lookup failed: {}",
                response.status()
            )));
        }

        let ip = response.text().await?;
        Ok(ip.trim().to_string())
    }

    /// Create the A record, or update it in place when it already exists
    pub async fn upsert_a_record(
        &self,
        zone_id: &str,
        record_name: &str,
        ip: &str,
        proxied: bool,
    ) -> MonitorResult<RecordAction> {
        let existing = self.find_a_record(zone_id, record_name).await?;

        let body = serde_json::json!({
            "type": "A",
            "name": record_name,
            "content": ip,
            "proxied": proxied,
        });

        let (request, action) = match existing {
            Some(record) => {
                let url = format!(
                    "{}/zones/{}/dns_records/{}",
                    self.api_base, zone_id, record.id
                );
                (self.http_client.put(&url), RecordAction::Updated)
            }
            None => {
                let url = format!("{}/zones/{}/dns_records", self.api_base, zone_id);
                (self.http_client.post(&url), RecordAction::Created)
            }
        };

        let response = request
            .bearer_auth(&self.api_token)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MonitorError::DnsSetup(format!(
                "Record {} failed: {}",
                action,
                response.status()
            )));
        }

        let envelope: ApiEnvelope<DnsRecord> = response.json().await?;
        if !envelope.success {
            return Err(MonitorError::DnsSetup(format!("Record {} rejected", action)));
        }

        Ok(action)
    }

    /// Look up an existing A record by name
    async fn find_a_record(
        &self,
        zone_id: &str,
        record_name: &str,
    ) -> MonitorResult<Option<DnsRecord>> {
        let url = format!("{}/zones/{}/dns_records", self.api_base, zone_id);

        let response = self
            .http_client
            .get(&url)
            .query(&[("type", "A"), ("name", record_name)])
            .bearer_auth(&self.api_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MonitorError::DnsSetup(format!(
                "Record list failed: {}",
                response.status()
            )));
        }

        let envelope: ApiEnvelope<Vec<DnsRecord>> = response.json().await?;
        if !envelope.success {
            return Err(MonitorError::DnsSetup("Record list rejected".to_string()));
        }

        Ok(envelope
            .result
            .unwrap_or_default()
            .into_iter()
            .find(|record| record.record_type == "A" && record.name == record_name))
    }
}

impl std::fmt::Debug for CloudflareClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareClient")
            .field("api_base", &self.api_base)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_envelope_parsing() {
        let json = r#"{
            "success": true,
            "errors": [],
            "result": [
                {"id": "023e105f4ecef8ad9ca31a8372d0c353", "name": "example.com", "status": "active"}
            ]
        }"#;

        let envelope: ApiEnvelope<Vec<Zone>> = serde_json::from_str(json).unwrap();
        assert!(envelope.success);
        let zones = envelope.result.unwrap();
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].name, "example.com");
    }

    #[test]
    fn test_record_envelope_parsing() {
        let json = r#"{
            "success": true,
            "result": [
                {
                    "id": "372e67954025e0ba6aaa6d586b9e0b59",
                    "type": "A",
                    "name": "backup-monitor.example.com",
                    "content": "198.51.100.4",
                    "proxied": true
                }
            ]
        }"#;

        let envelope: ApiEnvelope<Vec<DnsRecord>> = serde_json::from_str(json).unwrap();
        let records = envelope.result.unwrap();
        assert_eq!(records[0].record_type, "A");
        assert_eq!(records[0].content, "198.51.100.4");
    }

    #[test]
    fn test_failure_envelope_parsing() {
        let json = r#"{"success": false, "errors": [{"code": 9103, "message": "Unknown X-Auth-Key"}]}"#;
        let envelope: ApiEnvelope<Vec<Zone>> = serde_json::from_str(json).unwrap();
        assert!(!envelope.success);
        assert!(envelope.result.is_none());
    }

    #[test]
    fn test_record_action_display() {
        assert_eq!(RecordAction::Created.to_string(), "created");
        assert_eq!(RecordAction::Updated.to_string(), "updated");
    }
}
