//! Supabase PostgREST client.
//!
//! Thin typed client over the REST surface:
//! - Equality-filtered selects, inserts, upserts, deletes
//! - API-key auth headers on every request
//! - HTTP client tuning (pooling, timeouts)
//! - Observability (tracing spans, metrics)

use std::time::{Duration, Instant};

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info_span, Instrument};

use crate::error::{SupabaseError, SupabaseResult};
use crate::metrics::record_request;

// =============================================================================
// Configuration
// =============================================================================

/// Supabase client configuration.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// Project base URL, e.g. `https://abc.supabase.co`
    pub base_url: String,
    /// Service-role or anon API key
    pub api_key: String,
    /// Request timeout
    pub timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
}

impl SupabaseConfig {
    /// Create config from environment variables.
    pub fn from_env() -> SupabaseResult<Self> {
        let base_url = std::env::var("SUPABASE_URL")
            .map_err(|_| SupabaseError::config("SUPABASE_URL must be set to reach Supabase"))?;

        if base_url.is_empty() {
            return Err(SupabaseError::config("SUPABASE_URL cannot be empty"));
        }

        let api_key = std::env::var("SUPABASE_SERVICE_ROLE_KEY")
            .or_else(|_| std::env::var("SUPABASE_ANON_KEY"))
            .map_err(|_| {
                SupabaseError::config(
                    "SUPABASE_SERVICE_ROLE_KEY or SUPABASE_ANON_KEY must be set",
                )
            })?;

        if api_key.is_empty() {
            return Err(SupabaseError::config(
                "SUPABASE_SERVICE_ROLE_KEY or SUPABASE_ANON_KEY cannot be empty",
            ));
        }

        let timeout_secs: u64 = std::env::var("SUPABASE_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3);

        let connect_timeout_secs: u64 = std::env::var("SUPABASE_CONNECT_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5);

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            timeout: Duration::from_secs(timeout_secs),
            connect_timeout: Duration::from_secs(connect_timeout_secs),
        })
    }
}

// =============================================================================
// Client
// =============================================================================

/// Equality filter on one column, rendered as `column=eq.value`.
pub type EqFilter<'a> = (&'a str, &'a str);

/// Supabase PostgREST client.
#[derive(Clone)]
pub struct SupabaseClient {
    pub(crate) http: Client,
    pub(crate) config: SupabaseConfig,
    rest_base: String,
}

impl SupabaseClient {
    /// Create a new Supabase client.
    pub fn new(config: SupabaseConfig) -> SupabaseResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(10)
            .user_agent(concat!("pagereel-supabase/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(SupabaseError::Network)?;

        let rest_base = format!("{}/rest/v1", config.base_url);

        Ok(Self {
            http,
            config,
            rest_base,
        })
    }

    /// Create from environment variables.
    pub fn from_env() -> SupabaseResult<Self> {
        let config = SupabaseConfig::from_env()?;
        Self::new(config)
    }

    /// Build a table URL with optional select/filters/order params.
    fn table_url(
        &self,
        table: &str,
        columns: Option<&str>,
        filters: &[EqFilter<'_>],
        order: Option<&str>,
    ) -> String {
        let mut params: Vec<String> = Vec::new();
        if let Some(cols) = columns {
            params.push(format!("select={}", cols));
        }
        for (column, value) in filters {
            params.push(format!("{}=eq.{}", column, urlencoding::encode(value)));
        }
        if let Some(order) = order {
            params.push(format!("order={}", order));
        }

        let mut url = format!("{}/{}", self.rest_base, table);
        if !params.is_empty() {
            url = format!("{}?{}", url, params.join("&"));
        }
        url
    }

    /// Map a transport error, distinguishing timeouts.
    pub(crate) fn wrap_transport(&self, err: reqwest::Error) -> SupabaseError {
        if err.is_timeout() {
            SupabaseError::Timeout(self.config.timeout.as_secs())
        } else {
            SupabaseError::Network(err)
        }
    }

    // =========================================================================
    // Table Operations
    // =========================================================================

    /// Select rows matching the given equality filters.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        columns: &str,
        filters: &[EqFilter<'_>],
        order: Option<&str>,
    ) -> SupabaseResult<Vec<T>> {
        let url = self.table_url(table, Some(columns), filters, order);

        self.execute_request("select", table, async {
            let response = self
                .http
                .get(&url)
                .header("apikey", &self.config.api_key)
                .bearer_auth(&self.config.api_key)
                .send()
                .await
                .map_err(|e| self.wrap_transport(e))?;
            let status = response.status();

            match status {
                StatusCode::OK => {
                    let rows: Vec<T> = response.json().await?;
                    Ok(rows)
                }
                _ => Err(Self::handle_error_response(status, &url, response).await),
            }
        })
        .await
    }

    /// Insert rows. No representation is requested back.
    pub async fn insert<T: Serialize>(&self, table: &str, rows: &[T]) -> SupabaseResult<()> {
        let url = self.table_url(table, None, &[], None);

        self.execute_request("insert", table, async {
            let response = self
                .http
                .post(&url)
                .header("apikey", &self.config.api_key)
                .bearer_auth(&self.config.api_key)
                .header("Prefer", "return=minimal")
                .json(&rows)
                .send()
                .await
                .map_err(|e| self.wrap_transport(e))?;
            let status = response.status();

            match status {
                StatusCode::OK | StatusCode::CREATED | StatusCode::NO_CONTENT => Ok(()),
                StatusCode::CONFLICT => {
                    let body = response.text().await.unwrap_or_default();
                    Err(SupabaseError::Conflict(format!("{}: {}", table, body)))
                }
                _ => Err(Self::handle_error_response(status, &url, response).await),
            }
        })
        .await
    }

    /// Upsert rows keyed on `on_conflict`, merging duplicates.
    pub async fn upsert<T: Serialize>(
        &self,
        table: &str,
        rows: &[T],
        on_conflict: &str,
    ) -> SupabaseResult<()> {
        let url = format!("{}/{}?on_conflict={}", self.rest_base, table, on_conflict);

        self.execute_request("upsert", table, async {
            let response = self
                .http
                .post(&url)
                .header("apikey", &self.config.api_key)
                .bearer_auth(&self.config.api_key)
                .header("Prefer", "resolution=merge-duplicates,return=minimal")
                .json(&rows)
                .send()
                .await
                .map_err(|e| self.wrap_transport(e))?;
            let status = response.status();

            match status {
                StatusCode::OK | StatusCode::CREATED | StatusCode::NO_CONTENT => Ok(()),
                _ => Err(Self::handle_error_response(status, &url, response).await),
            }
        })
        .await
    }

    /// Delete rows matching the given equality filters. Deleting rows
    /// that are already gone is a no-op.
    pub async fn delete(&self, table: &str, filters: &[EqFilter<'_>]) -> SupabaseResult<()> {
        let url = self.table_url(table, None, filters, None);
        let table_name = table.to_string();

        self.execute_request("delete", table, async {
            let response = self
                .http
                .delete(&url)
                .header("apikey", &self.config.api_key)
                .bearer_auth(&self.config.api_key)
                .send()
                .await
                .map_err(|e| self.wrap_transport(e))?;
            let status = response.status();

            match status {
                StatusCode::OK | StatusCode::NO_CONTENT => {
                    debug!("Deleted matching rows from {}", table_name);
                    Ok(())
                }
                _ => Err(Self::handle_error_response(status, &url, response).await),
            }
        })
        .await
    }

    // =========================================================================
    // Internal Helpers
    // =========================================================================

    /// Execute a request with tracing and metrics.
    pub(crate) async fn execute_request<T, F>(
        &self,
        operation: &str,
        table: &str,
        fut: F,
    ) -> SupabaseResult<T>
    where
        F: std::future::Future<Output = SupabaseResult<T>>,
    {
        let span = info_span!("supabase_request", operation = %operation, table = %table);

        let start = Instant::now();
        let result = fut.instrument(span).await;
        let latency_ms = start.elapsed().as_millis() as f64;

        let status = match &result {
            Ok(_) => 200,
            Err(e) => e.http_status().unwrap_or(500),
        };
        record_request(operation, status, latency_ms);

        result
    }

    pub(crate) async fn handle_error_response(
        status: StatusCode,
        url: &str,
        response: reqwest::Response,
    ) -> SupabaseError {
        let body = response.text().await.unwrap_or_default();
        SupabaseError::from_http_status(status.as_u16(), format!("{} failed: {}", url, body))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_config_from_env_requires_url() {
        std::env::remove_var("SUPABASE_URL");
        let result = SupabaseConfig::from_env();
        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_config_from_env_requires_key() {
        std::env::set_var("SUPABASE_URL", "https://abc.supabase.co");
        std::env::remove_var("SUPABASE_SERVICE_ROLE_KEY");
        std::env::remove_var("SUPABASE_ANON_KEY");
        let result = SupabaseConfig::from_env();
        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_config_default_values() {
        std::env::set_var("SUPABASE_URL", "https://abc.supabase.co/");
        std::env::set_var("SUPABASE_ANON_KEY", "anon-key");
        std::env::remove_var("SUPABASE_SERVICE_ROLE_KEY");
        std::env::remove_var("SUPABASE_TIMEOUT_SECS");
        std::env::remove_var("SUPABASE_CONNECT_TIMEOUT_SECS");

        let config = SupabaseConfig::from_env().unwrap();
        assert_eq!(config.base_url, "https://abc.supabase.co");
        assert_eq!(config.api_key, "anon-key");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_table_url_encodes_filter_values() {
        let client = SupabaseClient::new(SupabaseConfig {
            base_url: "https://abc.supabase.co".to_string(),
            api_key: "k".to_string(),
            timeout: Duration::from_secs(3),
            connect_timeout: Duration::from_secs(5),
        })
        .unwrap();

        let url = client.table_url(
            "assets",
            Some("*"),
            &[("user_id", "user-1"), ("url", "https://x/a.jpg")],
            None,
        );
        assert!(url.starts_with("https://abc.supabase.co/rest/v1/assets?select=*"));
        assert!(url.contains("user_id=eq.user-1"));
        assert!(url.contains("url=eq.https%3A%2F%2Fx%2Fa.jpg"));
    }

    #[test]
    fn test_table_url_with_order() {
        let client = SupabaseClient::new(SupabaseConfig {
            base_url: "https://abc.supabase.co".to_string(),
            api_key: "k".to_string(),
            timeout: Duration::from_secs(3),
            connect_timeout: Duration::from_secs(5),
        })
        .unwrap();

        let url = client.table_url("task", Some("*"), &[], Some("create_time.desc"));
        assert_eq!(
            url,
            "https://abc.supabase.co/rest/v1/task?select=*&order=create_time.desc"
        );
    }
}
