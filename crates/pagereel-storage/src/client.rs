//! COS client implementation over the S3-compatible API.

use std::path::Path;
use std::time::Duration;

use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_s3::config::timeout::TimeoutConfig;
use aws_sdk_s3::config::{Builder, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use tracing::{debug, info};

use pagereel_models::AssetKind;

use crate::error::{StorageError, StorageResult};
use crate::keys;

/// Configuration for the COS client.
#[derive(Debug, Clone)]
pub struct CosConfig {
    /// Secret id (access key)
    pub secret_id: String,
    /// Secret key
    pub secret_key: String,
    /// Bucket name, including the appid suffix COS assigns
    pub bucket: String,
    /// Region, e.g. "ap-guangzhou"
    pub region: String,
    /// Session token for temporary credentials
    pub security_token: Option<String>,
    /// Upload timeout
    pub upload_timeout: Duration,
}

impl CosConfig {
    /// Create config from environment variables.
    pub fn from_env() -> StorageResult<Self> {
        let upload_timeout_secs: u64 = std::env::var("COS_UPLOAD_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);

        Ok(Self {
            secret_id: std::env::var("COS_SECRET_ID")
                .map_err(|_| StorageError::config_error("COS_SECRET_ID not set"))?,
            secret_key: std::env::var("COS_SECRET_KEY")
                .map_err(|_| StorageError::config_error("COS_SECRET_KEY not set"))?,
            bucket: std::env::var("COS_BUCKET")
                .map_err(|_| StorageError::config_error("COS_BUCKET not set"))?,
            region: std::env::var("COS_REGION").unwrap_or_else(|_| "ap-guangzhou".to_string()),
            security_token: std::env::var("COS_SECURITY_TOKEN").ok(),
            upload_timeout: Duration::from_secs(upload_timeout_secs),
        })
    }

    /// S3-compatible service endpoint for the region.
    pub fn endpoint_url(&self) -> String {
        format!("https://cos.{}.myqcloud.com", self.region)
    }
}

/// Tencent COS storage client.
#[derive(Clone)]
pub struct CosClient {
    client: Client,
    bucket: String,
    region: String,
}

impl CosClient {
    /// Create a new COS client from configuration.
    pub async fn new(config: CosConfig) -> StorageResult<Self> {
        let credentials = Credentials::new(
            &config.secret_id,
            &config.secret_key,
            config.security_token.clone(),
            None,
            "cos",
        );

        let timeouts = TimeoutConfig::builder()
            .operation_timeout(config.upload_timeout)
            .build();

        let sdk_config = Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .endpoint_url(config.endpoint_url())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .timeout_config(timeouts)
            .force_path_style(true)
            .build();

        let client = Client::from_conf(sdk_config);

        Ok(Self {
            client,
            bucket: config.bucket,
            region: config.region,
        })
    }

    /// Create from environment variables.
    pub async fn from_env() -> StorageResult<Self> {
        let config = CosConfig::from_env()?;
        Self::new(config).await
    }

    /// Key for a fresh upload of the given kind.
    pub fn object_key(kind: AssetKind, filename: &str) -> String {
        keys::object_key(kind, filename)
    }

    /// Public URL of an object in this bucket.
    pub fn public_url(&self, key: &str) -> String {
        keys::public_url(&self.bucket, &self.region, key)
    }

    /// Upload bytes and return the public URL of the object.
    pub async fn upload_bytes(
        &self,
        data: Vec<u8>,
        key: &str,
        content_type: &str,
    ) -> StorageResult<String> {
        debug!("Uploading {} bytes to {}", data.len(), key);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(data))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| StorageError::upload_failed(e.to_string()))?;

        Ok(self.public_url(key))
    }

    /// Upload a file and return the public URL of the object.
    pub async fn upload_file(
        &self,
        path: impl AsRef<Path>,
        key: &str,
        content_type: &str,
    ) -> StorageResult<String> {
        let path = path.as_ref();
        debug!("Uploading {} to {}", path.display(), key);

        let body = ByteStream::from_path(path)
            .await
            .map_err(|e| StorageError::upload_failed(e.to_string()))?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(body)
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| StorageError::upload_failed(e.to_string()))?;

        info!("Uploaded {} to {}", path.display(), key);
        Ok(self.public_url(key))
    }

    /// Delete an object.
    pub async fn delete_object(&self, key: &str) -> StorageResult<()> {
        debug!("Deleting {}", key);

        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::delete_failed(e.to_string()))?;

        Ok(())
    }

    /// Check if an object exists.
    pub async fn exists(&self, key: &str) -> StorageResult<bool> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e) => {
                if e.to_string().contains("NotFound") || e.to_string().contains("NoSuchKey") {
                    Ok(false)
                } else {
                    Err(StorageError::AwsSdk(e.to_string()))
                }
            }
        }
    }

    /// Check connectivity to COS by performing a head bucket operation.
    pub async fn check_connectivity(&self) -> StorageResult<()> {
        self.client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .map_err(|e| StorageError::AwsSdk(format!("COS connectivity check failed: {}", e)))?;
        Ok(())
    }
}
