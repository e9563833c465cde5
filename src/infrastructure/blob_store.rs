//! 对象存储 - 基础设施层
//!
//! 只暴露"按 bucket/key 取回字节"的能力，不认识语料格式

use std::path::PathBuf;
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;
use tracing::debug;

use crate::error::StoreError;

/// 只读对象存储
pub trait BlobStore: Send + Sync {
    /// 取回对象的完整内容
    fn get<'a>(&'a self, bucket: &'a str, key: &'a str) -> BoxFuture<'a, Result<Vec<u8>, StoreError>>;

    /// 对象位置描述（用于日志）
    fn describe(&self, bucket: &str, key: &str) -> String;
}

/// 基于 HTTP 的对象存储（兼容 S3 路径风格地址）
pub struct HttpBlobStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBlobStore {
    /// 创建新的 HTTP 对象存储
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, StoreError> {
        let base_url = base_url.into();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| StoreError::RequestFailed {
                location: base_url.clone(),
                source,
            })?;
        Ok(Self::with_client(client, base_url))
    }

    /// 使用已有的客户端
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn object_url(&self, bucket: &str, key: &str) -> String {
        format!("{}/{}/{}", self.base_url, bucket, key.trim_start_matches('/'))
    }

    async fn fetch(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StoreError> {
        let url = self.object_url(bucket, key);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| StoreError::RequestFailed {
                location: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::BadStatus {
                location: url,
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| StoreError::RequestFailed {
                location: url.clone(),
                source,
            })?;
        Ok(bytes.to_vec())
    }
}

impl BlobStore for HttpBlobStore {
    fn get<'a>(&'a self, bucket: &'a str, key: &'a str) -> BoxFuture<'a, Result<Vec<u8>, StoreError>> {
        self.fetch(bucket, key).boxed()
    }

    fn describe(&self, bucket: &str, key: &str) -> String {
        self.object_url(bucket, key)
    }
}

/// 本地目录对象存储，对象路径为 `{root}/{bucket}/{key}`
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn object_path(&self, bucket: &str, key: &str) -> PathBuf {
        self.root.join(bucket).join(key.trim_start_matches('/'))
    }
}

impl BlobStore for FsBlobStore {
    fn get<'a>(&'a self, bucket: &'a str, key: &'a str) -> BoxFuture<'a, Result<Vec<u8>, StoreError>> {
        async move {
            let path = self.object_path(bucket, key);
            debug!("读取 {}", path.display());
            tokio::fs::read(&path)
                .await
                .map_err(|source| StoreError::ReadFailed {
                    location: path.display().to_string(),
                    source,
                })
        }
        .boxed()
    }

    fn describe(&self, bucket: &str, key: &str) -> String {
        self.object_path(bucket, key).display().to_string()
    }
}
