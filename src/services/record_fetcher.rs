//! 记录抓取服务 - 业务能力层
//!
//! 只负责"按 ID 取一条游戏记录"能力，不缓存，不关心流程

use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::{StatusCode, Url};
use tracing::{debug, error, warn};

use crate::error::FetchError;
use crate::models::game::GameRecord;

/// 单条记录抓取
///
/// 职责：
/// - 每次调用都是一次新的上游请求
/// - 上游"不存在"映射为 `FetchError::NotFound`
/// - 其他失败映射为 `FetchError::Transient`
pub trait RecordFetcher: Send + Sync {
    fn fetch<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<GameRecord, FetchError>>;
}

/// 通过 HTTP 接口抓取记录
pub struct HttpRecordFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRecordFetcher {
    /// 创建新的抓取服务
    ///
    /// # 参数
    /// - `base_url`: 接口前缀，请求地址为 `{base_url}/{id}`
    /// - `timeout`: 单次请求超时
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// 使用已有的客户端
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// 拼接记录地址，ID 作为单个路径段编码
    fn record_url(&self, id: &str) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| FetchError::transient(id, format!("接口地址无效: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| FetchError::transient(id, "接口地址无法追加路径"))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    async fn fetch_record(&self, id: &str) -> Result<GameRecord, FetchError> {
        // "." 与 ".." 无法作为路径段表达
        if matches!(id, "" | "." | "..") {
            return Err(FetchError::NotFound { id: id.to_string() });
        }

        let url = self.record_url(id)?;
        debug!("抓取游戏记录: {}", url);

        let response = self
            .client
            .get(url)
            .header(reqwest::header::CACHE_CONTROL, "no-store")
            .send()
            .await
            .map_err(|e| FetchError::transient(id, e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound { id: id.to_string() });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("ID {} 错误响应: {}", id, body);
            return Err(FetchError::transient(id, format!("状态码 {}", status)));
        }

        let record: GameRecord = response
            .json()
            .await
            .map_err(|e| FetchError::transient(id, format!("响应解析失败: {}", e)))?;

        if record.id.is_empty() {
            return Err(FetchError::transient(id, "记录结构无效 (缺少 id)"));
        }

        Ok(record)
    }
}

impl RecordFetcher for HttpRecordFetcher {
    fn fetch<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<GameRecord, FetchError>> {
        async move {
            let result = self.fetch_record(id).await;
            log_outcome(&result);
            result
        }
        .boxed()
    }
}

/// 按结果类型分别记录日志
pub fn log_outcome(result: &Result<GameRecord, FetchError>) {
    match result {
        Ok(record) => debug!("✓ 获取到游戏: {}", record),
        Err(e @ FetchError::NotFound { .. }) => warn!("⚠️ {}", e),
        Err(e @ FetchError::Transient { .. }) => error!("❌ {}", e),
    }
}
