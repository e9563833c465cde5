//! 应用入口 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：校验配置、创建对象存储 / 抓取服务 / 语料缓存 / 出题流程
//! 2. **预热**：启动时尝试加载一次语料，失败只记录日志
//! 3. **对外服务**：挂载 HTTP 路由并监听，Ctrl-C 时优雅退出

use std::sync::Arc;

use axum::Router;
use tracing::{info, warn};

use crate::config::{Config, CorpusStoreKind};
use crate::error::{AppError, AppResult};
use crate::infrastructure::{BlobStore, Clock, FsBlobStore, HttpBlobStore, OsRandom, RandomSource, SystemClock};
use crate::orchestrator::routes::{self, AppState};
use crate::services::{CorpusCache, HttpRecordFetcher, RecordFetcher};
use crate::utils::logging::log_startup;
use crate::workflow::QuestionFlow;

/// 应用主结构
pub struct App {
    config: Config,
    state: AppState,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> AppResult<Self> {
        config.validate()?;
        log_startup(&config);

        let store: Arc<dyn BlobStore> = match config.corpus_store {
            CorpusStoreKind::Http => Arc::new(HttpBlobStore::new(
                &config.corpus_store_url,
                config.corpus_fetch_timeout(),
            )?),
            CorpusStoreKind::Fs => Arc::new(FsBlobStore::new(&config.corpus_store_url)),
        };
        let fetcher: Arc<dyn RecordFetcher> = Arc::new(HttpRecordFetcher::new(
            &config.record_api_base_url,
            config.record_fetch_timeout(),
        )?);

        let state = build_state(&config, store, fetcher, Arc::new(SystemClock), Arc::new(OsRandom));

        // 预热失败不影响启动，首个请求会再次尝试
        if let Err(e) = state.flow.corpus().refresh().await {
            warn!("⚠️ 启动时加载语料失败: {}", e);
        }

        Ok(Self { config, state })
    }

    /// 构建路由
    pub fn router(&self) -> Router {
        routes::router(self.state.clone())
    }

    /// 运行 HTTP 服务直到收到退出信号
    pub async fn run(self) -> AppResult<()> {
        let listener = tokio::net::TcpListener::bind(&self.config.bind_addr)
            .await
            .map_err(|source| AppError::Bind {
                addr: self.config.bind_addr.clone(),
                source,
            })?;
        info!("✓ 服务已启动: http://{}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("👋 服务已停止");
        Ok(())
    }
}

/// 组装路由状态
///
/// 所有外部依赖都从参数注入，测试时可替换。
pub fn build_state(
    config: &Config,
    store: Arc<dyn BlobStore>,
    fetcher: Arc<dyn RecordFetcher>,
    clock: Arc<dyn Clock>,
    rng: Arc<dyn RandomSource>,
) -> AppState {
    let corpus = Arc::new(CorpusCache::new(
        store,
        clock,
        config.corpus_bucket.clone(),
        config.corpus_key.clone(),
        config.corpus_ttl(),
    ));
    let flow = QuestionFlow::new(config, corpus, fetcher, rng);

    AppState {
        flow: Arc::new(flow),
        default_difficulty: config.default_difficulty,
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("⚠️ 无法监听退出信号: {}", e);
        std::future::pending::<()>().await;
    }
    info!("收到退出信号，正在停止服务...");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_initialize_rejects_invalid_config() {
        let config = Config {
            max_attempts: 0,
            ..Config::default()
        };
        let result = App::initialize(config).await;
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[tokio::test]
    async fn test_initialize_survives_missing_corpus() {
        // 本地目录不存在时预热失败，但应用仍可启动
        let config = Config {
            corpus_store: CorpusStoreKind::Fs,
            corpus_store_url: std::env::temp_dir()
                .join(format!("quiz-missing-{}", uuid::Uuid::new_v4()))
                .display()
                .to_string(),
            ..Config::default()
        };
        let app = App::initialize(config).await.unwrap();
        assert!(app.state.flow.corpus().snapshot().await.is_none());
    }

    #[tokio::test]
    async fn test_run_reports_unusable_bind_address() {
        let config = Config {
            bind_addr: "not-an-address".to_string(),
            corpus_store: CorpusStoreKind::Fs,
            corpus_store_url: std::env::temp_dir().display().to_string(),
            ..Config::default()
        };
        let app = App::initialize(config).await.unwrap();
        let err = app.run().await.unwrap_err();
        assert!(matches!(err, AppError::Bind { ref addr, .. } if addr == "not-an-address"));
    }
}
