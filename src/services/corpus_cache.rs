//! 语料缓存服务 - 业务能力层
//!
//! 持有进程内唯一的 ID 语料缓存，按有效期从对象存储刷新
//!
//! ## 行为
//!
//! - 缓存有效（`now - fetched_at < ttl`）时直接返回
//! - 过期或不存在时同步刷新，刷新成功才整体替换
//! - 刷新失败但有旧数据时返回旧数据（只记录日志）
//! - 从未成功加载过时刷新失败会返回错误
//! - 同一时间只允许一个刷新，刷新期间其他请求直接使用旧数据
//! - 冷启动时等待中的请求共享同一次刷新的结果，不会各自重新加载

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, warn};

use crate::error::CorpusError;
use crate::infrastructure::{BlobStore, Clock};
use crate::models::corpus::IdentifierCorpus;
use crate::models::difficulty::Difficulty;

/// 带取回时间的缓存条目
#[derive(Debug)]
pub struct CachedCorpusEntry {
    pub corpus: Arc<IdentifierCorpus>,
    pub fetched_at: DateTime<Utc>,
}

/// 语料缓存
pub struct CorpusCache {
    store: Arc<dyn BlobStore>,
    clock: Arc<dyn Clock>,
    bucket: String,
    key: String,
    ttl: Duration,
    entry: RwLock<Option<Arc<CachedCorpusEntry>>>,
    refresh_lock: Mutex<()>,
    /// 已完成的刷新次数（含失败）
    generation: AtomicU64,
    last_failure: RwLock<Option<String>>,
}

impl CorpusCache {
    /// 创建新的语料缓存（初始为空）
    ///
    /// # 参数
    /// - `store`: 对象存储
    /// - `clock`: 时间来源
    /// - `bucket` / `key`: 语料对象位置
    /// - `ttl`: 缓存有效期
    pub fn new(
        store: Arc<dyn BlobStore>,
        clock: Arc<dyn Clock>,
        bucket: impl Into<String>,
        key: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        Self {
            store,
            clock,
            bucket: bucket.into(),
            key: key.into(),
            ttl,
            entry: RwLock::new(None),
            refresh_lock: Mutex::new(()),
            generation: AtomicU64::new(0),
            last_failure: RwLock::new(None),
        }
    }

    /// 获取不高于给定难度的去重 ID 列表
    pub async fn get_cumulative_ids(&self, difficulty: Difficulty) -> Result<Vec<String>, CorpusError> {
        let corpus = self.corpus().await?;
        let ids = corpus.cumulative_ids(difficulty);
        debug!("难度 {} 及以下共有 {} 个不重复的游戏 ID", difficulty, ids.len());
        Ok(ids)
    }

    /// 获取可用的语料，必要时刷新
    pub async fn corpus(&self) -> Result<Arc<IdentifierCorpus>, CorpusError> {
        let seen_generation = self.generation.load(Ordering::SeqCst);
        let current = self.snapshot().await;
        if let Some(entry) = current.as_ref().filter(|e| self.is_fresh(e)) {
            debug!("使用缓存的语料");
            return Ok(entry.corpus.clone());
        }

        // 已有刷新在进行时，有旧数据就直接用旧数据，否则等待该次刷新的结果
        let _guard = match self.refresh_lock.try_lock() {
            Ok(guard) => guard,
            Err(_) => {
                if let Some(stale) = current {
                    debug!("语料正在刷新，暂时使用过期数据");
                    return Ok(stale.corpus.clone());
                }
                self.refresh_lock.lock().await
            }
        };

        // 等锁期间其他请求已完成一次刷新，直接沿用其结果
        if self.generation.load(Ordering::SeqCst) != seen_generation {
            return match self.snapshot().await {
                Some(entry) => Ok(entry.corpus.clone()),
                None => {
                    let reason = self.last_failure.read().await.clone().unwrap_or_default();
                    debug!("沿用刚结束的刷新结果: 失败");
                    Err(CorpusError::RefreshFailed { reason })
                }
            };
        }

        info!("语料缓存无效或已过期，正在刷新...");
        match self.load_and_swap().await {
            Ok(corpus) => Ok(corpus),
            Err(e) => match self.snapshot().await {
                Some(stale) => {
                    error!("❌ 刷新语料失败: {}", e);
                    warn!(
                        "⚠️ 继续使用 {} 取回的过期语料",
                        stale.fetched_at.format("%Y-%m-%d %H:%M:%S")
                    );
                    Ok(stale.corpus.clone())
                }
                None => {
                    error!("❌ 刷新语料失败且没有可用的缓存: {}", e);
                    Err(e)
                }
            },
        }
    }

    /// 强制刷新
    ///
    /// 只有成功时才替换缓存，失败时原有缓存保持不变。
    pub async fn refresh(&self) -> Result<Arc<IdentifierCorpus>, CorpusError> {
        let _guard = self.refresh_lock.lock().await;
        self.load_and_swap().await
    }

    /// 当前缓存条目（不触发刷新）
    pub async fn snapshot(&self) -> Option<Arc<CachedCorpusEntry>> {
        self.entry.read().await.clone()
    }

    /// 条目是否仍在有效期内
    pub fn is_fresh(&self, entry: &CachedCorpusEntry) -> bool {
        match (self.clock.now() - entry.fetched_at).to_std() {
            Ok(elapsed) => elapsed < self.ttl,
            // 时钟回拨
            Err(_) => true,
        }
    }

    /// 加载一次语料，无论成败都推进刷新代数（调用方须持有 `refresh_lock`）
    async fn load_and_swap(&self) -> Result<Arc<IdentifierCorpus>, CorpusError> {
        let result = self.load().await;
        match &result {
            Ok(corpus) => {
                let entry = Arc::new(CachedCorpusEntry {
                    corpus: corpus.clone(),
                    fetched_at: self.clock.now(),
                });
                *self.entry.write().await = Some(entry);
                *self.last_failure.write().await = None;
            }
            Err(e) => *self.last_failure.write().await = Some(e.to_string()),
        }
        self.generation.fetch_add(1, Ordering::SeqCst);
        result
    }

    async fn load(&self) -> Result<Arc<IdentifierCorpus>, CorpusError> {
        let location = self.store.describe(&self.bucket, &self.key);
        info!("📥 正在从 {} 获取语料", location);

        let bytes = self
            .store
            .get(&self.bucket, &self.key)
            .await
            .map_err(CorpusError::Unavailable)?;
        let corpus = Arc::new(IdentifierCorpus::from_slice(&bytes).map_err(CorpusError::Malformed)?);

        let (easy, normal, hard) = corpus.counts();
        info!(
            "✓ 语料已更新 (生成时间: {}) easy={} normal={} hard={}",
            corpus.updated_at, easy, normal, hard
        );
        Ok(corpus)
    }
}
