use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::models::difficulty::Difficulty;

/// 语料存储后端
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorpusStoreKind {
    /// 兼容 S3 的 HTTP 对象地址
    Http,
    /// 本地目录
    Fs,
}

impl CorpusStoreKind {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "http" => Some(CorpusStoreKind::Http),
            "fs" => Some(CorpusStoreKind::Fs),
            _ => None,
        }
    }
}

/// 程序配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP 监听地址
    pub bind_addr: String,
    // --- 记录提供方 ---
    /// 单条游戏记录接口前缀，请求地址为 `{record_api_base_url}/{id}`
    pub record_api_base_url: String,
    /// 单次抓取超时（秒）
    pub record_fetch_timeout_secs: u64,
    // --- 语料存储 ---
    pub corpus_store: CorpusStoreKind,
    /// HTTP 模式下为对象存储地址，fs 模式下为根目录
    pub corpus_store_url: String,
    pub corpus_bucket: String,
    pub corpus_key: String,
    /// 单次读取语料对象超时（秒）
    pub corpus_fetch_timeout_secs: u64,
    /// 语料缓存有效期（秒）
    pub corpus_ttl_secs: u64,
    // --- 出题 ---
    /// 每次出题最多尝试次数
    pub max_attempts: usize,
    /// 未指定难度时使用的难度
    pub default_difficulty: Difficulty,
    pub question_text: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            record_api_base_url: "http://localhost:4000/api/game".to_string(),
            record_fetch_timeout_secs: 10,
            corpus_store: CorpusStoreKind::Http,
            corpus_store_url: "http://localhost:9000".to_string(),
            corpus_bucket: "boardgame-quiz".to_string(),
            corpus_key: "data/game-ids.json".to_string(),
            corpus_fetch_timeout_secs: 10,
            corpus_ttl_secs: 60 * 60,
            max_attempts: 10,
            default_difficulty: Difficulty::Normal,
            question_text: "評価が高いのはどっち？".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 从环境变量读取，未设置或无法解析的项使用默认值
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or(default.bind_addr),
            record_api_base_url: std::env::var("RECORD_API_BASE_URL").unwrap_or(default.record_api_base_url),
            record_fetch_timeout_secs: std::env::var("RECORD_FETCH_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.record_fetch_timeout_secs),
            corpus_store: std::env::var("CORPUS_STORE").ok().and_then(|v| CorpusStoreKind::parse(&v)).unwrap_or(default.corpus_store),
            corpus_store_url: std::env::var("CORPUS_STORE_URL").unwrap_or(default.corpus_store_url),
            corpus_bucket: std::env::var("CORPUS_BUCKET").unwrap_or(default.corpus_bucket),
            corpus_key: std::env::var("CORPUS_KEY").unwrap_or(default.corpus_key),
            corpus_fetch_timeout_secs: std::env::var("CORPUS_FETCH_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.corpus_fetch_timeout_secs),
            corpus_ttl_secs: std::env::var("CORPUS_TTL_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.corpus_ttl_secs),
            max_attempts: std::env::var("MAX_ATTEMPTS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_attempts),
            default_difficulty: std::env::var("DEFAULT_DIFFICULTY").ok().and_then(|v| Difficulty::parse(&v)).unwrap_or(default.default_difficulty),
            question_text: std::env::var("QUESTION_TEXT").unwrap_or(default.question_text),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }

    /// 从 TOML 文件读取，文件中缺失的项使用默认值
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.display().to_string(),
            source,
        })
    }

    /// 从 TOML 文本读取
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// 校验配置
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_attempts",
                reason: "必须大于 0".to_string(),
            });
        }
        if self.corpus_ttl_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "corpus_ttl_secs",
                reason: "必须大于 0".to_string(),
            });
        }
        if self.record_fetch_timeout_secs == 0 || self.corpus_fetch_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: if self.record_fetch_timeout_secs == 0 {
                    "record_fetch_timeout_secs"
                } else {
                    "corpus_fetch_timeout_secs"
                },
                reason: "必须大于 0".to_string(),
            });
        }
        if self.corpus_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "corpus_key",
                reason: "不能为空".to_string(),
            });
        }
        Ok(())
    }

    pub fn corpus_ttl(&self) -> Duration {
        Duration::from_secs(self.corpus_ttl_secs)
    }

    pub fn record_fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.record_fetch_timeout_secs)
    }

    pub fn corpus_fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.corpus_fetch_timeout_secs)
    }
}
