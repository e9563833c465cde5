use thiserror::Error;

use crate::models::difficulty::Difficulty;

/// 应用程序错误类型
///
/// 只覆盖启动和运行服务时的失败；单次请求内的错误由接口层转换为响应。
#[derive(Debug, Error)]
pub enum AppError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 语料存储初始化错误
    #[error("存储错误: {0}")]
    Store(#[from] StoreError),
    /// 记录抓取客户端初始化错误
    #[error("HTTP 客户端初始化失败: {0}")]
    HttpClient(#[from] reqwest::Error),
    /// 监听地址失败
    #[error("无法监听地址 {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    /// 服务运行期间的 IO 错误
    #[error("服务运行失败: {0}")]
    Serve(#[from] std::io::Error),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 配置项取值非法
    #[error("配置项 {field} 非法: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// 对象存储错误
#[derive(Debug, Error)]
pub enum StoreError {
    /// 网络请求失败
    #[error("请求对象失败 ({location}): {source}")]
    RequestFailed {
        location: String,
        #[source]
        source: reqwest::Error,
    },
    /// 返回非成功状态码
    #[error("对象存储返回状态码 {status} ({location})")]
    BadStatus { location: String, status: u16 },
    /// 读取本地文件失败
    #[error("读取对象失败 ({location}): {source}")]
    ReadFailed {
        location: String,
        #[source]
        source: std::io::Error,
    },
}

/// 语料缓存错误（冷启动且刷新失败）
#[derive(Debug, Error)]
pub enum CorpusError {
    /// 取回语料失败
    #[error("无法获取语料: {0}")]
    Unavailable(#[source] StoreError),
    /// 语料 JSON 解析失败
    #[error("语料解析失败: {0}")]
    Malformed(#[source] serde_json::Error),
    /// 等待期间的那次刷新已失败
    #[error("语料刷新失败: {reason}")]
    RefreshFailed { reason: String },
}

/// 单条记录抓取结果中的失败分支
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// 上游明确表示不存在（预期内）
    #[error("记录不存在: {id}")]
    NotFound { id: String },
    /// 超时、状态码异常、响应格式错误等
    #[error("抓取记录失败 ({id}): {reason}")]
    Transient { id: String, reason: String },
}

impl FetchError {
    pub fn transient(id: impl Into<String>, reason: impl ToString) -> Self {
        FetchError::Transient {
            id: id.into(),
            reason: reason.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::NotFound { .. })
    }
}

/// 出题错误
#[derive(Debug, Error)]
pub enum QuizError {
    /// 难度参数缺失或非法（客户端错误）
    #[error("难度参数缺失或非法: {given:?}，可选值: {}", Difficulty::valid_options())]
    InvalidDifficulty { given: Option<String> },
    /// 候选 ID 不足两个
    #[error("难度 {difficulty} 下可用的游戏 ID 不足 ({available} 个)，无法出题")]
    NotEnoughIdentifiers {
        difficulty: Difficulty,
        available: usize,
    },
    /// 重试用尽仍未取到两条有效记录
    #[error("尝试 {attempts} 次后仍未获取到两条有效的游戏数据")]
    Exhausted { attempts: usize },
    /// 语料不可用
    #[error(transparent)]
    Corpus(#[from] CorpusError),
}

impl QuizError {
    /// 是否为客户端输入错误
    pub fn is_client_error(&self) -> bool {
        matches!(self, QuizError::InvalidDifficulty { .. })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
