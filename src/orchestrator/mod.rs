//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责组装依赖并对外提供 HTTP 接口，是整个服务的入口。
//!
//! ## 模块划分
//!
//! ### `app` - 应用生命周期
//! - 校验配置、创建各层对象
//! - 预热语料缓存
//! - 监听端口、优雅退出
//!
//! ### `routes` - HTTP 接口
//! - 解析难度参数（非法参数返回 400）
//! - 委托 `QuestionFlow` 出题
//! - 禁止中间层缓存响应
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator (app / routes)
//!     ↓
//! workflow::QuestionFlow (处理单次出题请求)
//!     ↓
//! services (能力层：corpus_cache / record_fetcher / sampler / answer_resolver)
//!     ↓
//! infrastructure (基础设施：BlobStore / Clock / RandomSource)
//! ```

pub mod app;
pub mod routes;

pub use app::{build_state, App};
pub use routes::{router, AppState};
