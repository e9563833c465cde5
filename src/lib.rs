//! # Boardgame Quiz
//!
//! 桌游"哪个评分更高？"比较题生成服务
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有外部资源，只暴露能力
//! - `BlobStore` - 读取语料对象（HTTP 对象存储 / 本地目录）
//! - `Clock` / `RandomSource` - 可注入的时间与随机数
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `CorpusCache` - 按难度提供累积的游戏 ID 集合（带 TTL 缓存）
//! - `RecordFetcher` - 按 ID 抓取单条游戏记录
//! - `sampler` / `answer_resolver` - 抽样与判定正确答案
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一道题"的完整生成流程
//! - `QuestionCtx` - 请求上下文（request_id + difficulty）
//! - `QuestionFlow` - 流程编排（取语料 → 抽样 → 抓取 → 判定）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/app` - 组装依赖、启动 HTTP 服务
//! - `orchestrator/routes` - HTTP 接口
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{Difficulty, GameRecord, IdentifierCorpus, QuizPayload};
pub use orchestrator::App;
pub use workflow::{QuestionCtx, QuestionFlow};
