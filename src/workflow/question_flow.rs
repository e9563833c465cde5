//! 出题流程 - 流程层
//!
//! 核心职责：定义"一道比较题"的完整生成流程
//!
//! 流程顺序：
//! 1. 从语料缓存取得难度对应的 ID 集合（不足 2 个直接失败）
//! 2. 抽取 2 个不同的 ID → 并行抓取两条记录
//! 3. 任一抓取失败则重新抽样，最多尝试 `max_attempts` 次
//! 4. 判定正确答案，组装题目

use std::fmt;
use std::sync::Arc;

use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::{FetchError, QuizError};
use crate::infrastructure::RandomSource;
use crate::models::game::GameRecord;
use crate::models::quiz::QuizPayload;
use crate::services::answer_resolver::resolve;
use crate::services::sampler::sample;
use crate::services::{CorpusCache, RecordFetcher};
use crate::utils::logging::truncate_text;
use crate::utils::retry;
use crate::workflow::question_ctx::QuestionCtx;

/// 单次尝试失败：抽中的 ID 中至少一个没有取到有效记录
#[derive(Debug)]
struct AttemptFailure {
    ctx: String,
    ids: Vec<String>,
    errors: Vec<FetchError>,
}

impl fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reasons: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
        write!(
            f,
            "{} 未能获取 ID {} 的有效数据 ({})",
            self.ctx,
            self.ids.join(", "),
            reasons.join("; ")
        )
    }
}

/// 出题流程
///
/// - 只依赖业务能力（services），不持有网络资源
/// - 重试针对"重新抽样"，不会重复抓取同一对 ID
/// - 失败时不会返回猜测的或不完整的题目
pub struct QuestionFlow {
    corpus: Arc<CorpusCache>,
    fetcher: Arc<dyn RecordFetcher>,
    rng: Arc<dyn RandomSource>,
    max_attempts: usize,
    question_text: String,
    verbose_logging: bool,
}

impl QuestionFlow {
    /// 创建新的出题流程
    pub fn new(
        config: &Config,
        corpus: Arc<CorpusCache>,
        fetcher: Arc<dyn RecordFetcher>,
        rng: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            corpus,
            fetcher,
            rng,
            max_attempts: config.max_attempts,
            question_text: config.question_text.clone(),
            verbose_logging: config.verbose_logging,
        }
    }

    pub fn corpus(&self) -> &CorpusCache {
        &self.corpus
    }

    pub fn fetcher(&self) -> &dyn RecordFetcher {
        self.fetcher.as_ref()
    }

    /// 生成一道题
    ///
    /// # 返回
    /// - `QuizError::Corpus`: 语料从未成功加载
    /// - `QuizError::NotEnoughIdentifiers`: 候选 ID 不足 2 个（不会发起任何抓取）
    /// - `QuizError::Exhausted`: 尝试次数用尽
    pub async fn run(&self, ctx: &QuestionCtx) -> Result<QuizPayload, QuizError> {
        let ids = self.corpus.get_cumulative_ids(ctx.difficulty).await?;
        if ids.len() < 2 {
            error!("{} ❌ 可用的游戏 ID 不足: {} 个", ctx, ids.len());
            return Err(QuizError::NotEnoughIdentifiers {
                difficulty: ctx.difficulty,
                available: ids.len(),
            });
        }

        info!("{} 🎲 从 {} 个候选中抽题", ctx, ids.len());

        let pool = ids.as_slice();
        let (game_a, game_b) = retry(self.max_attempts, move |attempt| self.try_pair(ctx, pool, attempt))
            .await
            .map_err(|exhausted| {
                let last = exhausted
                    .last_error
                    .as_ref()
                    .map(|e| e.to_string())
                    .unwrap_or_default();
                error!(
                    "{} ❌ 尝试 {} 次后仍未获取到两条有效的游戏数据 (最后一次: {})",
                    ctx, exhausted.attempts, last
                );
                QuizError::Exhausted {
                    attempts: exhausted.attempts,
                }
            })?;

        let correct_answer_id = resolve(&game_a, &game_b, self.rng.as_ref()).to_string();
        let payload = QuizPayload {
            question_text: self.question_text.clone(),
            game_a,
            game_b,
            correct_answer_id,
            request_id: ctx.request_id,
        };
        info!(
            "{} ✓ 出题完成: {} vs {} → 正确答案 {}",
            ctx,
            truncate_text(payload.game_a.primary_name(), 40),
            truncate_text(payload.game_b.primary_name(), 40),
            payload.winner()
        );

        Ok(payload)
    }

    /// 一次尝试：抽取两个 ID 并并行抓取
    async fn try_pair(
        &self,
        ctx: &QuestionCtx,
        pool: &[String],
        attempt: usize,
    ) -> Result<(GameRecord, GameRecord), AttemptFailure> {
        let picked = sample(pool, 2, self.rng.as_ref());
        if picked.len() < 2 {
            return Err(AttemptFailure {
                ctx: ctx.to_string(),
                ids: picked,
                errors: Vec::new(),
            });
        }

        debug!("{} 第 {} 次尝试: {} / {}", ctx, attempt, picked[0], picked[1]);

        let (result_a, result_b) = tokio::join!(
            self.fetcher.fetch(&picked[0]),
            self.fetcher.fetch(&picked[1])
        );

        match (result_a, result_b) {
            (Ok(a), Ok(b)) => {
                if self.verbose_logging {
                    info!("{}   A: {}", ctx, a);
                    info!("{}   B: {}", ctx, b);
                }
                Ok((a, b))
            }
            (result_a, result_b) => Err(AttemptFailure {
                ctx: ctx.to_string(),
                ids: picked,
                errors: [result_a.err(), result_b.err()].into_iter().flatten().collect(),
            }),
        }
    }
}
