//! 有界重试

use std::future::Future;

use tracing::warn;

/// 所有尝试均失败
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryExhausted<E> {
    /// 实际尝试次数
    pub attempts: usize,
    /// 最后一次失败的原因
    pub last_error: Option<E>,
}

/// 最多尝试 `max_attempts` 次，返回第一次成功的结果
///
/// # 参数
/// - `max_attempts`: 最大尝试次数，为 0 时不做任何尝试
/// - `attempt`: 每次尝试执行的闭包，参数为尝试序号（从 1 开始）
///
/// # 返回
/// 成功时返回结果，全部失败时返回 `RetryExhausted`
pub async fn retry<T, E, F, Fut>(max_attempts: usize, mut attempt: F) -> Result<T, RetryExhausted<E>>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut last_error = None;

    for n in 1..=max_attempts {
        match attempt(n).await {
            Ok(value) => return Ok(value),
            Err(e) => {
                warn!("第 {}/{} 次尝试失败: {}", n, max_attempts, e);
                last_error = Some(e);
            }
        }
    }

    Err(RetryExhausted {
        attempts: max_attempts,
        last_error,
    })
}
