//! 不重复抽样

use std::collections::HashSet;

use tracing::warn;

use crate::infrastructure::RandomSource;

/// 从 `pool` 中均匀抽取 `k` 个不重复位置上的元素
///
/// 反复抽取 `[0, pool.len())` 内的随机下标，已选过的下标丢弃，直到凑满 `k` 个。
/// `pool.len() < k` 时返回空列表。不修改 `pool`。
///
/// # 返回
/// 按抽中顺序排列的元素副本
pub fn sample<T: Clone>(pool: &[T], k: usize, rng: &dyn RandomSource) -> Vec<T> {
    if pool.len() < k {
        return Vec::new();
    }

    let mut chosen: Vec<usize> = Vec::with_capacity(k);
    let mut seen: HashSet<usize> = HashSet::with_capacity(k);

    while chosen.len() < k {
        // 前置检查已排除这种情况，这里只是兜底
        if seen.len() >= pool.len() {
            warn!("抽样下标已耗尽 ({} / {})，提前结束", seen.len(), pool.len());
            break;
        }
        let index = rng.index_below(pool.len());
        if seen.insert(index) {
            chosen.push(index);
        }
    }

    chosen.into_iter().map(|i| pool[i].clone()).collect()
}
