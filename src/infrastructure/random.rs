//! 随机源 - 基础设施层
//!
//! 抽样和平局判定都从这里取随机数，测试中可注入固定种子

use rand::rngs::OsRng;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::Mutex;

/// 均匀随机源
pub trait RandomSource: Send + Sync {
    /// 返回 `[0, upper)` 内均匀分布的下标，`upper` 为 0 时返回 0
    fn index_below(&self, upper: usize) -> usize;

    /// 公平硬币
    fn coin_flip(&self) -> bool {
        self.index_below(2) == 0
    }
}

/// 操作系统提供的密码学安全随机源
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn index_below(&self, upper: usize) -> usize {
        if upper <= 1 {
            return 0;
        }
        OsRng.gen_range(0..upper)
    }
}

/// 固定种子的随机源，结果可复现
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<ChaCha8Rng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn index_below(&self, upper: usize) -> usize {
        if upper <= 1 {
            return 0;
        }
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen_range(0..upper)
    }
}
