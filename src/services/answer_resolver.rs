//! 正确答案判定

use tracing::info;

use crate::infrastructure::RandomSource;
use crate::models::game::GameRecord;

/// 判定平均评分较高的一方，返回其 ID
///
/// 评分缺失或无法解析时按 0 处理。完全相同（包括两边都缺失）时随机选择一方。
pub fn resolve<'a>(a: &'a GameRecord, b: &'a GameRecord, rng: &dyn RandomSource) -> &'a str {
    let rating_a = a.average_rating();
    let rating_b = b.average_rating();

    if rating_a > rating_b {
        a.id.as_str()
    } else if rating_b > rating_a {
        b.id.as_str()
    } else {
        let winner = if rng.coin_flip() { a.id.as_str() } else { b.id.as_str() };
        info!("评分相同 ({})，随机选择 {} 作为正确答案", rating_a, winner);
        winner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::{OsRandom, SeededRandom};
    use std::collections::HashSet;

    #[test]
    fn test_higher_average_always_wins() {
        let a = GameRecord::new("A").with_average("7.5");
        let b = GameRecord::new("B").with_average("6.2");
        let rng = OsRandom;
        for _ in 0..100 {
            assert_eq!(resolve(&a, &b, &rng), "A");
            assert_eq!(resolve(&b, &a, &rng), "A");
        }
    }

    #[test]
    fn test_missing_rating_counts_as_zero() {
        let rated = GameRecord::new("rated").with_average("0.1");
        let unrated = GameRecord::new("unrated");
        let garbage = GameRecord::new("garbage").with_average("n/a");
        let rng = SeededRandom::new(5);
        assert_eq!(resolve(&unrated, &rated, &rng), "rated");
        assert_eq!(resolve(&rated, &garbage, &rng), "rated");
    }

    #[test]
    fn test_both_missing_picks_either_side() {
        let a = GameRecord::new("A");
        let b = GameRecord::new("B");
        let rng = OsRandom;
        let winners: HashSet<&str> = (0..200).map(|_| resolve(&a, &b, &rng)).collect();
        assert_eq!(winners, HashSet::from(["A", "B"]));
    }

    /// 总是返回同一个下标
    struct Fixed(usize);

    impl RandomSource for Fixed {
        fn index_below(&self, upper: usize) -> usize {
            self.0.min(upper.saturating_sub(1))
        }
    }

    #[test]
    fn test_exact_tie_follows_random_source() {
        let a = GameRecord::new("A").with_average("8.0");
        let b = GameRecord::new("B").with_average("8");
        assert_eq!(resolve(&a, &b, &Fixed(0)), "A");
        assert_eq!(resolve(&a, &b, &Fixed(1)), "B");
    }
}
