/// 难度等级
///
/// 按固定顺序排列，难度 N 的候选集合包含所有不高于 N 的等级。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// 简单（排名最靠前的游戏）
    Easy,
    /// 普通
    Normal,
    /// 困难
    Hard,
}

impl Difficulty {
    /// 全部等级，按从低到高的顺序
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    /// 尝试从字符串解析难度（精确匹配）
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// 不高于当前难度的所有等级
    pub fn cumulative(self) -> &'static [Difficulty] {
        match self {
            Difficulty::Easy => &Self::ALL[..1],
            Difficulty::Normal => &Self::ALL[..2],
            Difficulty::Hard => &Self::ALL[..],
        }
    }

    /// 逗号分隔的合法取值，用于错误提示
    pub fn valid_options() -> String {
        Self::ALL
            .iter()
            .map(|d| d.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_names() {
        for d in Difficulty::ALL {
            assert_eq!(Difficulty::parse(d.name()), Some(d));
        }
        assert_eq!(Difficulty::parse("Easy"), None);
        assert_eq!(Difficulty::parse(""), None);
        assert_eq!(Difficulty::parse("expert"), None);
    }

    #[test]
    fn test_cumulative_order() {
        assert_eq!(Difficulty::Easy.cumulative(), &[Difficulty::Easy]);
        assert_eq!(
            Difficulty::Hard.cumulative(),
            &[Difficulty::Easy, Difficulty::Normal, Difficulty::Hard]
        );
        assert_eq!(Difficulty::valid_options(), "easy, normal, hard");
    }
}
