use serde::{Deserialize, Serialize};

/// 名称缺失时的显示值
pub const UNKNOWN_GAME_NAME: &str = "Unknown Game";

/// 评分统计缺失时的显示值
pub const MISSING_RATING: &str = "N/A";

/// 桌游记录
///
/// 除 `id` 外所有字段都可能缺失，调用方必须按缺失安全的方式读取。
/// 每次抓取新建，不会被修改。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: String,

    /// 条目类型（如 "boardgame"）
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// 名称变体（有序）
    #[serde(rename = "name", default)]
    pub names: Vec<NameVariant>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "yearpublished", default, skip_serializing_if = "Option::is_none")]
    pub year_published: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<Statistics>,
}

/// 名称变体，如 primary / alternate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameVariant {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratings: Option<Ratings>,
}

/// 评分统计（上游以字符串形式给出的十进制数）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ratings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usersrated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bayesaverage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stddev: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub median: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owned: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trading: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wanting: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wishing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numcomments: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numweights: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub averageweight: Option<String>,
}

/// 可供展示的评分项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingKey {
    /// 平均评分
    Average,
    /// 评分人数
    UsersRated,
    /// 贝叶斯平均
    BayesAverage,
}

impl Ratings {
    fn get(&self, key: RatingKey) -> Option<&str> {
        let value = match key {
            RatingKey::Average => &self.average,
            RatingKey::UsersRated => &self.usersrated,
            RatingKey::BayesAverage => &self.bayesaverage,
        };
        value.as_deref()
    }
}

impl GameRecord {
    /// 创建只有 ID 的记录
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: None,
            thumbnail: None,
            image: None,
            names: Vec::new(),
            description: None,
            year_published: None,
            statistics: None,
        }
    }

    /// 设置平均评分（主要用于构造测试数据）
    pub fn with_average(mut self, average: impl Into<String>) -> Self {
        let ratings = self
            .statistics
            .get_or_insert_with(Statistics::default)
            .ratings
            .get_or_insert_with(Ratings::default);
        ratings.average = Some(average.into());
        self
    }

    /// 追加名称变体
    pub fn with_name(mut self, kind: impl Into<String>, value: impl Into<String>) -> Self {
        self.names.push(NameVariant {
            kind: kind.into(),
            value: value.into(),
        });
        self
    }

    fn ratings(&self) -> Option<&Ratings> {
        self.statistics.as_ref()?.ratings.as_ref()
    }

    /// 获取主名称，没有 primary 变体时返回 "Unknown Game"
    pub fn primary_name(&self) -> &str {
        self.names
            .iter()
            .find(|n| n.kind == "primary")
            .map(|n| n.value.as_str())
            .filter(|v| !v.is_empty())
            .unwrap_or(UNKNOWN_GAME_NAME)
    }

    /// 获取评分项原始值，缺失时返回 "N/A"
    pub fn rating_value(&self, key: RatingKey) -> &str {
        self.ratings()
            .and_then(|r| r.get(key))
            .filter(|v| !v.is_empty())
            .unwrap_or(MISSING_RATING)
    }

    /// 平均评分的数值
    ///
    /// 缺失或无法解析时视为 0。
    pub fn average_rating(&self) -> f64 {
        self.ratings()
            .and_then(|r| r.average.as_deref())
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
    }
}

impl std::fmt::Display for GameRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (#{}) [平均评分: {}]",
            self.primary_name(),
            self.id,
            self.rating_value(RatingKey::Average)
        )
    }
}
