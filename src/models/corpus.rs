use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::difficulty::Difficulty;

/// 按难度分级的游戏 ID 语料
///
/// 由离线任务整体生成，缓存刷新时整体替换。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierCorpus {
    /// 语料生成时间（原样保留）
    #[serde(rename = "updatedAt", default)]
    pub updated_at: String,
    #[serde(default)]
    pub ids: CorpusIds,
}

/// 三个互不重叠的分级列表，缺失的列表视为空
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusIds {
    #[serde(default)]
    pub easy: Vec<String>,
    #[serde(default)]
    pub normal: Vec<String>,
    #[serde(default)]
    pub hard: Vec<String>,
}

impl IdentifierCorpus {
    /// 从 JSON 字节解析语料
    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }

    /// 单个等级的 ID 列表
    pub fn tier(&self, difficulty: Difficulty) -> &[String] {
        match difficulty {
            Difficulty::Easy => &self.ids.easy,
            Difficulty::Normal => &self.ids.normal,
            Difficulty::Hard => &self.ids.hard,
        }
    }

    /// 不高于给定难度的所有 ID，保持原有顺序并去重
    pub fn cumulative_ids(&self, difficulty: Difficulty) -> Vec<String> {
        let mut seen = HashSet::new();
        difficulty
            .cumulative()
            .iter()
            .flat_map(|d| self.tier(*d))
            .filter(|id| seen.insert(id.as_str()))
            .cloned()
            .collect()
    }

    /// 各等级的数量 (easy, normal, hard)
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.ids.easy.len(), self.ids.normal.len(), self.ids.hard.len())
    }
}
