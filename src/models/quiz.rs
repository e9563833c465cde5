use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::game::GameRecord;

/// 二选一比较题
///
/// `correct_answer_id` 一定是 `game_a` 或 `game_b` 的 ID。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizPayload {
    pub question_text: String,
    pub game_a: GameRecord,
    pub game_b: GameRecord,
    pub correct_answer_id: String,
    /// 请求关联 ID
    pub request_id: Uuid,
}

impl QuizPayload {
    /// 正确答案对应的记录
    pub fn winner(&self) -> &GameRecord {
        if self.correct_answer_id == self.game_a.id {
            &self.game_a
        } else {
            &self.game_b
        }
    }
}
