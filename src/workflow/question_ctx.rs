//! 出题请求上下文
//!
//! 封装"这是哪一次请求、什么难度"这一信息

use std::fmt::Display;

use uuid::Uuid;

use crate::models::difficulty::Difficulty;

/// 出题请求上下文
#[derive(Debug, Clone)]
pub struct QuestionCtx {
    /// 请求关联 ID，写入返回的题目
    pub request_id: Uuid,

    /// 难度
    pub difficulty: Difficulty,
}

impl QuestionCtx {
    /// 为一次新请求创建上下文
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            difficulty,
        }
    }
}

impl Display for QuestionCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[请求 {} 难度 {}]", self.request_id.simple(), self.difficulty)
    }
}
