//! 验证码求解结果

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 验证码求解器的输出
///
/// `selected_indices` 是包含目标数字的图片下标。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptchaSolution {
    pub target_number: String,
    pub selected_indices: Vec<usize>,
    pub confidence: f64,
    pub solved_at: DateTime<Utc>,
}

/// 持久化的求解记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptchaRecord {
    pub id: Uuid,
    pub target_number: String,
    pub num_images: usize,
    pub solution: CaptchaSolution,
    pub created_at: DateTime<Utc>,
}

impl CaptchaRecord {
    pub fn new(solution: CaptchaSolution, num_images: usize, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            target_number: solution.target_number.clone(),
            num_images,
            solution,
            created_at: now,
        }
    }
}
