//! 系统状态实体定义
//!
//! 整个进程只有一份 SystemStatus，由预约编排服务持有并在
//! 互斥保护下修改。不变量：只有运行中才允许携带任务描述。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 自动化系统的共享状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemStatus {
    pub is_running: bool,
    pub current_task: Option<String>,
    pub last_update: DateTime<Utc>,
}

impl SystemStatus {
    /// 初始空闲状态
    pub fn idle(now: DateTime<Utc>) -> Self {
        Self {
            is_running: false,
            current_task: None,
            last_update: now,
        }
    }

    /// 进入运行状态并记录任务描述
    pub fn begin(&mut self, task: impl Into<String>, now: DateTime<Utc>) {
        self.is_running = true;
        self.current_task = Some(task.into());
        self.last_update = now;
    }

    /// 回到空闲状态
    pub fn reset(&mut self, now: DateTime<Utc>) {
        self.is_running = false;
        self.current_task = None;
        self.last_update = now;
    }
}
