//! 客户端状态签到记录

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};

/// 一次客户端签到
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCheck {
    pub id: Uuid,
    pub client_name: String,
    pub timestamp: DateTime<Utc>,
}

impl StatusCheck {
    pub fn new(client_name: impl Into<String>, now: DateTime<Utc>) -> DomainResult<Self> {
        let client_name = client_name.into();
        if client_name.trim().is_empty() {
            return Err(DomainError::invalid_argument(
                "client_name",
                "client name cannot be empty",
            ));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            client_name,
            timestamp: now,
        })
    }
}
