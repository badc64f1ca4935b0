//! 领域事件定义
//!
//! 每次实体变更和系统状态迁移都会产生一个事件，由通知中心
//! 广播给所有在线观察者。线上格式固定为 `{type, data}`。

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{Applicant, Booking, Credential, SystemStatus};

/// 广播给观察者的通知事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum NotificationEvent {
    ApplicantCreated(Applicant),
    ApplicantUpdated(Applicant),
    ApplicantDeleted { id: Uuid },
    CredentialCreated(Credential),
    CredentialUpdated(Credential),
    CredentialDeleted { id: Uuid },
    SystemStatus(SystemStatus),
    SystemStarted(SystemStatus),
    SystemStopped(SystemStatus),
    BookingCompleted(Booking),
}

impl NotificationEvent {
    /// 事件类型的线上名称
    pub fn event_type(&self) -> &'static str {
        match self {
            NotificationEvent::ApplicantCreated(_) => "applicant_created",
            NotificationEvent::ApplicantUpdated(_) => "applicant_updated",
            NotificationEvent::ApplicantDeleted { .. } => "applicant_deleted",
            NotificationEvent::CredentialCreated(_) => "credential_created",
            NotificationEvent::CredentialUpdated(_) => "credential_updated",
            NotificationEvent::CredentialDeleted { .. } => "credential_deleted",
            NotificationEvent::SystemStatus(_) => "system_status",
            NotificationEvent::SystemStarted(_) => "system_started",
            NotificationEvent::SystemStopped(_) => "system_stopped",
            NotificationEvent::BookingCompleted(_) => "booking_completed",
        }
    }
}
