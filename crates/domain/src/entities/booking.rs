//! 预约请求与预约记录定义

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::eligibility::SchengenHistory;
use crate::errors::{DomainError, DomainResult};

/// 预约对象：个人或家庭
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentFor {
    Individual,
    Family,
}

/// 入站的预约请求，校验后原样写入预约记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisaBookingRequest {
    /// 受理地点，Oran / Algiers
    pub location: String,
    pub visa_type: String,
    pub visa_sub_type: String,
    /// 类别代码，例如 ORAN 2、FAMILY GROUP
    pub category: String,
    pub appointment_for: AppointmentFor,
    #[serde(default = "default_member_count")]
    pub number_of_members: u32,
    /// 缺省时跳过资格校验
    #[serde(default)]
    pub schengen_visa_history: Option<SchengenHistory>,
    #[serde(default)]
    pub has_premium_lounge: bool,
    #[serde(default)]
    pub family_group_eligible: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_member_count() -> u32 {
    1
}

impl VisaBookingRequest {
    /// 基础字段校验，资格校验见 `eligibility::validate_booking`
    pub fn validate(&self) -> DomainResult<()> {
        if self.location.trim().is_empty() {
            return Err(DomainError::invalid_argument(
                "location",
                "location cannot be empty",
            ));
        }

        if self.visa_type.trim().is_empty() {
            return Err(DomainError::invalid_argument(
                "visa_type",
                "visa type cannot be empty",
            ));
        }

        if self.category.trim().is_empty() {
            return Err(DomainError::invalid_argument(
                "category",
                "category cannot be empty",
            ));
        }

        if self.number_of_members == 0 {
            return Err(DomainError::invalid_argument(
                "number_of_members",
                "at least one member is required",
            ));
        }

        Ok(())
    }
}

/// 预约记录状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Completed,
    Failed,
}

/// 预约结果快照，进入记录后不再变化
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDetails {
    pub location: String,
    pub visa_type: String,
    pub visa_sub_type: String,
    pub category: String,
    pub appointment_for: AppointmentFor,
    pub number_of_members: u32,
    pub schengen_history: Option<SchengenHistory>,
    pub premium_lounge: bool,
}

/// 预约记录，每次成功的编排产生一条，之后不可变
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub applicant_id: Uuid,
    pub credential_id: Uuid,
    /// 校验通过的完整请求
    pub booking_request: VisaBookingRequest,
    pub status: BookingStatus,
    pub validation_passed: bool,
    pub created_at: DateTime<Utc>,
    pub booking_details: BookingDetails,
}

impl Booking {
    /// 从校验过的请求构造已完成的预约记录
    pub fn completed(
        applicant_id: Uuid,
        credential_id: Uuid,
        request: VisaBookingRequest,
        now: DateTime<Utc>,
    ) -> Self {
        let booking_details = BookingDetails {
            location: request.location.clone(),
            visa_type: request.visa_type.clone(),
            visa_sub_type: request.visa_sub_type.clone(),
            category: request.category.clone(),
            appointment_for: request.appointment_for,
            number_of_members: request.number_of_members,
            schengen_history: request.schengen_visa_history,
            premium_lounge: request.has_premium_lounge,
        };

        Self {
            id: Uuid::new_v4(),
            applicant_id,
            credential_id,
            booking_request: request,
            status: BookingStatus::Completed,
            validation_passed: true,
            created_at: now,
            booking_details,
        }
    }
}
