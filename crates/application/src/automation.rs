//! 自动化协作者端口
//!
//! 真实的浏览器自动化和验证码识别是可插拔的外部服务，
//! 这里只定义契约。当前由 infrastructure 提供模拟实现。

use async_trait::async_trait;
use domain::{Applicant, CaptchaSolution, Credential, VisaBookingRequest};
use thiserror::Error;

/// 自动化协作者错误
#[derive(Debug, Error)]
pub enum AutomationError {
    #[error("booking automation failed: {0}")]
    Booking(String),

    #[error("captcha solving failed: {0}")]
    Captcha(String),
}

impl AutomationError {
    pub fn booking(message: impl Into<String>) -> Self {
        Self::Booking(message.into())
    }

    pub fn captcha(message: impl Into<String>) -> Self {
        Self::Captcha(message.into())
    }
}

/// 预约自动化端口
///
/// 执行可能耗时很长，调用方必须能安全重试；实现不得修改
/// 传入的请求和实体。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingAutomation: Send + Sync {
    async fn perform_booking(
        &self,
        request: &VisaBookingRequest,
        applicant: &Applicant,
        credential: &Credential,
    ) -> Result<(), AutomationError>;
}

/// 验证码求解端口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CaptchaSolver: Send + Sync {
    async fn solve(
        &self,
        target_number: &str,
        images: &[String],
    ) -> Result<CaptchaSolution, AutomationError>;
}
