//! 应用层错误定义

use domain::{DomainError, RepositoryError};
use thiserror::Error;

use crate::automation::AutomationError;

/// 应用层错误类型
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 领域层错误
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// 仓储层错误
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// 自动化协作者错误
    #[error("automation error: {0}")]
    Automation(#[from] AutomationError),
}

/// 应用层结果类型
pub type ApplicationResult<T> = Result<T, ApplicationError>;
