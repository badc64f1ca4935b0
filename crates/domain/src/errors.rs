//! 领域模型错误定义
//!
//! 定义了系统中所有可能的错误类型，提供清晰的错误上下文。

use thiserror::Error;

/// 领域模型错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// 字段验证错误
    #[error("invalid argument {field}: {reason}")]
    InvalidArgument { field: String, reason: String },

    /// 没有可用的主登录凭据
    #[error("no primary credential found for automation")]
    NoPrimaryCredential,

    /// 主登录凭据已被停用
    #[error("primary credential is not active")]
    CredentialInactive,

    /// 没有可用的主申请人
    #[error("no primary applicant found for booking")]
    NoPrimaryApplicant,

    /// 预约类别与申根签证历史不匹配
    #[error("category '{category}' does not match the Schengen visa history")]
    CategoryNotEligible {
        category: String,
        recommended: Vec<String>,
    },

    /// 家庭组类别的前置条件不满足
    #[error("family group category not eligible: {reason}")]
    FamilyGroupNotEligible { reason: String },

    /// 已有自动化任务在运行
    #[error("an automation task is already running")]
    AutomationBusy,
}

impl DomainError {
    /// 创建字段验证错误
    pub fn invalid_argument(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// 创建类别不匹配错误
    pub fn category_not_eligible(category: impl Into<String>, recommended: Vec<String>) -> Self {
        Self::CategoryNotEligible {
            category: category.into(),
            recommended,
        }
    }

    /// 创建家庭组前置条件错误
    pub fn family_group_not_eligible(reason: impl Into<String>) -> Self {
        Self::FamilyGroupNotEligible {
            reason: reason.into(),
        }
    }
}

/// 仓储层错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RepositoryError {
    /// 记录不存在
    #[error("record not found")]
    NotFound,

    /// 记录已存在
    #[error("record already exists")]
    Conflict,

    /// 底层存储失败
    #[error("storage failure: {message}")]
    Storage { message: String },
}

impl RepositoryError {
    /// 创建存储失败错误
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}

/// 领域模型结果类型
pub type DomainResult<T> = Result<T, DomainError>;
