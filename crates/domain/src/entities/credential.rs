//! BLS 登录凭据实体定义
//!
//! 自动化流程使用主凭据登录 BLS 门户，系统中最多有一个主凭据。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::applicant::validate_email;
use crate::errors::{DomainError, DomainResult};

/// 凭据的可编辑字段，创建和更新共用
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialProfile {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// 登录凭据实体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// 唯一ID
    pub id: Uuid,
    pub email: String,
    /// 登录密码（敏感信息，不对外序列化）
    #[serde(skip_serializing, default)]
    pub password: String,
    /// 是否为当前主凭据（全局最多一个）
    pub is_primary: bool,
    /// 停用的凭据不参与自动化
    pub is_active: bool,
    pub last_used: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Credential {
    /// 创建新凭据
    pub fn new(profile: CredentialProfile, now: DateTime<Utc>) -> DomainResult<Self> {
        validate_credential(&profile)?;

        Ok(Self {
            id: Uuid::new_v4(),
            email: profile.email,
            password: profile.password,
            is_primary: profile.is_primary,
            is_active: profile.is_active,
            last_used: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// 应用更新后的字段
    pub fn apply(&mut self, profile: CredentialProfile, now: DateTime<Utc>) -> DomainResult<()> {
        validate_credential(&profile)?;

        self.email = profile.email;
        self.password = profile.password;
        self.is_primary = profile.is_primary;
        self.is_active = profile.is_active;
        self.updated_at = now;
        Ok(())
    }

    /// 记录一次登录测试
    pub fn mark_used(&mut self, now: DateTime<Utc>) {
        self.last_used = Some(now);
        self.updated_at = now;
    }
}

fn validate_credential(profile: &CredentialProfile) -> DomainResult<()> {
    validate_email(&profile.email)?;

    if profile.password.is_empty() {
        return Err(DomainError::invalid_argument(
            "password",
            "password cannot be empty",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> CredentialProfile {
        CredentialProfile {
            email: "portal@example.com".to_string(),
            password: "s3cret!".to_string(),
            is_primary: true,
            is_active: true,
        }
    }

    #[test]
    fn test_credential_creation() {
        let credential = Credential::new(profile(), Utc::now()).unwrap();
        assert!(credential.is_primary);
        assert!(credential.is_active);
        assert!(credential.last_used.is_none());
    }

    #[test]
    fn test_credential_validation() {
        let now = Utc::now();

        let mut bad = profile();
        bad.email = "not-an-email".to_string();
        assert!(Credential::new(bad, now).is_err());

        let mut bad = profile();
        bad.password = String::new();
        assert!(Credential::new(bad, now).is_err());
    }

    #[test]
    fn test_credential_mark_used() {
        let created = Utc::now();
        let mut credential = Credential::new(profile(), created).unwrap();

        let later = created + chrono::Duration::seconds(3);
        credential.mark_used(later);
        assert_eq!(credential.last_used, Some(later));
        assert_eq!(credential.updated_at, later);
    }

    #[test]
    fn test_password_not_serialized() {
        let credential = Credential::new(profile(), Utc::now()).unwrap();
        let json = serde_json::to_string(&credential).unwrap();
        assert!(!json.contains("s3cret!"));
        assert!(!json.contains("password"));
    }
}
