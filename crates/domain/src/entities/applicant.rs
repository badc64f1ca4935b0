//! 申请人实体定义
//!
//! 申请人是自动化预约的目标对象，系统中最多有一个主申请人。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};

/// 申请人的可编辑字段，创建和更新共用
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub passport_number: String,
    pub nationality: String,
    pub date_of_birth: String,
    #[serde(default)]
    pub is_primary: bool,
}

/// 申请人实体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Applicant {
    /// 唯一ID
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub passport_number: String,
    pub nationality: String,
    pub date_of_birth: String,
    /// 是否为当前主申请人（全局最多一个）
    pub is_primary: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Applicant {
    /// 创建新申请人
    pub fn new(profile: ApplicantProfile, now: DateTime<Utc>) -> DomainResult<Self> {
        validate_profile(&profile)?;

        Ok(Self {
            id: Uuid::new_v4(),
            first_name: profile.first_name,
            last_name: profile.last_name,
            email: profile.email,
            phone: profile.phone,
            passport_number: profile.passport_number,
            nationality: profile.nationality,
            date_of_birth: profile.date_of_birth,
            is_primary: profile.is_primary,
            created_at: now,
            updated_at: now,
        })
    }

    /// 应用更新后的字段
    pub fn apply(&mut self, profile: ApplicantProfile, now: DateTime<Utc>) -> DomainResult<()> {
        validate_profile(&profile)?;

        self.first_name = profile.first_name;
        self.last_name = profile.last_name;
        self.email = profile.email;
        self.phone = profile.phone;
        self.passport_number = profile.passport_number;
        self.nationality = profile.nationality;
        self.date_of_birth = profile.date_of_birth;
        self.is_primary = profile.is_primary;
        self.updated_at = now;
        Ok(())
    }
}

fn validate_profile(profile: &ApplicantProfile) -> DomainResult<()> {
    if profile.first_name.trim().is_empty() {
        return Err(DomainError::invalid_argument(
            "first_name",
            "first name cannot be empty",
        ));
    }

    if profile.last_name.trim().is_empty() {
        return Err(DomainError::invalid_argument(
            "last_name",
            "last name cannot be empty",
        ));
    }

    validate_email(&profile.email)?;

    if profile.phone.trim().is_empty() {
        return Err(DomainError::invalid_argument(
            "phone",
            "phone cannot be empty",
        ));
    }

    if profile.passport_number.trim().is_empty() {
        return Err(DomainError::invalid_argument(
            "passport_number",
            "passport number cannot be empty",
        ));
    }

    if profile.nationality.trim().is_empty() {
        return Err(DomainError::invalid_argument(
            "nationality",
            "nationality cannot be empty",
        ));
    }

    if profile.date_of_birth.trim().is_empty() {
        return Err(DomainError::invalid_argument(
            "date_of_birth",
            "date of birth cannot be empty",
        ));
    }

    Ok(())
}

/// 简单的邮箱格式验证
pub(crate) fn validate_email(email: &str) -> DomainResult<()> {
    if email.is_empty() {
        return Err(DomainError::invalid_argument(
            "email",
            "email cannot be empty",
        ));
    }

    if !email.contains('@') || !email.contains('.') {
        return Err(DomainError::invalid_argument(
            "email",
            "email format is invalid",
        ));
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(DomainError::invalid_argument(
            "email",
            "email format is invalid",
        ));
    }

    if email.len() > 255 {
        return Err(DomainError::invalid_argument(
            "email",
            "email cannot exceed 255 characters",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> ApplicantProfile {
        ApplicantProfile {
            first_name: "Amina".to_string(),
            last_name: "Benali".to_string(),
            email: "amina@example.com".to_string(),
            phone: "+213555000111".to_string(),
            passport_number: "DZ1234567".to_string(),
            nationality: "Algerian".to_string(),
            date_of_birth: "1990-04-12".to_string(),
            is_primary: false,
        }
    }

    #[test]
    fn test_applicant_creation() {
        let now = Utc::now();
        let applicant = Applicant::new(profile(), now).unwrap();
        assert_eq!(applicant.first_name, "Amina");
        assert!(!applicant.is_primary);
        assert_eq!(applicant.created_at, now);
        assert_eq!(applicant.updated_at, now);
    }

    #[test]
    fn test_applicant_validation() {
        let now = Utc::now();

        let mut bad = profile();
        bad.first_name = "  ".to_string();
        assert!(Applicant::new(bad, now).is_err());

        let mut bad = profile();
        bad.email = "invalid-email".to_string();
        assert!(Applicant::new(bad, now).is_err());

        let mut bad = profile();
        bad.passport_number = String::new();
        assert!(Applicant::new(bad, now).is_err());
    }

    #[test]
    fn test_applicant_apply_updates_timestamp() {
        let created = Utc::now();
        let mut applicant = Applicant::new(profile(), created).unwrap();

        let later = created + chrono::Duration::seconds(5);
        let mut updated = profile();
        updated.is_primary = true;
        updated.phone = "+213555999888".to_string();
        applicant.apply(updated, later).unwrap();

        assert!(applicant.is_primary);
        assert_eq!(applicant.phone, "+213555999888");
        assert_eq!(applicant.created_at, created);
        assert_eq!(applicant.updated_at, later);
    }

    #[test]
    fn test_applicant_serialization_round_trip() {
        let applicant = Applicant::new(profile(), Utc::now()).unwrap();
        let json = serde_json::to_string(&applicant).unwrap();
        let deserialized: Applicant = serde_json::from_str(&json).unwrap();
        assert_eq!(applicant, deserialized);
    }
}
