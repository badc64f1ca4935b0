//! 服务单元测试共用的内存仓储与桩实现

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use domain::{
    Applicant, ApplicantRepository, Booking, BookingRepository, CaptchaRecord, CaptchaRepository,
    CaptchaSolution, ApplicantProfile, Credential, CredentialProfile, CredentialRepository,
    PrimaryRecord, RepositoryError, VisaBookingRequest,
};
use uuid::Uuid;

use crate::automation::{AutomationError, BookingAutomation, CaptchaSolver};

pub fn applicant_profile(is_primary: bool) -> ApplicantProfile {
    ApplicantProfile {
        first_name: "Amina".to_string(),
        last_name: "Benali".to_string(),
        email: "amina@example.com".to_string(),
        phone: "+213555000111".to_string(),
        passport_number: "DZ1234567".to_string(),
        nationality: "Algerian".to_string(),
        date_of_birth: "1990-04-12".to_string(),
        is_primary,
    }
}

pub fn credential_profile(is_primary: bool, is_active: bool) -> CredentialProfile {
    CredentialProfile {
        email: "portal@example.com".to_string(),
        password: "s3cret!".to_string(),
        is_primary,
        is_active,
    }
}

fn clear_other_primaries<T: PrimaryRecord>(records: &mut [T], keep: Uuid) {
    let now = Utc::now();
    for record in records.iter_mut() {
        if record.record_id() != keep && record.is_primary() {
            record.set_primary_flag(false, now);
        }
    }
}

#[derive(Default)]
pub struct InMemoryApplicants {
    records: Mutex<Vec<Applicant>>,
}

#[async_trait]
impl ApplicantRepository for InMemoryApplicants {
    async fn insert(&self, applicant: Applicant) -> Result<Applicant, RepositoryError> {
        let mut records = self.records.lock().unwrap();
        if applicant.is_primary {
            clear_other_primaries(&mut records, applicant.id);
        }
        records.push(applicant.clone());
        Ok(applicant)
    }

    async fn update(&self, applicant: Applicant) -> Result<Applicant, RepositoryError> {
        let mut records = self.records.lock().unwrap();
        let position = records
            .iter()
            .position(|record| record.id == applicant.id)
            .ok_or(RepositoryError::NotFound)?;
        if applicant.is_primary {
            clear_other_primaries(&mut records, applicant.id);
        }
        records[position] = applicant.clone();
        Ok(applicant)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|record| record.id != id);
        if records.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Applicant>, RepositoryError> {
        let records = self.records.lock().unwrap();
        Ok(records.iter().find(|record| record.id == id).cloned())
    }

    async fn find_primary(&self) -> Result<Option<Applicant>, RepositoryError> {
        let records = self.records.lock().unwrap();
        Ok(records.iter().find(|record| record.is_primary).cloned())
    }

    async fn list(&self, skip: usize, limit: usize) -> Result<Vec<Applicant>, RepositoryError> {
        let records = self.records.lock().unwrap();
        Ok(records.iter().skip(skip).take(limit).cloned().collect())
    }
}

#[derive(Default)]
pub struct InMemoryCredentials {
    records: Mutex<Vec<Credential>>,
}

#[async_trait]
impl CredentialRepository for InMemoryCredentials {
    async fn insert(&self, credential: Credential) -> Result<Credential, RepositoryError> {
        let mut records = self.records.lock().unwrap();
        if credential.is_primary {
            clear_other_primaries(&mut records, credential.id);
        }
        records.push(credential.clone());
        Ok(credential)
    }

    async fn update(&self, credential: Credential) -> Result<Credential, RepositoryError> {
        let mut records = self.records.lock().unwrap();
        let position = records
            .iter()
            .position(|record| record.id == credential.id)
            .ok_or(RepositoryError::NotFound)?;
        if credential.is_primary {
            clear_other_primaries(&mut records, credential.id);
        }
        records[position] = credential.clone();
        Ok(credential)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|record| record.id != id);
        if records.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Credential>, RepositoryError> {
        let records = self.records.lock().unwrap();
        Ok(records.iter().find(|record| record.id == id).cloned())
    }

    async fn find_primary(&self) -> Result<Option<Credential>, RepositoryError> {
        let records = self.records.lock().unwrap();
        Ok(records.iter().find(|record| record.is_primary).cloned())
    }

    async fn list(&self, skip: usize, limit: usize) -> Result<Vec<Credential>, RepositoryError> {
        let records = self.records.lock().unwrap();
        Ok(records.iter().skip(skip).take(limit).cloned().collect())
    }

    async fn set_primary(&self, id: Uuid) -> Result<Credential, RepositoryError> {
        let mut records = self.records.lock().unwrap();
        if !records.iter().any(|record| record.id == id) {
            return Err(RepositoryError::NotFound);
        }
        let now = Utc::now();
        for record in records.iter_mut() {
            let should = record.id == id;
            if record.is_primary != should {
                record.set_primary_flag(should, now);
            }
        }
        Ok(records
            .iter()
            .find(|record| record.id == id)
            .cloned()
            .expect("record checked above"))
    }
}

#[derive(Default)]
pub struct InMemoryBookings {
    records: Mutex<Vec<Booking>>,
}

#[async_trait]
impl BookingRepository for InMemoryBookings {
    async fn insert(&self, booking: Booking) -> Result<Booking, RepositoryError> {
        self.records.lock().unwrap().push(booking.clone());
        Ok(booking)
    }

    async fn list(&self, skip: usize, limit: usize) -> Result<Vec<Booking>, RepositoryError> {
        let records = self.records.lock().unwrap();
        Ok(records.iter().skip(skip).take(limit).cloned().collect())
    }
}

/// 写入永远失败的预约仓储，用于持久化故障路径
pub struct FailingBookings;

#[async_trait]
impl BookingRepository for FailingBookings {
    async fn insert(&self, _booking: Booking) -> Result<Booking, RepositoryError> {
        Err(RepositoryError::storage("store unavailable"))
    }

    async fn list(&self, _skip: usize, _limit: usize) -> Result<Vec<Booking>, RepositoryError> {
        Err(RepositoryError::storage("store unavailable"))
    }
}

#[derive(Default)]
pub struct InMemoryCaptchas {
    records: Mutex<Vec<CaptchaRecord>>,
}

impl InMemoryCaptchas {
    pub fn count(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl CaptchaRepository for InMemoryCaptchas {
    async fn insert(&self, record: CaptchaRecord) -> Result<CaptchaRecord, RepositoryError> {
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }
}

/// 固定延迟后成功的预约自动化桩
pub struct SlowAutomation {
    pub delay: Duration,
}

#[async_trait]
impl BookingAutomation for SlowAutomation {
    async fn perform_booking(
        &self,
        _request: &VisaBookingRequest,
        _applicant: &Applicant,
        _credential: &Credential,
    ) -> Result<(), AutomationError> {
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}

/// 固定输出的验证码求解桩
pub struct FixedCaptchaSolver;

#[async_trait]
impl CaptchaSolver for FixedCaptchaSolver {
    async fn solve(
        &self,
        target_number: &str,
        _images: &[String],
    ) -> Result<CaptchaSolution, AutomationError> {
        Ok(CaptchaSolution {
            target_number: target_number.to_string(),
            selected_indices: vec![0, 5, 12, 18],
            confidence: 0.95,
            solved_at: Utc::now(),
        })
    }
}
