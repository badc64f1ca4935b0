//! 内存版 RecordStore 实现
//!
//! 带主记录标记的实体共用 `PrimarySet`：清除旧主记录和写入
//! 新主记录发生在同一个写锁临界区内，并发读者不可能看到两个
//! 主记录。

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use application::Clock;
use domain::{
    Applicant, ApplicantRepository, Booking, BookingRepository, CaptchaRecord, CaptchaRepository,
    Credential, CredentialRepository, PrimaryRecord, RepositoryError, StatusCheck,
    StatusCheckRepository,
};

/// 带唯一主记录语义的通用内存存储
pub struct PrimarySet<T> {
    records: RwLock<HashMap<Uuid, T>>,
}

impl<T: PrimaryRecord + Clone> PrimarySet<T> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    pub async fn insert(&self, record: T, now: DateTime<Utc>) -> Result<T, RepositoryError> {
        let mut records = self.records.write().await;
        if records.contains_key(&record.record_id()) {
            return Err(RepositoryError::Conflict);
        }
        if record.is_primary() {
            Self::demote_others(&mut records, record.record_id(), now);
        }
        records.insert(record.record_id(), record.clone());
        Ok(record)
    }

    pub async fn update(&self, record: T, now: DateTime<Utc>) -> Result<T, RepositoryError> {
        let mut records = self.records.write().await;
        if !records.contains_key(&record.record_id()) {
            return Err(RepositoryError::NotFound);
        }
        if record.is_primary() {
            Self::demote_others(&mut records, record.record_id(), now);
        }
        records.insert(record.record_id(), record.clone());
        Ok(record)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let mut records = self.records.write().await;
        records.remove(&id).ok_or(RepositoryError::NotFound)?;
        Ok(())
    }

    pub async fn find(&self, id: Uuid) -> Option<T> {
        self.records.read().await.get(&id).cloned()
    }

    pub async fn find_primary(&self) -> Option<T> {
        let records = self.records.read().await;
        records.values().find(|record| record.is_primary()).cloned()
    }

    /// 原子地把指定记录设为唯一主记录
    pub async fn set_primary(&self, id: Uuid, now: DateTime<Utc>) -> Result<T, RepositoryError> {
        let mut records = self.records.write().await;
        if !records.contains_key(&id) {
            return Err(RepositoryError::NotFound);
        }
        for (record_id, record) in records.iter_mut() {
            let should_be_primary = *record_id == id;
            if record.is_primary() != should_be_primary {
                record.set_primary_flag(should_be_primary, now);
            }
        }
        Ok(records
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound)?)
    }

    /// 按创建时间倒序分页
    pub async fn list(&self, skip: usize, limit: usize) -> Vec<T> {
        let records = self.records.read().await;
        let mut items: Vec<T> = records.values().cloned().collect();
        items.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        items.into_iter().skip(skip).take(limit).collect()
    }

    fn demote_others(records: &mut HashMap<Uuid, T>, keep: Uuid, now: DateTime<Utc>) {
        for (record_id, record) in records.iter_mut() {
            if *record_id != keep && record.is_primary() {
                record.set_primary_flag(false, now);
            }
        }
    }
}

impl<T: PrimaryRecord + Clone> Default for PrimarySet<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// 申请人内存仓储
pub struct MemoryApplicantRepository {
    store: PrimarySet<Applicant>,
    clock: Arc<dyn Clock>,
}

impl MemoryApplicantRepository {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            store: PrimarySet::new(),
            clock,
        }
    }
}

#[async_trait]
impl ApplicantRepository for MemoryApplicantRepository {
    async fn insert(&self, applicant: Applicant) -> Result<Applicant, RepositoryError> {
        self.store.insert(applicant, self.clock.now()).await
    }

    async fn update(&self, applicant: Applicant) -> Result<Applicant, RepositoryError> {
        self.store.update(applicant, self.clock.now()).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.store.delete(id).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Applicant>, RepositoryError> {
        Ok(self.store.find(id).await)
    }

    async fn find_primary(&self) -> Result<Option<Applicant>, RepositoryError> {
        Ok(self.store.find_primary().await)
    }

    async fn list(&self, skip: usize, limit: usize) -> Result<Vec<Applicant>, RepositoryError> {
        Ok(self.store.list(skip, limit).await)
    }
}

/// 登录凭据内存仓储
pub struct MemoryCredentialRepository {
    store: PrimarySet<Credential>,
    clock: Arc<dyn Clock>,
}

impl MemoryCredentialRepository {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            store: PrimarySet::new(),
            clock,
        }
    }
}

#[async_trait]
impl CredentialRepository for MemoryCredentialRepository {
    async fn insert(&self, credential: Credential) -> Result<Credential, RepositoryError> {
        self.store.insert(credential, self.clock.now()).await
    }

    async fn update(&self, credential: Credential) -> Result<Credential, RepositoryError> {
        self.store.update(credential, self.clock.now()).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.store.delete(id).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Credential>, RepositoryError> {
        Ok(self.store.find(id).await)
    }

    async fn find_primary(&self) -> Result<Option<Credential>, RepositoryError> {
        Ok(self.store.find_primary().await)
    }

    async fn list(&self, skip: usize, limit: usize) -> Result<Vec<Credential>, RepositoryError> {
        Ok(self.store.list(skip, limit).await)
    }

    async fn set_primary(&self, id: Uuid) -> Result<Credential, RepositoryError> {
        self.store.set_primary(id, self.clock.now()).await
    }
}

/// 预约记录内存仓储
pub struct MemoryBookingRepository {
    records: RwLock<Vec<Booking>>,
}

impl MemoryBookingRepository {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }
}

impl Default for MemoryBookingRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookingRepository for MemoryBookingRepository {
    async fn insert(&self, booking: Booking) -> Result<Booking, RepositoryError> {
        self.records.write().await.push(booking.clone());
        Ok(booking)
    }

    async fn list(&self, skip: usize, limit: usize) -> Result<Vec<Booking>, RepositoryError> {
        let records = self.records.read().await;
        let mut items: Vec<Booking> = records.clone();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items.into_iter().skip(skip).take(limit).collect())
    }
}

/// 客户端签到内存仓储
pub struct MemoryStatusCheckRepository {
    records: RwLock<Vec<StatusCheck>>,
}

impl MemoryStatusCheckRepository {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }
}

impl Default for MemoryStatusCheckRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StatusCheckRepository for MemoryStatusCheckRepository {
    async fn insert(&self, check: StatusCheck) -> Result<StatusCheck, RepositoryError> {
        self.records.write().await.push(check.clone());
        Ok(check)
    }

    async fn list(&self) -> Result<Vec<StatusCheck>, RepositoryError> {
        Ok(self.records.read().await.clone())
    }
}

/// 验证码求解记录内存仓储
pub struct MemoryCaptchaRepository {
    records: RwLock<Vec<CaptchaRecord>>,
}

impl MemoryCaptchaRepository {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }
}

impl Default for MemoryCaptchaRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CaptchaRepository for MemoryCaptchaRepository {
    async fn insert(&self, record: CaptchaRecord) -> Result<CaptchaRecord, RepositoryError> {
        self.records.write().await.push(record.clone());
        Ok(record)
    }
}
