//! 仓储端口定义
//!
//! RecordStore 是外部协作者，这里只定义核心需要的 CRUD 契约。
//! 带主记录标记的实体共用 `PrimaryRecord` 抽象：写入主记录时
//! 实现方必须在同一个原子操作里清除旧的主记录。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::entities::{Applicant, Booking, CaptchaRecord, Credential, StatusCheck};
use crate::errors::RepositoryError;

/// 带"唯一主记录"标记的实体
///
/// 任意时刻每种实体最多有一条 `is_primary = true` 的记录。
pub trait PrimaryRecord {
    fn record_id(&self) -> Uuid;
    fn is_primary(&self) -> bool;
    fn set_primary_flag(&mut self, primary: bool, now: DateTime<Utc>);
    fn created_at(&self) -> DateTime<Utc>;
}

impl PrimaryRecord for Applicant {
    fn record_id(&self) -> Uuid {
        self.id
    }

    fn is_primary(&self) -> bool {
        self.is_primary
    }

    fn set_primary_flag(&mut self, primary: bool, now: DateTime<Utc>) {
        self.is_primary = primary;
        self.updated_at = now;
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl PrimaryRecord for Credential {
    fn record_id(&self) -> Uuid {
        self.id
    }

    fn is_primary(&self) -> bool {
        self.is_primary
    }

    fn set_primary_flag(&mut self, primary: bool, now: DateTime<Utc>) {
        self.is_primary = primary;
        self.updated_at = now;
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// 申请人仓储
#[async_trait]
pub trait ApplicantRepository: Send + Sync {
    /// 写入新记录；记录标记为主记录时原子地清除旧的主记录
    async fn insert(&self, applicant: Applicant) -> Result<Applicant, RepositoryError>;
    /// 更新已有记录；主记录语义同 `insert`
    async fn update(&self, applicant: Applicant) -> Result<Applicant, RepositoryError>;
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Applicant>, RepositoryError>;
    async fn find_primary(&self) -> Result<Option<Applicant>, RepositoryError>;
    /// 按创建时间倒序分页
    async fn list(&self, skip: usize, limit: usize) -> Result<Vec<Applicant>, RepositoryError>;
}

/// 登录凭据仓储
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    async fn insert(&self, credential: Credential) -> Result<Credential, RepositoryError>;
    async fn update(&self, credential: Credential) -> Result<Credential, RepositoryError>;
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Credential>, RepositoryError>;
    async fn find_primary(&self) -> Result<Option<Credential>, RepositoryError>;
    async fn list(&self, skip: usize, limit: usize) -> Result<Vec<Credential>, RepositoryError>;
    /// 原子地把指定记录设为唯一主记录
    async fn set_primary(&self, id: Uuid) -> Result<Credential, RepositoryError>;
}

/// 预约记录仓储
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn insert(&self, booking: Booking) -> Result<Booking, RepositoryError>;
    async fn list(&self, skip: usize, limit: usize) -> Result<Vec<Booking>, RepositoryError>;
}

/// 客户端签到仓储
#[async_trait]
pub trait StatusCheckRepository: Send + Sync {
    async fn insert(&self, check: StatusCheck) -> Result<StatusCheck, RepositoryError>;
    async fn list(&self) -> Result<Vec<StatusCheck>, RepositoryError>;
}

/// 验证码求解记录仓储，只追加
#[async_trait]
pub trait CaptchaRepository: Send + Sync {
    async fn insert(&self, record: CaptchaRecord) -> Result<CaptchaRecord, RepositoryError>;
}
