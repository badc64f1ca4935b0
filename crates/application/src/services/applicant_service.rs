//! 申请人用例服务
//!
//! 每次实体变更都会通过通知中心广播对应事件。

use std::sync::Arc;

use domain::{Applicant, ApplicantProfile, ApplicantRepository, NotificationEvent, RepositoryError};
use uuid::Uuid;

use crate::{clock::Clock, errors::ApplicationError, hub::EventBroadcaster};

pub struct ApplicantServiceDependencies {
    pub applicant_repository: Arc<dyn ApplicantRepository>,
    pub broadcaster: Arc<dyn EventBroadcaster>,
    pub clock: Arc<dyn Clock>,
}

pub struct ApplicantService {
    deps: ApplicantServiceDependencies,
}

impl ApplicantService {
    pub fn new(deps: ApplicantServiceDependencies) -> Self {
        Self { deps }
    }

    pub async fn create(&self, profile: ApplicantProfile) -> Result<Applicant, ApplicationError> {
        let applicant = Applicant::new(profile, self.deps.clock.now())?;
        let stored = self.deps.applicant_repository.insert(applicant).await?;

        self.deps
            .broadcaster
            .broadcast(NotificationEvent::ApplicantCreated(stored.clone()))
            .await;

        Ok(stored)
    }

    pub async fn list(&self, skip: usize, limit: usize) -> Result<Vec<Applicant>, ApplicationError> {
        Ok(self.deps.applicant_repository.list(skip, limit).await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<Applicant, ApplicationError> {
        self.deps
            .applicant_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::Repository(RepositoryError::NotFound))
    }

    pub async fn update(
        &self,
        id: Uuid,
        profile: ApplicantProfile,
    ) -> Result<Applicant, ApplicationError> {
        let mut applicant = self.get(id).await?;
        applicant.apply(profile, self.deps.clock.now())?;

        let stored = self.deps.applicant_repository.update(applicant).await?;

        self.deps
            .broadcaster
            .broadcast(NotificationEvent::ApplicantUpdated(stored.clone()))
            .await;

        Ok(stored)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ApplicationError> {
        self.deps.applicant_repository.delete(id).await?;

        self.deps
            .broadcaster
            .broadcast(NotificationEvent::ApplicantDeleted { id })
            .await;

        Ok(())
    }

    /// 当前主申请人，没有则返回 None
    pub async fn primary(&self) -> Result<Option<Applicant>, ApplicationError> {
        Ok(self.deps.applicant_repository.find_primary().await?)
    }
}
