//! 登录凭据用例服务

use std::sync::Arc;

use domain::{
    Credential, CredentialProfile, CredentialRepository, NotificationEvent, RepositoryError,
};
use uuid::Uuid;

use crate::{clock::Clock, errors::ApplicationError, hub::EventBroadcaster};

pub struct CredentialServiceDependencies {
    pub credential_repository: Arc<dyn CredentialRepository>,
    pub broadcaster: Arc<dyn EventBroadcaster>,
    pub clock: Arc<dyn Clock>,
}

pub struct CredentialService {
    deps: CredentialServiceDependencies,
}

impl CredentialService {
    pub fn new(deps: CredentialServiceDependencies) -> Self {
        Self { deps }
    }

    pub async fn create(&self, profile: CredentialProfile) -> Result<Credential, ApplicationError> {
        let credential = Credential::new(profile, self.deps.clock.now())?;
        let stored = self.deps.credential_repository.insert(credential).await?;

        self.deps
            .broadcaster
            .broadcast(NotificationEvent::CredentialCreated(stored.clone()))
            .await;

        Ok(stored)
    }

    pub async fn list(
        &self,
        skip: usize,
        limit: usize,
    ) -> Result<Vec<Credential>, ApplicationError> {
        Ok(self.deps.credential_repository.list(skip, limit).await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<Credential, ApplicationError> {
        self.deps
            .credential_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::Repository(RepositoryError::NotFound))
    }

    pub async fn update(
        &self,
        id: Uuid,
        profile: CredentialProfile,
    ) -> Result<Credential, ApplicationError> {
        let mut credential = self.get(id).await?;
        credential.apply(profile, self.deps.clock.now())?;

        let stored = self.deps.credential_repository.update(credential).await?;

        self.deps
            .broadcaster
            .broadcast(NotificationEvent::CredentialUpdated(stored.clone()))
            .await;

        Ok(stored)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ApplicationError> {
        self.deps.credential_repository.delete(id).await?;

        self.deps
            .broadcaster
            .broadcast(NotificationEvent::CredentialDeleted { id })
            .await;

        Ok(())
    }

    /// 当前主凭据，没有则返回 None
    pub async fn primary(&self) -> Result<Option<Credential>, ApplicationError> {
        Ok(self.deps.credential_repository.find_primary().await?)
    }

    /// 原子地切换主凭据
    pub async fn set_primary(&self, id: Uuid) -> Result<Credential, ApplicationError> {
        let stored = self.deps.credential_repository.set_primary(id).await?;

        self.deps
            .broadcaster
            .broadcast(NotificationEvent::CredentialUpdated(stored.clone()))
            .await;

        Ok(stored)
    }

    /// 登录测试，目前只记录使用时间
    pub async fn test_credential(&self, id: Uuid) -> Result<Credential, ApplicationError> {
        let mut credential = self.get(id).await?;
        credential.mark_used(self.deps.clock.now());

        let stored = self.deps.credential_repository.update(credential).await?;

        self.deps
            .broadcaster
            .broadcast(NotificationEvent::CredentialUpdated(stored.clone()))
            .await;

        Ok(stored)
    }
}
