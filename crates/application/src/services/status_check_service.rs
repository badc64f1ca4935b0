//! 客户端签到用例服务

use std::sync::Arc;

use domain::{StatusCheck, StatusCheckRepository};

use crate::{clock::Clock, errors::ApplicationError};

pub struct StatusCheckServiceDependencies {
    pub status_check_repository: Arc<dyn StatusCheckRepository>,
    pub clock: Arc<dyn Clock>,
}

pub struct StatusCheckService {
    deps: StatusCheckServiceDependencies,
}

impl StatusCheckService {
    pub fn new(deps: StatusCheckServiceDependencies) -> Self {
        Self { deps }
    }

    pub async fn record(&self, client_name: String) -> Result<StatusCheck, ApplicationError> {
        let check = StatusCheck::new(client_name, self.deps.clock.now())?;
        Ok(self.deps.status_check_repository.insert(check).await?)
    }

    pub async fn list(&self) -> Result<Vec<StatusCheck>, ApplicationError> {
        Ok(self.deps.status_check_repository.list().await?)
    }
}
