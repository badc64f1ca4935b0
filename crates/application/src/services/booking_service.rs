//! 预约编排服务
//!
//! 持有全局唯一的 SystemStatus，驱动预约状态机：
//! IDLE -> RUNNING -> (COMPLETED | FAILED) -> IDLE。
//! 状态迁移在互斥锁内以检查并设置的方式完成，保证全系统
//! 同一时刻最多只有一个自动化任务在运行。

use std::sync::Arc;

use domain::{
    eligibility, Applicant, ApplicantRepository, Booking, BookingRepository, CaptchaRecord,
    CaptchaRepository, CaptchaSolution, Credential, CredentialRepository, DomainError,
    NotificationEvent, SystemStatus, VisaBookingRequest,
};
use tokio::sync::Mutex;

use crate::{
    automation::{BookingAutomation, CaptchaSolver},
    clock::Clock,
    errors::ApplicationError,
    hub::EventBroadcaster,
};

pub struct BookingServiceDependencies {
    pub applicant_repository: Arc<dyn ApplicantRepository>,
    pub credential_repository: Arc<dyn CredentialRepository>,
    pub booking_repository: Arc<dyn BookingRepository>,
    pub captcha_repository: Arc<dyn CaptchaRepository>,
    pub automation: Arc<dyn BookingAutomation>,
    pub captcha_solver: Arc<dyn CaptchaSolver>,
    pub broadcaster: Arc<dyn EventBroadcaster>,
    pub clock: Arc<dyn Clock>,
}

pub struct BookingService {
    deps: BookingServiceDependencies,
    // 唯一的共享状态，只允许通过本服务修改
    status: Mutex<SystemStatus>,
}

impl BookingService {
    pub fn new(deps: BookingServiceDependencies) -> Self {
        let status = Mutex::new(SystemStatus::idle(deps.clock.now()));
        Self { deps, status }
    }

    /// 当前状态快照
    pub async fn status(&self) -> SystemStatus {
        self.status.lock().await.clone()
    }

    /// 操作员手动启动系统
    pub async fn start_system(&self) -> SystemStatus {
        let snapshot = {
            let mut status = self.status.lock().await;
            status.begin("System initialized", self.deps.clock.now());
            status.clone()
        };

        tracing::info!("automation system started by operator");
        self.deps
            .broadcaster
            .broadcast(NotificationEvent::SystemStarted(snapshot.clone()))
            .await;

        snapshot
    }

    /// 操作员手动停止系统
    pub async fn stop_system(&self) -> SystemStatus {
        let snapshot = {
            let mut status = self.status.lock().await;
            status.reset(self.deps.clock.now());
            status.clone()
        };

        tracing::info!("automation system stopped by operator");
        self.deps
            .broadcaster
            .broadcast(NotificationEvent::SystemStopped(snapshot.clone()))
            .await;

        snapshot
    }

    /// 预约编排入口
    ///
    /// 前置条件按顺序检查：主凭据存在且有效、主申请人存在、
    /// 类别与申根历史匹配。任何一项失败都不会触碰共享状态。
    /// 运行中收到的新请求直接拒绝，不排队。
    pub async fn book_appointment(
        &self,
        request: VisaBookingRequest,
    ) -> Result<Booking, ApplicationError> {
        request.validate()?;

        let credential = self
            .deps
            .credential_repository
            .find_primary()
            .await?
            .ok_or(DomainError::NoPrimaryCredential)?;
        if !credential.is_active {
            return Err(DomainError::CredentialInactive.into());
        }

        let applicant = self
            .deps
            .applicant_repository
            .find_primary()
            .await?
            .ok_or(DomainError::NoPrimaryApplicant)?;

        eligibility::validate_booking(&request)?;

        // 检查并设置必须在同一个临界区内完成，两个并发请求
        // 不可能都观察到空闲再同时进入 RUNNING
        let running = {
            let mut status = self.status.lock().await;
            if status.is_running {
                return Err(DomainError::AutomationBusy.into());
            }
            status.begin(
                format!(
                    "Booking {} appointment for {}",
                    request.visa_type, request.location
                ),
                self.deps.clock.now(),
            );
            status.clone()
        };

        tracing::info!(
            location = %request.location,
            category = %request.category,
            "booking automation started"
        );
        self.deps
            .broadcaster
            .broadcast(NotificationEvent::SystemStatus(running))
            .await;

        let outcome = self.run_booking(request, &applicant, &credential).await;

        // 无论成功失败都先把状态复位，错误再向上传播
        let reset = {
            let mut status = self.status.lock().await;
            status.reset(self.deps.clock.now());
            status.clone()
        };
        self.deps
            .broadcaster
            .broadcast(NotificationEvent::SystemStatus(reset))
            .await;

        match outcome {
            Ok(booking) => {
                tracing::info!(booking_id = %booking.id, "booking completed");
                self.deps
                    .broadcaster
                    .broadcast(NotificationEvent::BookingCompleted(booking.clone()))
                    .await;
                Ok(booking)
            }
            Err(err) => {
                tracing::error!(error = %err, "booking automation failed");
                Err(err)
            }
        }
    }

    async fn run_booking(
        &self,
        request: VisaBookingRequest,
        applicant: &Applicant,
        credential: &Credential,
    ) -> Result<Booking, ApplicationError> {
        self.deps
            .automation
            .perform_booking(&request, applicant, credential)
            .await?;

        let booking = Booking::completed(
            applicant.id,
            credential.id,
            request,
            self.deps.clock.now(),
        );
        let stored = self.deps.booking_repository.insert(booking).await?;
        Ok(stored)
    }

    pub async fn list_bookings(
        &self,
        skip: usize,
        limit: usize,
    ) -> Result<Vec<Booking>, ApplicationError> {
        Ok(self.deps.booking_repository.list(skip, limit).await?)
    }

    /// 调用验证码求解器并落盘求解记录
    pub async fn solve_captcha(
        &self,
        target_number: String,
        images: Vec<String>,
    ) -> Result<CaptchaSolution, ApplicationError> {
        let solution = self
            .deps
            .captcha_solver
            .solve(&target_number, &images)
            .await?;

        let record = CaptchaRecord::new(solution.clone(), images.len(), self.deps.clock.now());
        self.deps.captcha_repository.insert(record).await?;

        Ok(solution)
    }
}
