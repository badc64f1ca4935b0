//! 主应用程序入口
//!
//! 组装仓储、通知中心和用例服务，启动 Axum Web API。

use std::{sync::Arc, time::Duration};

use application::{
    ApplicantService, ApplicantServiceDependencies, BookingService, BookingServiceDependencies,
    CredentialService, CredentialServiceDependencies, NotificationHub, StatusCheckService,
    StatusCheckServiceDependencies, SystemClock,
};
use config::AppConfig;
use infrastructure::{
    MemoryApplicantRepository, MemoryBookingRepository, MemoryCaptchaRepository,
    MemoryCredentialRepository, MemoryStatusCheckRepository, SimulatedBlsAutomation,
    StubCaptchaSolver,
};
use tracing_subscriber::EnvFilter;
use web_api::{router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // 读取并校验配置
    let app_config = AppConfig::from_env_with_defaults();
    app_config.validate()?;

    let clock: Arc<dyn application::Clock> = Arc::new(SystemClock);
    let hub = Arc::new(NotificationHub::new());

    // 内存仓储，生产环境可以换成真实的文档存储
    let applicant_repository = Arc::new(MemoryApplicantRepository::new(clock.clone()));
    let credential_repository = Arc::new(MemoryCredentialRepository::new(clock.clone()));
    let booking_repository = Arc::new(MemoryBookingRepository::new());
    let captcha_repository = Arc::new(MemoryCaptchaRepository::new());
    let status_check_repository = Arc::new(MemoryStatusCheckRepository::new());

    // 自动化协作者目前是模拟实现
    let automation = Arc::new(SimulatedBlsAutomation::new(Duration::from_millis(
        app_config.automation.booking_delay_ms,
    )));
    let captcha_solver = Arc::new(StubCaptchaSolver::new(
        Duration::from_millis(app_config.automation.captcha_delay_ms),
        clock.clone(),
    ));

    // 创建应用层服务
    let applicant_service = Arc::new(ApplicantService::new(ApplicantServiceDependencies {
        applicant_repository: applicant_repository.clone(),
        broadcaster: hub.clone(),
        clock: clock.clone(),
    }));

    let credential_service = Arc::new(CredentialService::new(CredentialServiceDependencies {
        credential_repository: credential_repository.clone(),
        broadcaster: hub.clone(),
        clock: clock.clone(),
    }));

    let booking_service = Arc::new(BookingService::new(BookingServiceDependencies {
        applicant_repository,
        credential_repository,
        booking_repository,
        captcha_repository,
        automation,
        captcha_solver,
        broadcaster: hub.clone(),
        clock: clock.clone(),
    }));

    let status_check_service = Arc::new(StatusCheckService::new(StatusCheckServiceDependencies {
        status_check_repository,
        clock,
    }));

    // 创建应用状态并启动 Web 服务器
    let state = AppState::new(
        applicant_service,
        credential_service,
        booking_service,
        status_check_service,
        hub,
    );

    let app = router(state);
    let address = format!("{}:{}", app_config.server.host, app_config.server.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;

    tracing::info!("BLS 自动化服务启动在 http://{}", address);
    axum::serve(listener, app).await?;

    Ok(())
}
