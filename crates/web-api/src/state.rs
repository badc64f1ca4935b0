use std::sync::Arc;

use application::{
    ApplicantService, BookingService, CredentialService, NotificationHub, StatusCheckService,
};

#[derive(Clone)]
pub struct AppState {
    pub applicant_service: Arc<ApplicantService>,
    pub credential_service: Arc<CredentialService>,
    pub booking_service: Arc<BookingService>,
    pub status_check_service: Arc<StatusCheckService>,
    pub hub: Arc<NotificationHub>,
}

impl AppState {
    pub fn new(
        applicant_service: Arc<ApplicantService>,
        credential_service: Arc<CredentialService>,
        booking_service: Arc<BookingService>,
        status_check_service: Arc<StatusCheckService>,
        hub: Arc<NotificationHub>,
    ) -> Self {
        Self {
            applicant_service,
            credential_service,
            booking_service,
            status_check_service,
            hub,
        }
    }
}
