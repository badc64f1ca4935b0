//! 自动化协作者的模拟实现
//!
//! 真实系统会用浏览器自动化驱动 BLS 门户、用 OCR 识别验证码。
//! 这里用固定延迟模拟耗时，输出可预测，方便端到端联调。

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use application::{AutomationError, BookingAutomation, CaptchaSolver, Clock};
use domain::{Applicant, CaptchaSolution, Credential, VisaBookingRequest};

/// 模拟的 BLS 预约自动化
pub struct SimulatedBlsAutomation {
    delay: Duration,
}

impl SimulatedBlsAutomation {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl BookingAutomation for SimulatedBlsAutomation {
    async fn perform_booking(
        &self,
        request: &VisaBookingRequest,
        applicant: &Applicant,
        credential: &Credential,
    ) -> Result<(), AutomationError> {
        tracing::info!(
            location = %request.location,
            visa_type = %request.visa_type,
            applicant_id = %applicant.id,
            credential_id = %credential.id,
            "simulating BLS booking flow"
        );

        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}

/// 模拟的验证码求解器
///
/// 固定返回下标 [0, 5, 12, 18]，置信度 0.95。
pub struct StubCaptchaSolver {
    delay: Duration,
    clock: Arc<dyn Clock>,
}

impl StubCaptchaSolver {
    pub fn new(delay: Duration, clock: Arc<dyn Clock>) -> Self {
        Self { delay, clock }
    }
}

#[async_trait]
impl CaptchaSolver for StubCaptchaSolver {
    async fn solve(
        &self,
        target_number: &str,
        images: &[String],
    ) -> Result<CaptchaSolution, AutomationError> {
        tracing::info!(
            target_number = %target_number,
            num_images = images.len(),
            "simulating captcha recognition"
        );

        tokio::time::sleep(self.delay).await;

        Ok(CaptchaSolution {
            target_number: target_number.to_string(),
            selected_indices: vec![0, 5, 12, 18],
            confidence: 0.95,
            solved_at: self.clock.now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use application::SystemClock;

    #[tokio::test]
    async fn test_stub_solver_returns_fixed_solution() {
        let solver = StubCaptchaSolver::new(Duration::from_millis(1), Arc::new(SystemClock));
        let images: Vec<String> = (0..20).map(|i| format!("img-{i}")).collect();

        let solution = solver.solve("7", &images).await.unwrap();
        assert_eq!(solution.target_number, "7");
        assert_eq!(solution.selected_indices, vec![0, 5, 12, 18]);
        assert!((solution.confidence - 0.95).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_simulated_booking_succeeds() {
        use chrono::Utc;
        use domain::{AppointmentFor, ApplicantProfile, CredentialProfile};

        let automation = SimulatedBlsAutomation::new(Duration::from_millis(1));
        let applicant = Applicant::new(
            ApplicantProfile {
                first_name: "Amina".to_string(),
                last_name: "Benali".to_string(),
                email: "amina@example.com".to_string(),
                phone: "+213555000111".to_string(),
                passport_number: "DZ1234567".to_string(),
                nationality: "Algerian".to_string(),
                date_of_birth: "1990-04-12".to_string(),
                is_primary: true,
            },
            Utc::now(),
        )
        .unwrap();
        let credential = Credential::new(
            CredentialProfile {
                email: "portal@example.com".to_string(),
                password: "s3cret!".to_string(),
                is_primary: true,
                is_active: true,
            },
            Utc::now(),
        )
        .unwrap();
        let request = VisaBookingRequest {
            location: "Oran".to_string(),
            visa_type: "Schengen Visa".to_string(),
            visa_sub_type: "Tourism".to_string(),
            category: "ORAN 1".to_string(),
            appointment_for: AppointmentFor::Individual,
            number_of_members: 1,
            schengen_visa_history: None,
            has_premium_lounge: false,
            family_group_eligible: false,
            notes: None,
        };

        assert!(automation
            .perform_booking(&request, &applicant, &credential)
            .await
            .is_ok());
    }
}
