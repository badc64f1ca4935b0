//! 领域实体定义

pub mod applicant;
pub mod booking;
pub mod captcha;
pub mod credential;
pub mod status_check;
pub mod system_status;

pub use applicant::{Applicant, ApplicantProfile};
pub use booking::{AppointmentFor, Booking, BookingDetails, BookingStatus, VisaBookingRequest};
pub use captcha::{CaptchaRecord, CaptchaSolution};
pub use credential::{Credential, CredentialProfile};
pub use status_check::StatusCheck;
pub use system_status::SystemStatus;
