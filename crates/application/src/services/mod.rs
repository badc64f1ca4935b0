pub mod applicant_service;
pub mod booking_service;
pub mod credential_service;
pub mod status_check_service;

#[cfg(test)]
mod applicant_service_tests;
#[cfg(test)]
pub(crate) mod test_support;

pub use applicant_service::*;
pub use booking_service::*;
pub use credential_service::*;
pub use status_check_service::*;
