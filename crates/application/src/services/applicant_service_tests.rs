//! 申请人服务单元测试

use std::sync::Arc;

use domain::{ApplicantRepository, NotificationEvent, RepositoryError};
use uuid::Uuid;

use crate::clock::SystemClock;
use crate::errors::ApplicationError;
use crate::hub::NotificationHub;
use crate::services::test_support::*;
use crate::services::{ApplicantService, ApplicantServiceDependencies};

fn service() -> (ApplicantService, Arc<InMemoryApplicants>, Arc<NotificationHub>) {
    let repository = Arc::new(InMemoryApplicants::default());
    let hub = Arc::new(NotificationHub::new());
    let service = ApplicantService::new(ApplicantServiceDependencies {
        applicant_repository: repository.clone(),
        broadcaster: hub.clone(),
        clock: Arc::new(SystemClock),
    });
    (service, repository, hub)
}

#[tokio::test]
async fn test_create_broadcasts_applicant_created() {
    let (service, _, hub) = service();
    let mut observer = hub.subscribe().await;

    let applicant = service.create(applicant_profile(false)).await.unwrap();

    match observer.receiver.recv().await.unwrap() {
        NotificationEvent::ApplicantCreated(broadcasted) => assert_eq!(broadcasted, applicant),
        other => panic!("expected applicant_created, got {}", other.event_type()),
    }
}

#[tokio::test]
async fn test_create_second_primary_demotes_the_first() {
    let (service, repository, _) = service();

    let first = service.create(applicant_profile(true)).await.unwrap();
    let second = service.create(applicant_profile(true)).await.unwrap();

    let primary = repository.find_primary().await.unwrap().unwrap();
    assert_eq!(primary.id, second.id);

    let primaries = repository
        .list(0, 100)
        .await
        .unwrap()
        .into_iter()
        .filter(|applicant| applicant.is_primary)
        .count();
    assert_eq!(primaries, 1);

    let demoted = repository.find_by_id(first.id).await.unwrap().unwrap();
    assert!(!demoted.is_primary);
}

#[tokio::test]
async fn test_update_missing_applicant_returns_not_found() {
    let (service, _, _) = service();
    let result = service.update(Uuid::new_v4(), applicant_profile(false)).await;
    assert!(matches!(
        result,
        Err(ApplicationError::Repository(RepositoryError::NotFound))
    ));
}

#[tokio::test]
async fn test_delete_broadcasts_with_id_only() {
    let (service, _, hub) = service();
    let applicant = service.create(applicant_profile(false)).await.unwrap();

    let mut observer = hub.subscribe().await;
    service.delete(applicant.id).await.unwrap();

    match observer.receiver.recv().await.unwrap() {
        NotificationEvent::ApplicantDeleted { id } => assert_eq!(id, applicant.id),
        other => panic!("expected applicant_deleted, got {}", other.event_type()),
    }

    assert!(service.get(applicant.id).await.is_err());
}

#[tokio::test]
async fn test_primary_returns_none_when_unset() {
    let (service, _, _) = service();
    service.create(applicant_profile(false)).await.unwrap();
    assert!(service.primary().await.unwrap().is_none());
}
