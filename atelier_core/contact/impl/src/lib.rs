use atelier_core_contact_contracts::{ContactFeatureService, ContactSubmitError};
use atelier_models::contact::{ContactMessage, ContactSubmission};
use atelier_persistence_contracts::{contact::ContactMessageRepository, Database, Transaction};
use atelier_shared_contracts::{id::IdService, time::TimeService};
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct ContactFeatureServiceImpl<Db, Id, Time, ContactRepo> {
    db: Db,
    id: Id,
    time: Time,
    contact_repo: ContactRepo,
}

impl<Db, Id, Time, ContactRepo> ContactFeatureServiceImpl<Db, Id, Time, ContactRepo> {
    pub fn new(db: Db, id: Id, time: Time, contact_repo: ContactRepo) -> Self {
        Self {
            db,
            id,
            time,
            contact_repo,
        }
    }
}

impl<Db, Id, Time, ContactRepo> ContactFeatureService
    for ContactFeatureServiceImpl<Db, Id, Time, ContactRepo>
where
    Db: Database,
    Id: IdService,
    Time: TimeService,
    ContactRepo: ContactMessageRepository<Db::Transaction>,
{
    async fn submit(
        &self,
        submission: ContactSubmission,
    ) -> Result<ContactMessage, ContactSubmitError> {
        let mut txn = self.db.begin_transaction().await?;

        let ContactSubmission {
            name,
            email,
            message,
            phone,
            company,
        } = submission;

        // id and timestamp come from the server, never from the caller
        let record = ContactMessage {
            id: self.id.generate(),
            name,
            email,
            message,
            phone,
            company,
            created_at: self.time.now(),
        };

        self.contact_repo
            .create(&mut txn, &record)
            .await
            .map_err(ContactSubmitError::Storage)?;
        txn.commit().await.map_err(ContactSubmitError::Storage)?;

        debug!(id = %*record.id, "stored contact message");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use atelier_models::contact::ContactSubmissionDraft;
    use atelier_persistence_contracts::{
        contact::MockContactMessageRepository, MockDatabase, MockTransaction,
    };
    use atelier_shared_contracts::{id::MockIdService, time::MockTimeService};
    use atelier_shared_impl::{id::IdServiceImpl, time::TimeServiceImpl};
    use chrono::DateTime;

    use super::*;

    type Sut = ContactFeatureServiceImpl<
        MockDatabase,
        MockIdService,
        MockTimeService,
        MockContactMessageRepository<MockTransaction>,
    >;

    fn submission() -> ContactSubmission {
        ContactSubmissionDraft {
            name: "Max Mustermann".into(),
            email: "max.mustermann@example.de".into(),
            message: "Hello, I would like a quote for a website.".into(),
            phone: Some("+49 1234 5678".into()),
            company: None,
        }
        .validate()
        .unwrap()
    }

    #[tokio::test]
    async fn ok() {
        // Arrange
        let submission = submission();
        let expected = ContactMessage {
            id: uuid::Uuid::from_u128(0x1234).into(),
            name: submission.name.clone(),
            email: submission.email.clone(),
            message: submission.message.clone(),
            phone: submission.phone.clone(),
            company: submission.company.clone(),
            created_at: DateTime::from_timestamp(1_715_000_000, 0).unwrap(),
        };

        let db = MockDatabase::build(true);
        let id = MockIdService::new().with_generate(expected.id);
        let time = MockTimeService::new().with_now(expected.created_at);
        let contact_repo =
            MockContactMessageRepository::new().with_create(expected.clone(), Ok(()));
        let sut = Sut {
            db,
            id,
            time,
            contact_repo,
        };

        // Act
        let result = sut.submit(submission).await;

        // Assert
        assert_eq!(result.unwrap(), expected);
    }

    #[tokio::test]
    async fn storage_error() {
        // Arrange
        let submission = submission();
        let expected = ContactMessage {
            id: uuid::Uuid::from_u128(0x1234).into(),
            name: submission.name.clone(),
            email: submission.email.clone(),
            message: submission.message.clone(),
            phone: submission.phone.clone(),
            company: submission.company.clone(),
            created_at: DateTime::from_timestamp(1_715_000_000, 0).unwrap(),
        };

        let db = MockDatabase::build(false);
        let id = MockIdService::new().with_generate(expected.id);
        let time = MockTimeService::new().with_now(expected.created_at);
        let contact_repo = MockContactMessageRepository::new()
            .with_create(expected, Err(anyhow::anyhow!("connection reset")));
        let sut = Sut {
            db,
            id,
            time,
            contact_repo,
        };

        // Act
        let result = sut.submit(submission).await;

        // Assert
        assert!(matches!(result, Err(ContactSubmitError::Storage(_))));
    }

    #[tokio::test]
    async fn identical_submissions_create_distinct_records() {
        // Arrange
        let mut db = MockDatabase::new();
        db.expect_begin_transaction().times(2).returning(|| {
            let mut txn = MockTransaction::new();
            txn.expect_commit()
                .once()
                .return_once(|| Box::pin(std::future::ready(Ok(()))));
            Box::pin(std::future::ready(Ok(txn)))
        });
        let mut contact_repo = MockContactMessageRepository::new();
        contact_repo
            .expect_create()
            .times(2)
            .returning(|_, _| Box::pin(std::future::ready(Ok(()))));
        let sut = ContactFeatureServiceImpl {
            db,
            id: IdServiceImpl,
            time: TimeServiceImpl,
            contact_repo,
        };

        // Act
        let first = sut.submit(submission()).await.unwrap();
        let second = sut.submit(submission()).await.unwrap();

        // Assert
        assert_ne!(first.id, second.id);
    }
}
