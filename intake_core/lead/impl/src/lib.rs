use intake_core_lead_contracts::{LeadFeatureService, LeadSubmitError, LeadSubmitOutcome};
use intake_di::Build;
use intake_models::lead::LeadSubmission;
use intake_persistence_contracts::{
    submission::{SubmissionRepoError, SubmissionRepository},
    Database,
};
use tracing::{error, info};

#[derive(Debug, Clone, Build)]
pub struct LeadFeatureServiceImpl<Db, SubmissionRepo> {
    db: Db,
    submission_repo: SubmissionRepo,
}

impl<Db, SubmissionRepo> LeadFeatureService for LeadFeatureServiceImpl<Db, SubmissionRepo>
where
    Db: Database,
    SubmissionRepo: SubmissionRepository<Db::Connection>,
{
    async fn submit(&self, submission: LeadSubmission) -> Result<LeadSubmitOutcome, LeadSubmitError> {
        if submission.is_honeypot_filled() {
            info!("Honeypot field filled, dropping lead");
            return Ok(LeadSubmitOutcome::Absorbed);
        }

        let record = submission.into_record()?;

        // only connect once the submission is known to be valid
        let mut conn = self.db.connect()?;

        match self.submission_repo.create(&mut conn, &record).await {
            Ok(()) => Ok(LeadSubmitOutcome::Stored),
            Err(SubmissionRepoError::Datastore(message)) => {
                error!(intent = %record.intent, "Failed to store lead: {message}");
                Err(LeadSubmitError::Datastore(message))
            }
            Err(SubmissionRepoError::Other(err)) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use intake_models::lead::{LeadEmail, LeadIntent, LeadRecord, LeadValidationError};
    use intake_persistence_contracts::{
        submission::MockSubmissionRepository, MockConnection, MockDatabase,
    };
    use intake_utils::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;

    type Sut = LeadFeatureServiceImpl<MockDatabase, MockSubmissionRepository<MockConnection>>;

    fn record(intent: LeadIntent) -> LeadRecord {
        LeadRecord {
            email: LeadEmail::try_new("a@b.com").unwrap(),
            intent,
            name: None,
            role: None,
            message: None,
        }
    }

    #[tokio::test]
    async fn subscribe() {
        // Arrange
        let db = MockDatabase::build(true);
        let submission_repo =
            MockSubmissionRepository::new().with_create(record(LeadIntent::Subscribe), Ok(()));

        let sut = Sut { db, submission_repo };

        // Act
        let result = sut
            .submit(LeadSubmission {
                email: Some("a@b.com".into()),
                intent: Some("subscribe".into()),
                message: Some("ignored".into()),
                ..Default::default()
            })
            .await;

        // Assert
        assert_eq!(result.unwrap(), LeadSubmitOutcome::Stored);
    }

    #[tokio::test]
    async fn prototype_with_all_fields() {
        // Arrange
        let db = MockDatabase::build(true);
        let submission_repo = MockSubmissionRepository::new().with_create(
            LeadRecord {
                name: Some("Ana".into()),
                role: Some("CTO".into()),
                message: Some("We need a demo".into()),
                ..record(LeadIntent::Prototype)
            },
            Ok(()),
        );

        let sut = Sut { db, submission_repo };

        // Act
        let result = sut
            .submit(LeadSubmission {
                name: Some("Ana".into()),
                email: Some("a@b.com".into()),
                role: Some("CTO".into()),
                intent: Some("prototype".into()),
                message: Some("We need a demo".into()),
                honeypot: Some("   ".into()),
            })
            .await;

        // Assert
        assert_eq!(result.unwrap(), LeadSubmitOutcome::Stored);
    }

    #[tokio::test]
    async fn contact_without_message() {
        // Arrange
        let db = MockDatabase::build(true);
        let submission_repo =
            MockSubmissionRepository::new().with_create(record(LeadIntent::Contact), Ok(()));

        let sut = Sut { db, submission_repo };

        // Act
        let result = sut
            .submit(LeadSubmission {
                email: Some("a@b.com".into()),
                intent: Some("contact".into()),
                message: Some("".into()),
                ..Default::default()
            })
            .await;

        // Assert
        assert_eq!(result.unwrap(), LeadSubmitOutcome::Stored);
    }

    #[tokio::test]
    async fn honeypot_filled() {
        // Arrange
        let sut = Sut {
            db: MockDatabase::new(),
            submission_repo: MockSubmissionRepository::new(),
        };

        // Act
        let result = sut
            .submit(LeadSubmission {
                email: Some("a@b.com".into()),
                intent: Some("subscribe".into()),
                honeypot: Some(" bot ".into()),
                ..Default::default()
            })
            .await;

        // Assert
        assert_eq!(result.unwrap(), LeadSubmitOutcome::Absorbed);
    }

    #[tokio::test]
    async fn missing_intent() {
        // Arrange
        let sut = Sut {
            db: MockDatabase::new(),
            submission_repo: MockSubmissionRepository::new(),
        };

        // Act
        let result = sut
            .submit(LeadSubmission {
                email: Some("a@b.com".into()),
                ..Default::default()
            })
            .await;

        // Assert
        assert_matches!(
            result,
            Err(LeadSubmitError::Validation(LeadValidationError::MissingFields))
        );
    }

    #[tokio::test]
    async fn invalid_intent() {
        // Arrange
        let sut = Sut {
            db: MockDatabase::new(),
            submission_repo: MockSubmissionRepository::new(),
        };

        // Act
        let result = sut
            .submit(LeadSubmission {
                email: Some("a@b.com".into()),
                intent: Some("Subscribe".into()),
                ..Default::default()
            })
            .await;

        // Assert
        assert_matches!(
            result,
            Err(LeadSubmitError::Validation(LeadValidationError::InvalidIntent(_)))
        );
    }

    #[tokio::test]
    async fn datastore_error() {
        // Arrange
        let db = MockDatabase::build(true);
        let submission_repo = MockSubmissionRepository::new().with_create(
            record(LeadIntent::Subscribe),
            Err(SubmissionRepoError::Datastore("conn refused".into())),
        );

        let sut = Sut { db, submission_repo };

        // Act
        let result = sut
            .submit(LeadSubmission {
                email: Some("a@b.com".into()),
                intent: Some("subscribe".into()),
                ..Default::default()
            })
            .await;

        // Assert
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "Database error: conn refused");
        assert_matches!(err, LeadSubmitError::Datastore(message) if message == "conn refused");
    }

    #[tokio::test]
    async fn connect_failure() {
        // Arrange
        let sut = Sut {
            db: MockDatabase::build(false),
            submission_repo: MockSubmissionRepository::new(),
        };

        // Act
        let result = sut
            .submit(LeadSubmission {
                email: Some("a@b.com".into()),
                intent: Some("subscribe".into()),
                ..Default::default()
            })
            .await;

        // Assert
        assert_matches!(result, Err(LeadSubmitError::Other(_)));
    }

    #[tokio::test]
    async fn identical_submissions_are_stored_twice() {
        // Arrange
        let mut db = MockDatabase::new();
        db.expect_connect().times(2).returning(|| Ok(MockConnection));
        let mut submission_repo = MockSubmissionRepository::new();
        submission_repo
            .expect_create()
            .times(2)
            .with(
                mockall::predicate::always(),
                mockall::predicate::eq(record(LeadIntent::Subscribe)),
            )
            .returning(|_, _| Box::pin(std::future::ready(Ok(()))));

        let sut = Sut { db, submission_repo };
        let submission = LeadSubmission {
            email: Some("a@b.com".into()),
            intent: Some("subscribe".into()),
            ..Default::default()
        };

        // Act
        let first = sut.submit(submission.clone()).await;
        let second = sut.submit(submission).await;

        // Assert
        assert_eq!(first.unwrap(), LeadSubmitOutcome::Stored);
        assert_eq!(second.unwrap(), LeadSubmitOutcome::Stored);
    }
}
