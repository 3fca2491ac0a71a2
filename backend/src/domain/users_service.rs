//! User domain service.
//!
//! Thin orchestration over the repository port: it owns the mapping from
//! persistence error kinds to domain errors and the shared handling of
//! singular lookups, and passes everything else straight through.

use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Error, NewUser, User, UserPatch};

/// Orchestrates repository calls and normalises persistence errors.
#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

fn map_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => Error::service_unavailable(message),
        UserPersistenceError::Query { message } => Error::internal(message),
        UserPersistenceError::NotFound => Error::not_found("users not found"),
        UserPersistenceError::UsernameTaken => {
            Error::username_taken("the username is already taken")
        }
        UserPersistenceError::EmailTaken => Error::email_taken("the email is already in use"),
        UserPersistenceError::UnknownConflict { constraint } => {
            warn!(%constraint, "unique violation on unrecognised constraint");
            Error::unknown_conflict("unknown conflict")
        }
    }
}

/// Shared handling for singular lookups: log and normalise a missing row.
fn resolve_single(result: Result<User, UserPersistenceError>) -> Result<User, Error> {
    if matches!(result, Err(UserPersistenceError::NotFound)) {
        warn!("users not found");
    }
    result.map_err(map_persistence_error)
}

impl UserService {
    /// Create a service backed by the given repository.
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// List all users in storage order.
    pub async fn get_all(&self) -> Result<Vec<User>, Error> {
        self.repository
            .get_all()
            .await
            .map_err(map_persistence_error)
    }

    /// Fetch a single user by username.
    pub async fn get_by_username(&self, username: &str) -> Result<User, Error> {
        resolve_single(self.repository.get_by_username(username).await)
    }

    /// Fetch a single user by internal identifier.
    pub async fn get_by_id(&self, id: i64) -> Result<User, Error> {
        resolve_single(self.repository.get_by_id(id).await)
    }

    /// Delete the user with the given public identity.
    pub async fn delete_by_uuid(&self, uuid: Uuid) -> Result<(), Error> {
        self.repository
            .delete_by_uuid(uuid)
            .await
            .map_err(map_persistence_error)
    }

    /// Apply a resolved partial update to the user with the given public
    /// identity. An empty patch succeeds with no effect.
    pub async fn patch_by_uuid(&self, uuid: Uuid, patch: &UserPatch) -> Result<(), Error> {
        self.repository
            .partially_update_by_uuid(uuid, patch)
            .await
            .map_err(map_persistence_error)
    }

    /// Create a new user, returning the stored record.
    pub async fn create(&self, new_user: &NewUser) -> Result<User, Error> {
        self.repository
            .create(new_user)
            .await
            .map_err(map_persistence_error)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error normalisation and pass-through calls.
    use std::sync::Mutex;

    use async_trait::async_trait;
    use rstest::rstest;

    use super::*;
    use crate::domain::{ErrorCode, FieldPatch};

    #[derive(Default)]
    struct StubState {
        users: Vec<User>,
        failure: Option<UserPersistenceError>,
        recorded_patch: Option<(Uuid, UserPatch)>,
    }

    #[derive(Default)]
    struct StubUserRepository {
        state: Mutex<StubState>,
    }

    impl StubUserRepository {
        fn with_users(users: Vec<User>) -> Self {
            Self {
                state: Mutex::new(StubState {
                    users,
                    ..StubState::default()
                }),
            }
        }

        fn failing_with(failure: UserPersistenceError) -> Self {
            Self {
                state: Mutex::new(StubState {
                    failure: Some(failure),
                    ..StubState::default()
                }),
            }
        }

        fn configured_failure(&self) -> Option<UserPersistenceError> {
            self.state.lock().expect("state lock").failure.clone()
        }

        fn recorded_patch(&self) -> Option<(Uuid, UserPatch)> {
            self.state.lock().expect("state lock").recorded_patch.clone()
        }
    }

    #[async_trait]
    impl UserRepository for StubUserRepository {
        async fn get_all(&self) -> Result<Vec<User>, UserPersistenceError> {
            if let Some(failure) = self.configured_failure() {
                return Err(failure);
            }
            Ok(self.state.lock().expect("state lock").users.clone())
        }

        async fn get_by_username(&self, username: &str) -> Result<User, UserPersistenceError> {
            if let Some(failure) = self.configured_failure() {
                return Err(failure);
            }
            self.state
                .lock()
                .expect("state lock")
                .users
                .iter()
                .find(|user| user.username == username)
                .cloned()
                .ok_or(UserPersistenceError::NotFound)
        }

        async fn get_by_id(&self, id: i64) -> Result<User, UserPersistenceError> {
            self.state
                .lock()
                .expect("state lock")
                .users
                .iter()
                .find(|user| user.id == id)
                .cloned()
                .ok_or(UserPersistenceError::NotFound)
        }

        async fn delete_by_uuid(&self, uuid: Uuid) -> Result<(), UserPersistenceError> {
            let mut state = self.state.lock().expect("state lock");
            let before = state.users.len();
            state.users.retain(|user| user.uuid != uuid);
            if state.users.len() == before {
                return Err(UserPersistenceError::NotFound);
            }
            Ok(())
        }

        async fn partially_update_by_uuid(
            &self,
            uuid: Uuid,
            patch: &UserPatch,
        ) -> Result<(), UserPersistenceError> {
            if let Some(failure) = self.configured_failure() {
                return Err(failure);
            }
            self.state.lock().expect("state lock").recorded_patch = Some((uuid, patch.clone()));
            Ok(())
        }

        async fn create(&self, new_user: &NewUser) -> Result<User, UserPersistenceError> {
            if let Some(failure) = self.configured_failure() {
                return Err(failure);
            }
            Ok(User {
                id: 1,
                uuid: Uuid::new_v4(),
                username: new_user.username.clone(),
                email: new_user.email.clone(),
                full_name: new_user.full_name.clone(),
            })
        }
    }

    fn harry() -> User {
        User {
            id: 1,
            uuid: Uuid::new_v4(),
            username: "tequila_sunset".to_owned(),
            email: "harrier.dubois@rcm.org".to_owned(),
            full_name: Some("Harrier Du Bois".to_owned()),
        }
    }

    fn service_with(repository: StubUserRepository) -> UserService {
        UserService::new(Arc::new(repository))
    }

    #[tokio::test]
    async fn get_all_returns_empty_vector_on_empty_store() {
        let service = service_with(StubUserRepository::default());
        let users = service.get_all().await.expect("list should succeed");
        assert!(users.is_empty());
    }

    #[tokio::test]
    async fn get_by_username_returns_matching_user() {
        let user = harry();
        let service = service_with(StubUserRepository::with_users(vec![user.clone()]));
        let found = service
            .get_by_username("tequila_sunset")
            .await
            .expect("lookup should succeed");
        assert_eq!(found, user);
    }

    #[tokio::test]
    async fn get_by_username_normalises_missing_row_to_not_found() {
        let service = service_with(StubUserRepository::default());
        let err = service
            .get_by_username("raphael")
            .await
            .expect_err("missing user should fail");
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "users not found");
    }

    #[tokio::test]
    async fn delete_by_uuid_maps_missing_row_to_not_found() {
        let service = service_with(StubUserRepository::default());
        let err = service
            .delete_by_uuid(Uuid::new_v4())
            .await
            .expect_err("missing user should fail");
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn patch_forwards_resolved_assignments_to_repository() {
        let repository = Arc::new(StubUserRepository::default());
        let service = UserService::new(repository.clone());
        let uuid = Uuid::new_v4();
        let patch = UserPatch {
            full_name: FieldPatch::Set("Raphaël Ambrosius Costeau".to_owned()),
            ..UserPatch::default()
        };

        service
            .patch_by_uuid(uuid, &patch)
            .await
            .expect("patch should succeed");

        assert_eq!(repository.recorded_patch(), Some((uuid, patch)));
    }

    #[tokio::test]
    async fn create_returns_stored_record_with_generated_identity() {
        let service = service_with(StubUserRepository::default());
        let created = service
            .create(&NewUser {
                username: "klaasje".to_owned(),
                email: "klaasje.amandou@noname.com".to_owned(),
                full_name: None,
            })
            .await
            .expect("create should succeed");
        assert_eq!(created.username, "klaasje");
        assert!(created.full_name.is_none());
    }

    #[rstest]
    #[case(UserPersistenceError::UsernameTaken, ErrorCode::UsernameTaken)]
    #[case(UserPersistenceError::EmailTaken, ErrorCode::EmailTaken)]
    #[case(
        UserPersistenceError::unknown_conflict("users_pkey"),
        ErrorCode::UnknownConflict
    )]
    #[case(
        UserPersistenceError::connection("database unavailable"),
        ErrorCode::ServiceUnavailable
    )]
    #[case(
        UserPersistenceError::query("database query failed"),
        ErrorCode::InternalError
    )]
    #[tokio::test]
    async fn create_maps_persistence_failures(
        #[case] failure: UserPersistenceError,
        #[case] expected: ErrorCode,
    ) {
        let service = service_with(StubUserRepository::failing_with(failure));
        let err = service
            .create(&NewUser {
                username: "kim".to_owned(),
                email: "kim.kitsuragi@rcm.org".to_owned(),
                full_name: None,
            })
            .await
            .expect_err("failure should map to a domain error");
        assert_eq!(err.code, expected);
    }

    #[rstest]
    #[case(UserPersistenceError::UsernameTaken, "the username is already taken")]
    #[case(UserPersistenceError::EmailTaken, "the email is already in use")]
    #[case(UserPersistenceError::unknown_conflict("users_pkey"), "unknown conflict")]
    #[tokio::test]
    async fn conflict_messages_stay_stable(
        #[case] failure: UserPersistenceError,
        #[case] expected_message: &str,
    ) {
        let service = service_with(StubUserRepository::failing_with(failure));
        let err = service
            .patch_by_uuid(Uuid::new_v4(), &UserPatch::default())
            .await
            .expect_err("failure should map to a domain error");
        assert_eq!(err.message, expected_message);
    }
}
