//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! This adapter implements the domain's `UserRepository` port. Unique
//! constraint violations are classified by constraint name so the domain
//! can report which field caused a conflict.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, User, UserPatch};

use super::models::{NewUserRow, UserChangeset, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Unique constraints on the users table, paired with the conflict each
/// violation represents.
const UNIQUE_CONSTRAINTS: &[(&str, UserPersistenceError)] = &[
    ("users_username_key", UserPersistenceError::UsernameTaken),
    ("users_email_key", UserPersistenceError::EmailTaken),
];

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain user persistence errors.
fn map_pool_error(error: PoolError) -> UserPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserPersistenceError::connection(message)
        }
    }
}

/// Classify a unique constraint violation by the violated constraint name.
fn classify_unique_violation(info: &dyn diesel::result::DatabaseErrorInformation) -> UserPersistenceError {
    let constraint = info.constraint_name().unwrap_or_default();
    UNIQUE_CONSTRAINTS
        .iter()
        .find(|(name, _)| *name == constraint)
        .map(|(_, conflict)| conflict.clone())
        .unwrap_or_else(|| UserPersistenceError::unknown_conflict(constraint))
}

/// Map Diesel errors to domain user persistence errors.
fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => UserPersistenceError::NotFound,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            classify_unique_violation(info.as_ref())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserPersistenceError::connection("database connection error")
        }
        DieselError::QueryBuilderError(_) => UserPersistenceError::query("database query error"),
        DieselError::DatabaseError(_, _) => UserPersistenceError::query("database error"),
        _ => UserPersistenceError::query("database error"),
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn get_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = users::table
            .order(users::full_name.asc().nulls_last())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn get_by_username(&self, username: &str) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: UserRow = users::table
            .filter(users::username.eq(username))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row.into())
    }

    async fn get_by_id(&self, id: i64) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: UserRow = users::table
            .filter(users::id.eq(id))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row.into())
    }

    async fn delete_by_uuid(&self, uuid: uuid::Uuid) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(users::table.filter(users::uuid.eq(uuid)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if deleted == 0 {
            return Err(UserPersistenceError::NotFound);
        }
        Ok(())
    }

    async fn partially_update_by_uuid(
        &self,
        uuid: uuid::Uuid,
        patch: &UserPatch,
    ) -> Result<(), UserPersistenceError> {
        let changeset = UserChangeset::from(patch);
        // Diesel rejects empty changesets, and an empty patch is a no-op
        // anyway, so avoid issuing any statement.
        if changeset.is_noop() {
            return Ok(());
        }

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = diesel::update(users::table.filter(users::uuid.eq(uuid)))
            .set(changeset)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if updated == 0 {
            return Err(UserPersistenceError::NotFound);
        }
        Ok(())
    }

    async fn create(&self, new_user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: UserRow = diesel::insert_into(users::table)
            .values(NewUserRow::from(new_user))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row.into())
    }
}
