//! Row and changeset types mapping between the database and the domain.

use diesel::prelude::*;

use super::schema::users;
use crate::domain::{NewUser, User, UserPatch};

/// A full row from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: i64,
    pub uuid: uuid::Uuid,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            uuid: row.uuid,
            username: row.username,
            email: row.email,
            full_name: row.full_name,
        }
    }
}

/// Insertable row for creating a user. The `id` and `uuid` columns are
/// omitted so the database defaults apply.
#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub full_name: Option<&'a str>,
}

impl<'a> From<&'a NewUser> for NewUserRow<'a> {
    fn from(new_user: &'a NewUser) -> Self {
        Self {
            username: &new_user.username,
            email: &new_user.email,
            full_name: new_user.full_name.as_deref(),
        }
    }
}

/// Changeset for partial updates.
///
/// Each field distinguishes "leave unchanged" (outer `None`) from an
/// assignment. For `full_name` the inner `Option` additionally encodes
/// `SET full_name = NULL`.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = users)]
pub struct UserChangeset<'a> {
    pub username: Option<&'a str>,
    pub email: Option<&'a str>,
    pub full_name: Option<Option<&'a str>>,
}

impl<'a> From<&'a UserPatch> for UserChangeset<'a> {
    fn from(patch: &'a UserPatch) -> Self {
        Self {
            username: patch.username.as_deref(),
            email: patch.email.as_deref(),
            full_name: patch
                .full_name
                .as_assignment()
                .map(|value| value.map(String::as_str)),
        }
    }
}

impl UserChangeset<'_> {
    /// True when the changeset assigns no columns. Diesel rejects empty
    /// changesets, so callers must skip the UPDATE entirely.
    pub fn is_noop(&self) -> bool {
        self.username.is_none() && self.email.is_none() && self.full_name.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    use crate::domain::FieldPatch;

    fn patch(
        username: Option<&str>,
        email: Option<&str>,
        full_name: FieldPatch<String>,
    ) -> UserPatch {
        UserPatch {
            username: username.map(str::to_owned),
            email: email.map(str::to_owned),
            full_name,
        }
    }

    #[rstest]
    fn keep_leaves_full_name_unassigned() {
        let patch = patch(Some("kim"), None, FieldPatch::Keep);
        let changeset = UserChangeset::from(&patch);
        assert_eq!(changeset.username, Some("kim"));
        assert_eq!(changeset.email, None);
        assert_eq!(changeset.full_name, None);
        assert!(!changeset.is_noop());
    }

    #[rstest]
    fn erase_assigns_null() {
        let patch = patch(None, None, FieldPatch::Erase);
        let changeset = UserChangeset::from(&patch);
        assert_eq!(changeset.full_name, Some(None));
        assert!(!changeset.is_noop());
    }

    #[rstest]
    fn set_assigns_value() {
        let patch = patch(None, Some("kim@rcm.example"), FieldPatch::Set("Kim Kitsuragi".into()));
        let changeset = UserChangeset::from(&patch);
        assert_eq!(changeset.email, Some("kim@rcm.example"));
        assert_eq!(changeset.full_name, Some(Some("Kim Kitsuragi")));
    }

    #[rstest]
    fn empty_patch_is_noop() {
        let patch = patch(None, None, FieldPatch::Keep);
        assert!(UserChangeset::from(&patch).is_noop());
    }

    #[rstest]
    fn new_user_row_borrows_fields() {
        let new_user = NewUser {
            username: "tequila_sunset".into(),
            email: "harry@rcm.example".into(),
            full_name: Some("Harrier Du Bois".into()),
        };
        let row = NewUserRow::from(&new_user);
        assert_eq!(row.username, "tequila_sunset");
        assert_eq!(row.email, "harry@rcm.example");
        assert_eq!(row.full_name, Some("Harrier Du Bois"));
    }
}
