//! Users API handlers.
//!
//! ```text
//! GET    /api/v1/users
//! GET    /api/v1/users/username/{username}
//! GET    /api/v1/users/id/{id}          (deprecated)
//! POST   /api/v1/users
//! PATCH  /api/v1/users/{uuid}
//! DELETE /api/v1/users/{uuid}
//! ```
//!
//! The PATCH body distinguishes three intents for `full_name`: omitting the
//! key keeps the stored value, `null` (or `{}` or `{"value": null}`) erases
//! it, and `{"value": "Name"}` replaces it.

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::domain::{Error, FieldPatch, NewUser, User, UserPatch};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_numeric_id, parse_uuid};

/// Wire representation of a user record.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserResponse {
    /// Public identity used in mutation URLs.
    pub uuid: Uuid,
    pub username: String,
    pub email: String,
    /// Always present in responses; `null` when unset.
    pub full_name: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            uuid: user.uuid,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
        }
    }
}

/// Request body for `POST /api/v1/users`.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

impl From<CreateUserRequest> for NewUser {
    fn from(request: CreateUserRequest) -> Self {
        Self {
            username: request.username,
            email: request.email,
            full_name: request.full_name,
        }
    }
}

/// Wrapper object carrying an erasable `full_name` assignment.
///
/// `{"value": "Name"}` sets the name; `{}` and `{"value": null}` erase it.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErasableString {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Deserialise an optional field so that an absent key and an explicit
/// `null` produce different values. Serde collapses both to `None` by
/// default; wrapping in a second `Option` and applying this function with
/// `#[serde(default)]` keeps them apart.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Request body for `PATCH /api/v1/users/{uuid}`.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct PatchUserRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Absent key keeps the stored value, `null` erases it, an
    /// [`ErasableString`] carries the assignment.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<ErasableString>)]
    pub full_name: Option<Option<ErasableString>>,
}

impl From<PatchUserRequest> for UserPatch {
    fn from(request: PatchUserRequest) -> Self {
        let full_name = match request.full_name {
            None => FieldPatch::Keep,
            Some(None) => FieldPatch::Erase,
            Some(Some(ErasableString { value: None })) => FieldPatch::Erase,
            Some(Some(ErasableString { value: Some(name) })) => FieldPatch::Set(name),
        };
        Self {
            username: request.username,
            email: request.email,
            full_name,
        }
    }
}

/// List every user, ordered by full name with unset names last.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "Users", body = [UserResponse]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let users = state.users.get_all().await?;
    Ok(web::Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Fetch a single user by username.
#[utoipa::path(
    get,
    path = "/api/v1/users/username/{username}",
    params(("username" = String, Path, description = "Unique login name")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUserByUsername"
)]
#[get("/users/username/{username}")]
pub async fn get_user_by_username(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponse>> {
    let user = state.users.get_by_username(&path.into_inner()).await?;
    Ok(web::Json(user.into()))
}

/// Fetch a single user by internal numeric identifier.
///
/// Deprecated: the numeric identifier is a storage detail. Use
/// `/users/username/{username}` instead. Kept for callers that still hold
/// numeric ids; not advertised in the OpenAPI document.
#[get("/users/id/{id}")]
pub async fn get_user_by_id(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponse>> {
    let id = parse_numeric_id("id", &path.into_inner())?;
    let user = state.users.get_by_id(id).await?;
    Ok(web::Json(user.into()))
}

/// Create a user. The identity fields are generated by the store and
/// returned in the response.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Created", body = UserResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Username or email already in use", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    let new_user = NewUser::from(payload.into_inner());
    let created = state.users.create(&new_user).await?;
    Ok(HttpResponse::Created().json(UserResponse::from(created)))
}

/// Partially update a user identified by public UUID.
#[utoipa::path(
    patch,
    path = "/api/v1/users/{uuid}",
    params(("uuid" = Uuid, Path, description = "Public user identity")),
    request_body = PatchUserRequest,
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 409, description = "Username or email already in use", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "patchUser"
)]
#[patch("/users/{uuid}")]
pub async fn patch_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<PatchUserRequest>,
) -> ApiResult<HttpResponse> {
    let uuid = parse_uuid("uuid", &path.into_inner())?;
    let patch = UserPatch::from(payload.into_inner());
    state.users.patch_by_uuid(uuid, &patch).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete a user identified by public UUID.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{uuid}",
    params(("uuid" = Uuid, Path, description = "Public user identity")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{uuid}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let uuid = parse_uuid("uuid", &path.into_inner())?;
    state.users.delete_by_uuid(uuid).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Register every user route on the given scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_users)
        .service(get_user_by_username)
        .service(get_user_by_id)
        .service(create_user)
        .service(patch_user)
        .service(delete_user);
}
