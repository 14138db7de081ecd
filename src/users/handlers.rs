use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult, ErrorBody},
    extract::ValidatedJson,
    state::AppState,
    users::{
        dto::{CreateUserRequest, PublicUser, UpdateUserRequest},
        services::UserService,
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(get_all_users).post(create_user))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
}

/// Ids that do not parse as UUIDs cannot be stored, so they are simply unknown.
fn parse_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::not_found())
}

#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = PublicUser),
        (status = 400, description = "Invalid body or email already exists", body = ErrorBody)
    )
)]
#[instrument(skip(users, payload))]
pub async fn create_user(
    State(users): State<UserService>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<PublicUser>)> {
    let user = users.create_user(payload).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = PublicUser),
        (status = 404, description = "User not found", body = ErrorBody)
    )
)]
#[instrument(skip(users))]
pub async fn get_user(
    State(users): State<UserService>,
    Path(id): Path<String>,
) -> ApiResult<Json<PublicUser>> {
    let user = users.get_user(parse_id(&id)?).await?;
    Ok(Json(user.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user", body = PublicUser),
        (status = 400, description = "Invalid body or email in use", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody)
    )
)]
#[instrument(skip(users, payload))]
pub async fn update_user(
    State(users): State<UserService>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<PublicUser>> {
    let user = users.update_user(parse_id(&id)?, payload).await?;
    Ok(Json(user.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found", body = ErrorBody)
    )
)]
#[instrument(skip(users))]
pub async fn delete_user(
    State(users): State<UserService>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    users.delete_user(parse_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "users",
    responses(
        (status = 200, description = "All users", body = [PublicUser]),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
#[instrument(skip(users))]
pub async fn get_all_users(State(users): State<UserService>) -> ApiResult<Json<Vec<PublicUser>>> {
    let list = users.get_all_users().await?;
    Ok(Json(list.into_iter().map(PublicUser::from).collect()))
}
