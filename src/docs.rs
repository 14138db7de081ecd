use utoipa::OpenApi;

use crate::{
    error::ErrorBody,
    health::{self, HealthResponse},
    users::{
        dto::{CreateUserRequest, PublicUser, UpdateUserRequest},
        handlers,
    },
};

#[derive(OpenApi)]
#[openapi(
    info(title = "GRACE API", description = "User management endpoints"),
    paths(
        handlers::create_user,
        handlers::get_user,
        handlers::update_user,
        handlers::delete_user,
        handlers::get_all_users,
        health::health,
    ),
    components(schemas(
        CreateUserRequest,
        UpdateUserRequest,
        PublicUser,
        ErrorBody,
        HealthResponse
    )),
    tags(
        (name = "users", description = "User related endpoints"),
        (name = "health", description = "Liveness and database status")
    )
)]
pub struct ApiDoc;
