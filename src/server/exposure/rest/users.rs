//! REST handlers for users

use crate::core::error::{AppError, EntityError, RequestError};
use crate::core::validation::ApiJson;
use crate::entities::{Credentials, NewUser, UserPatch, UserResponse};
use crate::server::entity_registry::EntityDescriptor;
use crate::services::UserService;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use std::sync::Arc;

type UserState = Arc<UserService>;

fn not_found(id: String) -> AppError {
    EntityError::NotFound {
        entity_type: "user".to_string(),
        id,
    }
    .into()
}

pub async fn list_users(State(users): State<UserState>) -> Result<Json<Vec<UserResponse>>, AppError> {
    let all = users.list_all().await?;
    Ok(Json(all.into_iter().map(UserResponse::from).collect()))
}

pub async fn get_user(
    State(users): State<UserState>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    match users.get_by_id(&id).await? {
        Some(user) => Ok(Json(user.into())),
        None => Err(not_found(id)),
    }
}

pub async fn create_user(
    State(users): State<UserState>,
    ApiJson(input): ApiJson<NewUser>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let user = users.create(input).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

pub async fn update_user(
    State(users): State<UserState>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<UserPatch>,
) -> Result<Json<UserResponse>, AppError> {
    match users.update(&id, patch).await? {
        Some(user) => Ok(Json(user.into())),
        None => Err(not_found(id)),
    }
}

pub async fn delete_user(
    State(users): State<UserState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if users.delete(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// Check an email/password pair; no session or token is created
pub async fn authenticate(
    State(users): State<UserState>,
    ApiJson(credentials): ApiJson<Credentials>,
) -> Result<Json<UserResponse>, AppError> {
    match users
        .verify_credentials(&credentials.email, &credentials.password)
        .await?
    {
        Some(user) => Ok(Json(user.into())),
        None => Err(RequestError::Unauthorized {
            message: "Invalid email or password".to_string(),
        }
        .into()),
    }
}

/// Routes under `/users`
pub struct UserDescriptor {
    service: UserState,
}

impl UserDescriptor {
    pub fn new(service: Arc<UserService>) -> Self {
        Self { service }
    }
}

impl EntityDescriptor for UserDescriptor {
    fn collection(&self) -> &'static str {
        "users"
    }

    fn routes(&self) -> Router {
        let root = self.collection();
        Router::new()
            .route(&format!("/{}", root), get(list_users).post(create_user))
            .route(&format!("/{}/authenticate", root), post(authenticate))
            .route(
                &format!("/{}/{{id}}", root),
                get(get_user).put(update_user).delete(delete_user),
            )
            .with_state(self.service.clone())
    }
}
