//! User endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::books::BookResponse;
use crate::db::repos::{NewUser, User, UserChanges, UserRepo, UserWithBooks};
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::{password, Email, Username};

/// Create user request
#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Update user request: absent fields are left unchanged
#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// User response (read view, never carries the password)
#[derive(Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
        }
    }
}

/// User response with embedded books (one level deep)
#[derive(Serialize)]
pub struct UserWithBooksResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub books: Vec<BookResponse>,
}

impl From<UserWithBooks> for UserWithBooksResponse {
    fn from(u: UserWithBooks) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            books: u.books.into_iter().map(BookResponse::from).collect(),
        }
    }
}

/// POST /users/ - create a new user
async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let new = NewUser {
        username: Username::new(&req.username)?,
        email: Email::new(&req.email)?,
        password_hash: password::hash(&req.password)?,
    };
    let user = UserRepo::new(&state.pool).create(new).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// GET /users/ - list all users with their books
async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<UserWithBooksResponse>>, ApiError> {
    let users = UserRepo::new(&state.pool).list_with_books().await?;
    Ok(Json(
        users.into_iter().map(UserWithBooksResponse::from).collect(),
    ))
}

/// GET /users/{id} - get a single user with their books
async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<UserWithBooksResponse>, ApiError> {
    let user = UserRepo::new(&state.pool).get_with_books(id).await?;
    Ok(Json(UserWithBooksResponse::from(user)))
}

/// PUT /users/{id} - partial update, only provided fields change
async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let changes = UserChanges {
        username: req.username.as_deref().map(Username::new).transpose()?,
        email: req.email.as_deref().map(Email::new).transpose()?,
        password_hash: match req.password.as_deref() {
            Some(plain) => Some(password::hash(plain)?),
            None => None,
        },
    };
    let user = UserRepo::new(&state.pool).update(id, changes).await?;
    Ok(Json(UserResponse::from(user)))
}

/// DELETE /users/{id} - hard delete
async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    UserRepo::new(&state.pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// User routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users/", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}
