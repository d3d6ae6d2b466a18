//! Book endpoints
//!
//! Books expose only create and list; there is no update/delete/get-by-id
//! for this resource.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::repos::{Book, BookOwner, BookRepo, BookWithOwner, NewBook};
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// Create book request
#[derive(Deserialize)]
pub struct CreateBookRequest {
    pub title: String,
    pub author: String,
    pub user_id: Option<i64>,
}

/// Book response (read view, foreign key omitted)
#[derive(Serialize)]
pub struct BookResponse {
    pub id: i64,
    pub title: String,
    pub author: String,
}

impl From<Book> for BookResponse {
    fn from(b: Book) -> Self {
        Self {
            id: b.id,
            title: b.title,
            author: b.author,
        }
    }
}

/// Owner as embedded in book listings
#[derive(Serialize)]
pub struct OwnerResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
}

impl From<BookOwner> for OwnerResponse {
    fn from(o: BookOwner) -> Self {
        Self {
            id: o.id,
            username: o.username,
            email: o.email,
        }
    }
}

/// Book response with its owner embedded (one level deep)
#[derive(Serialize)]
pub struct BookWithOwnerResponse {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub user: Option<OwnerResponse>,
}

impl From<BookWithOwner> for BookWithOwnerResponse {
    fn from(b: BookWithOwner) -> Self {
        Self {
            id: b.id,
            title: b.title,
            author: b.author,
            user: b.owner.map(OwnerResponse::from),
        }
    }
}

/// POST /books/ - create a new book, optionally owned
async fn create_book(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateBookRequest>,
) -> Result<(StatusCode, Json<BookResponse>), ApiError> {
    let book = BookRepo::new(&state.pool)
        .create(NewBook {
            title: req.title,
            author: req.author,
            user_id: req.user_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(BookResponse::from(book))))
}

/// GET /books/ - list all books with their owners
async fn list_books(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BookWithOwnerResponse>>, ApiError> {
    let books = BookRepo::new(&state.pool).list_with_owner().await?;
    Ok(Json(
        books.into_iter().map(BookWithOwnerResponse::from).collect(),
    ))
}

/// Book routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/books/", get(list_books).post(create_book))
}
