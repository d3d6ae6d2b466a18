//! Repository implementations for database access

pub mod books;
pub mod users;

pub use books::{Book, BookOwner, BookRepo, BookWithOwner, NewBook};
pub use users::{NewUser, User, UserChanges, UserRepo, UserWithBooks};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} {id}")]
    NotFound { resource: &'static str, id: i64 },
}
