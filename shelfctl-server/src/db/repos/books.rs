//! Book repository
//!
//! Books optionally reference an owning user. The asymmetric surface
//! (no update/delete/get-by-id) mirrors the API contract.

use sqlx::{FromRow, PgPool, Row};

use super::DbError;

/// Book record from database
#[derive(Debug, Clone, FromRow)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub user_id: Option<i64>,
}

/// Owning user, as embedded in book listings (never carries the password)
#[derive(Debug, Clone)]
pub struct BookOwner {
    pub id: i64,
    pub username: String,
    pub email: String,
}

/// Book with its owner for list display
#[derive(Debug, Clone)]
pub struct BookWithOwner {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub owner: Option<BookOwner>,
}

/// Payload for inserting a new book
#[derive(Debug)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub user_id: Option<i64>,
}

/// Book repository
pub struct BookRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> BookRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a book, returning the stored row with its generated id.
    ///
    /// A dangling `user_id` surfaces as a store constraint error.
    pub async fn create(&self, new: NewBook) -> Result<Book, DbError> {
        let book: Book = sqlx::query_as(
            r#"
            INSERT INTO books (title, author, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, author, user_id
            "#,
        )
        .bind(&new.title)
        .bind(&new.author)
        .bind(new.user_id)
        .fetch_one(self.pool)
        .await?;

        Ok(book)
    }

    /// List all books with their owners.
    ///
    /// Single LEFT JOIN query (no N+1); unowned books get `owner: None`.
    pub async fn list_with_owner(&self) -> Result<Vec<BookWithOwner>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT
                b.id,
                b.title,
                b.author,
                u.id AS owner_id,
                u.username,
                u.email
            FROM books b
            LEFT JOIN users u ON u.id = b.user_id
            ORDER BY b.id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        let books = rows
            .into_iter()
            .map(|row| BookWithOwner {
                id: row.get("id"),
                title: row.get("title"),
                author: row.get("author"),
                owner: row.get::<Option<i64>, _>("owner_id").map(|id| BookOwner {
                    id,
                    username: row.get("username"),
                    email: row.get("email"),
                }),
            })
            .collect();

        Ok(books)
    }
}
