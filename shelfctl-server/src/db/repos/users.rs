//! User repository
//!
//! CRUD over the users table. Book ownership is expanded explicitly
//! at the call site; nothing is lazily loaded per row.

use sqlx::{FromRow, PgPool, Row};

use super::books::Book;
use super::DbError;
use crate::models::{Email, Username};

/// User record from database. `password` holds the argon2 hash.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password: String,
}

/// User with their owned books for list/detail display
#[derive(Debug, Clone)]
pub struct UserWithBooks {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub books: Vec<Book>,
}

/// Payload for inserting a new user
#[derive(Debug)]
pub struct NewUser {
    pub username: Username,
    pub email: Email,
    pub password_hash: String,
}

/// Sparse field changes for an update. `None` leaves the column untouched.
#[derive(Debug, Default)]
pub struct UserChanges {
    pub username: Option<Username>,
    pub email: Option<Email>,
    pub password_hash: Option<String>,
}

/// User repository
pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a user, returning the stored row with its generated id.
    ///
    /// Duplicate username/email surfaces as a store constraint error.
    pub async fn create(&self, new: NewUser) -> Result<User, DbError> {
        let user: User = sqlx::query_as(
            r#"
            INSERT INTO users (username, email, password)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password
            "#,
        )
        .bind(new.username.as_str())
        .bind(new.email.as_str())
        .bind(&new.password_hash)
        .fetch_one(self.pool)
        .await?;

        Ok(user)
    }

    /// List all users with their books.
    ///
    /// Single LEFT JOIN query, grouped in code (no N+1).
    pub async fn list_with_books(&self) -> Result<Vec<UserWithBooks>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT
                u.id,
                u.username,
                u.email,
                b.id AS book_id,
                b.title,
                b.author
            FROM users u
            LEFT JOIN books b ON b.user_id = u.id
            ORDER BY u.id, b.id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        let mut users: Vec<UserWithBooks> = Vec::new();
        for row in rows {
            let id: i64 = row.get("id");
            if users.last().map(|u| u.id) != Some(id) {
                users.push(UserWithBooks {
                    id,
                    username: row.get("username"),
                    email: row.get("email"),
                    books: Vec::new(),
                });
            }
            // book columns are NULL for users without books
            if let Some(book_id) = row.get::<Option<i64>, _>("book_id") {
                let user = users.last_mut().expect("just pushed");
                user.books.push(Book {
                    id: book_id,
                    title: row.get("title"),
                    author: row.get("author"),
                    user_id: Some(id),
                });
            }
        }

        Ok(users)
    }

    /// Get a single user by id, with their books.
    pub async fn get_with_books(&self, id: i64) -> Result<UserWithBooks, DbError> {
        let user: User = sqlx::query_as(
            r#"
            SELECT id, username, email, password
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(DbError::NotFound {
            resource: "Usuario",
            id,
        })?;

        let books: Vec<Book> = sqlx::query_as(
            r#"
            SELECT id, title, author, user_id
            FROM books
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        Ok(UserWithBooks {
            id: user.id,
            username: user.username,
            email: user.email,
            books,
        })
    }

    /// Apply a sparse update: only fields present in `changes` are modified.
    ///
    /// Single statement via COALESCE, so a concurrent writer can never
    /// observe a half-applied update.
    pub async fn update(&self, id: i64, changes: UserChanges) -> Result<User, DbError> {
        let user: User = sqlx::query_as(
            r#"
            UPDATE users
            SET username = COALESCE($2, username),
                email    = COALESCE($3, email),
                password = COALESCE($4, password)
            WHERE id = $1
            RETURNING id, username, email, password
            "#,
        )
        .bind(id)
        .bind(changes.username.as_ref().map(Username::as_str))
        .bind(changes.email.as_ref().map(Email::as_str))
        .bind(changes.password_hash.as_deref())
        .fetch_optional(self.pool)
        .await?
        .ok_or(DbError::NotFound {
            resource: "Usuario",
            id,
        })?;

        Ok(user)
    }

    /// Hard delete by id. Owned books are orphaned, not deleted.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "Usuario",
                id,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repos::books::{BookRepo, NewBook};
    use crate::db::{create_pool, migrations};
    use crate::models::password;

    // Integration tests - run with DATABASE_URL set
    // cargo test -p shelfctl-server -- --ignored

    async fn setup() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");
        migrations::run(&pool).await.expect("migrations failed");
        pool
    }

    fn unique(prefix: &str) -> String {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("clock before epoch")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }

    fn new_user(name: &str) -> NewUser {
        NewUser {
            username: Username::new(name).expect("valid username"),
            email: Email::new(&format!("{name}@example.com")).expect("valid email"),
            password_hash: password::hash("s3cret").expect("hash failed"),
        }
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn create_then_get_roundtrip() {
        let pool = setup().await;
        let repo = UserRepo::new(&pool);
        let name = unique("roundtrip");

        let created = repo.create(new_user(&name)).await.expect("create failed");
        assert!(created.id > 0);

        let fetched = repo
            .get_with_books(created.id)
            .await
            .expect("get failed");
        assert_eq!(fetched.username, name);
        assert_eq!(fetched.email, format!("{name}@example.com"));
        assert!(fetched.books.is_empty());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn duplicate_username_rejected() {
        let pool = setup().await;
        let repo = UserRepo::new(&pool);
        let name = unique("dup");

        repo.create(new_user(&name)).await.expect("first create failed");

        // Same username, different email: unique constraint must fire
        let mut second = new_user(&name);
        second.email = Email::new(&format!("other-{name}@example.com")).expect("valid email");
        let err = repo.create(second).await.unwrap_err();
        assert!(matches!(err, DbError::Sqlx(_)));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn owned_book_appears_in_books_list() {
        let pool = setup().await;
        let repo = UserRepo::new(&pool);
        let name = unique("owner");

        let user = repo.create(new_user(&name)).await.expect("create failed");
        let book = BookRepo::new(&pool)
            .create(NewBook {
                title: "Rayuela".into(),
                author: "Julio Cortazar".into(),
                user_id: Some(user.id),
            })
            .await
            .expect("book create failed");

        let fetched = repo.get_with_books(user.id).await.expect("get failed");
        assert!(fetched.books.iter().any(|b| b.id == book.id));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn sparse_update_changes_only_email() {
        let pool = setup().await;
        let repo = UserRepo::new(&pool);
        let name = unique("sparse");

        let created = repo.create(new_user(&name)).await.expect("create failed");
        let new_email = format!("new-{name}@example.com");

        let updated = repo
            .update(
                created.id,
                UserChanges {
                    email: Some(Email::new(&new_email).expect("valid email")),
                    ..Default::default()
                },
            )
            .await
            .expect("update failed");

        assert_eq!(updated.email, new_email);
        assert_eq!(updated.username, created.username);
        assert_eq!(updated.password, created.password);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn delete_then_get_not_found() {
        let pool = setup().await;
        let repo = UserRepo::new(&pool);
        let name = unique("gone");

        let created = repo.create(new_user(&name)).await.expect("create failed");
        repo.delete(created.id).await.expect("delete failed");

        let err = repo.get_with_books(created.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));

        let err = repo.delete(created.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn deleting_owner_orphans_book() {
        let pool = setup().await;
        let repo = UserRepo::new(&pool);
        let name = unique("orphan");

        let user = repo.create(new_user(&name)).await.expect("create failed");
        let book = BookRepo::new(&pool)
            .create(NewBook {
                title: "Ficciones".into(),
                author: "Jorge Luis Borges".into(),
                user_id: Some(user.id),
            })
            .await
            .expect("book create failed");

        repo.delete(user.id).await.expect("delete failed");

        let books = BookRepo::new(&pool)
            .list_with_owner()
            .await
            .expect("list failed");
        let orphaned = books
            .iter()
            .find(|b| b.id == book.id)
            .expect("book should survive owner deletion");
        assert!(orphaned.owner.is_none());
    }
}
