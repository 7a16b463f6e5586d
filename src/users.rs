//! Local credential store: account creation and login verification.
//!
//! Passwords are stored as `v1$<salt-hex>$<digest-hex>` where the digest is
//! SHA-256 over the salt and the password. The salt is 16 random bytes per
//! account.

use rand::Rng;
use sha2::{Digest, Sha256};
use sqlx::SqlitePool;

use crate::model::User;

/// Errors from the credential store.
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    /// Username or email already registered
    #[error("username or email already taken")]
    Duplicate,

    /// A required field was empty
    #[error("invalid registration: {0}")]
    Invalid(&'static str),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Create a new account.
///
/// # Returns
///
/// The database ID of the new user.
///
/// # Errors
///
/// [`UserError::Duplicate`] when the username or email is already taken;
/// [`UserError::Invalid`] when any field is empty.
pub async fn create_user(
    pool: &SqlitePool,
    username: &str,
    email: &str,
    password: &str,
) -> Result<i64, UserError> {
    if username.is_empty() {
        return Err(UserError::Invalid("username must not be empty"));
    }
    if email.is_empty() {
        return Err(UserError::Invalid("email must not be empty"));
    }
    if password.is_empty() {
        return Err(UserError::Invalid("password must not be empty"));
    }

    let password_hash = hash_password(password);

    let result = sqlx::query("INSERT INTO users (username, email, password_hash) VALUES (?, ?, ?)")
        .bind(username)
        .bind(email)
        .bind(&password_hash)
        .execute(pool)
        .await;

    match result {
        Ok(done) => Ok(done.last_insert_rowid()),
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            Err(UserError::Duplicate)
        }
        Err(e) => Err(UserError::Database(e)),
    }
}

/// Look up a user by username.
pub async fn find_by_username(pool: &SqlitePool, username: &str) -> sqlx::Result<Option<User>> {
    sqlx::query_as(
        "SELECT id, username, email, password_hash, created_at FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await
}

/// Verify a username/password pair.
///
/// # Returns
///
/// The matching user, or `None` when the username is unknown or the
/// password does not match. The two cases are indistinguishable to the
/// caller.
pub async fn authenticate(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<Option<User>, UserError> {
    let Some(user) = find_by_username(pool, username).await? else {
        return Ok(None);
    };

    if verify_password(password, &user.password_hash) {
        Ok(Some(user))
    } else {
        Ok(None)
    }
}

/// Hash a password with a fresh random salt.
fn hash_password(password: &str) -> String {
    let salt: [u8; 16] = rand::rng().random();
    let salt_hex = to_hex(&salt);
    let digest = digest_hex(&salt_hex, password);
    format!("v1${salt_hex}${digest}")
}

/// Check a password against a stored `v1$salt$digest` value.
fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.split('$');
    let (Some("v1"), Some(salt_hex), Some(digest), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    digest_hex(salt_hex, password) == digest
}

fn digest_hex(salt_hex: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt_hex.as_bytes());
    hasher.update(b"$");
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
