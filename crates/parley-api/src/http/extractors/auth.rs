//! API key authentication extractor.
//!
//! Extracts and verifies API keys from:
//! - `Authorization: Bearer <key>` header
//! - `X-API-Key: <key>` header
//!
//! Keys are SHA-256 hashed and compared against the `api_keys` table; the
//! matching row's `user_id` becomes the request identity. The chat core
//! only ever sees that opaque identifier -- credential parsing stays here.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use sha2::{Digest, Sha256};
use sqlx::Row;

use crate::http::error::AppError;
use crate::state::AppState;

/// Authenticated request identity. Extracting this validates the API key.
pub struct Authenticated {
    /// Opaque user identifier bound to the presented key.
    pub user_id: String,
}

impl FromRequestParts<AppState> for Authenticated {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let api_key = extract_api_key(parts)?;
        let key_hash = hash_api_key(&api_key);

        let result = sqlx::query("SELECT id, user_id FROM api_keys WHERE key_hash = ?")
            .bind(&key_hash)
            .fetch_optional(&state.db_pool.reader)
            .await
            .map_err(|e| AppError::Internal(format!("Database error: {e}")))?;

        match result {
            Some(row) => {
                // Update last_used_at (best effort, don't fail the request)
                let id: String = row.get("id");
                let user_id: String = row.get("user_id");
                let now = chrono::Utc::now().to_rfc3339();
                let _ = sqlx::query("UPDATE api_keys SET last_used_at = ? WHERE id = ?")
                    .bind(&now)
                    .bind(&id)
                    .execute(&state.db_pool.writer)
                    .await;
                Ok(Authenticated { user_id })
            }
            None => Err(AppError::Unauthorized(
                "Invalid API key. Provide a valid key via 'Authorization: Bearer <key>' or 'X-API-Key: <key>' header.".to_string(),
            )),
        }
    }
}

/// Extract the API key from request headers.
fn extract_api_key(parts: &Parts) -> Result<String, AppError> {
    // Try Authorization: Bearer <key>
    if let Some(auth) = parts.headers.get("authorization") {
        let auth_str = auth.to_str().map_err(|_| {
            AppError::Unauthorized("Invalid Authorization header encoding".to_string())
        })?;
        if let Some(key) = auth_str.strip_prefix("Bearer ") {
            return Ok(key.trim().to_string());
        }
    }

    // Try X-API-Key header
    if let Some(key) = parts.headers.get("x-api-key") {
        let key_str = key.to_str().map_err(|_| {
            AppError::Unauthorized("Invalid X-API-Key header encoding".to_string())
        })?;
        return Ok(key_str.trim().to_string());
    }

    Err(AppError::Unauthorized(
        "Missing API key. Provide via 'Authorization: Bearer <key>' or 'X-API-Key: <key>' header.".to_string(),
    ))
}

/// Compute SHA-256 hash of an API key (lowercase hex).
pub fn hash_api_key(key: &str) -> String {
    let digest = Sha256::digest(key.as_bytes());
    format!("{:x}", digest)
}

/// Mint a new API key bound to an opaque user id.
///
/// Returns the plaintext key; only its hash is stored, so the key is shown
/// to the operator exactly once.
pub async fn mint_api_key(
    pool: &parley_infra::sqlite::DatabasePool,
    user_id: &str,
    name: &str,
) -> anyhow::Result<String> {
    let plaintext_key = format!(
        "parley_{}{}",
        uuid::Uuid::new_v4().simple(),
        uuid::Uuid::new_v4().simple()
    );
    let key_hash = hash_api_key(&plaintext_key);
    let id = uuid::Uuid::now_v7().to_string();
    let now = chrono::Utc::now().to_rfc3339();

    sqlx::query(
        "INSERT INTO api_keys (id, key_hash, user_id, name, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(&key_hash)
    .bind(user_id)
    .bind(name)
    .bind(&now)
    .execute(&pool.writer)
    .await?;

    Ok(plaintext_key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_infra::sqlite::DatabasePool;

    #[test]
    fn test_hash_is_hex_sha256() {
        let hash = hash_api_key("parley_test");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
        // Deterministic
        assert_eq!(hash, hash_api_key("parley_test"));
    }

    #[tokio::test]
    async fn test_mint_stores_only_the_hash() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        std::mem::forget(dir);
        let pool = DatabasePool::new(&url).await.unwrap();

        let key = mint_api_key(&pool, "u-42", "ci").await.unwrap();
        assert!(key.starts_with("parley_"));

        let row = sqlx::query("SELECT key_hash, user_id, name FROM api_keys")
            .fetch_one(&pool.reader)
            .await
            .unwrap();
        let stored_hash: String = row.get("key_hash");
        let user_id: String = row.get("user_id");
        let name: String = row.get("name");
        assert_eq!(stored_hash, hash_api_key(&key));
        assert_ne!(stored_hash, key);
        assert_eq!(user_id, "u-42");
        assert_eq!(name, "ci");
    }
}
