//! CSRF token generation and verification.
//!
//! Tokens are scoped to a purpose string, so a token minted for a row
//! toggle link cannot authorize a bulk submission and vice versa. Tokens
//! are single-use and time-limited.

use anyhow::{Result, bail};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tower_sessions::Session;

/// Purpose for single favorite/unfavorite toggle links.
pub const TOGGLE_PURPOSE: &str = "favorite-toggle";

/// Purpose for the bulk-action form.
pub const BULK_PURPOSE: &str = "bulk-favorites";

/// Purpose for the login form.
pub const LOGIN_PURPOSE: &str = "login";

/// Session key prefix for stored tokens; the purpose completes the key.
const CSRF_SESSION_PREFIX: &str = "csrf_tokens";

/// Maximum number of live tokens per purpose per session.
const MAX_TOKENS: usize = 10;

/// Token validity period in seconds (1 hour).
const TOKEN_VALIDITY_SECS: i64 = 3600;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TokenEntry {
    token: String,
    issued_at: i64,
}

impl TokenEntry {
    fn is_live(&self, now: i64) -> bool {
        now - self.issued_at <= TOKEN_VALIDITY_SECS
    }
}

fn session_key(purpose: &str) -> String {
    format!("{CSRF_SESSION_PREFIX}:{purpose}")
}

/// Generate a CSRF token for `purpose` and store it in the session.
pub async fn generate_csrf_token(session: &Session, purpose: &str) -> Result<String> {
    let mut random_bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut random_bytes);

    let issued_at = chrono::Utc::now().timestamp();

    let mut hasher = Sha256::new();
    hasher.update(random_bytes);
    hasher.update(issued_at.to_le_bytes());
    let token = hex::encode(hasher.finalize());

    let key = session_key(purpose);
    let mut tokens: Vec<TokenEntry> = session.get(&key).await.unwrap_or(None).unwrap_or_default();

    tokens.push(TokenEntry {
        token: token.clone(),
        issued_at,
    });

    // Keep only the MAX_TOKENS most recent
    if tokens.len() > MAX_TOKENS {
        let skip = tokens.len() - MAX_TOKENS;
        tokens.drain(..skip);
    }

    session
        .insert(&key, tokens)
        .await
        .map_err(|e| anyhow::anyhow!("failed to store CSRF token: {}", e))?;

    Ok(token)
}

/// Verify a CSRF token for `purpose` against the session.
///
/// A matching live token is consumed (single-use). Expired tokens are
/// pruned as a side effect.
pub async fn verify_csrf_token(session: &Session, purpose: &str, submitted: &str) -> Result<bool> {
    if submitted.is_empty() {
        bail!("empty CSRF token");
    }

    let key = session_key(purpose);
    let mut tokens: Vec<TokenEntry> = session.get(&key).await.unwrap_or(None).unwrap_or_default();

    if tokens.is_empty() {
        return Ok(false);
    }

    let now = chrono::Utc::now().timestamp();

    let Some(index) = tokens
        .iter()
        .position(|entry| entry.token == submitted && entry.is_live(now))
    else {
        return Ok(false);
    };

    tokens.remove(index);
    tokens.retain(|entry| entry.is_live(now));

    session
        .insert(&key, tokens)
        .await
        .map_err(|e| anyhow::anyhow!("failed to update CSRF tokens: {}", e))?;

    Ok(true)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn token_format_is_hex_sha256() {
        // Verify token is hex encoded SHA256 (64 chars)
        let token = hex::encode(Sha256::digest(b"test"));
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn purposes_map_to_distinct_session_keys() {
        assert_ne!(session_key(TOGGLE_PURPOSE), session_key(BULK_PURPOSE));
    }

    #[test]
    fn expired_entries_are_not_live() {
        let now = chrono::Utc::now().timestamp();
        let entry = TokenEntry {
            token: "t".to_string(),
            issued_at: now - TOKEN_VALIDITY_SECS - 1,
        };
        assert!(!entry.is_live(now));
        assert!(
            TokenEntry {
                issued_at: now,
                ..entry
            }
            .is_live(now)
        );
    }
}
