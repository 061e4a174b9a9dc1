//! Stable pseudonymous user identity.

use std::sync::Arc;

use rand::Rng;

use crate::storage::KeyValueStore;

/// Storage key holding the persisted user identifier.
pub const USER_ID_STORAGE_KEY: &str = "vitrine_user_id";

/// Length of the random suffix after the `anonymous_` prefix.
const SUFFIX_LEN: usize = 13;

/// Produces and persists a stable pseudonymous identifier.
///
/// The identifier is generated lazily on first need and then returned
/// unchanged for the rest of the client-storage lifetime. It correlates
/// events from the same browser profile without identifying a person.
pub struct IdentityProvider {
    storage: Arc<dyn KeyValueStore>,
}

impl IdentityProvider {
    /// Create a provider over the given storage capability.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    /// The user identifier for this client.
    ///
    /// Idempotent after the first call. If storage is unavailable the
    /// provider hands out a fresh transient identifier instead of failing;
    /// there is no error path.
    #[must_use]
    pub fn user_id(&self) -> String {
        match self.storage.get(USER_ID_STORAGE_KEY) {
            Ok(Some(id)) => return id,
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(error = %e, "identity storage unreadable");
            }
        }

        let id = generate_user_id();
        if let Err(e) = self.storage.set(USER_ID_STORAGE_KEY, &id) {
            tracing::warn!(error = %e, "identity not persisted, issuing transient id");
        }
        id
    }
}

/// Generate a fresh pseudonymous identifier.
///
/// 13 base-36 characters (~67 bits) - not cryptographic, but far beyond
/// what accidental collision across thousands of anonymous sessions needs.
fn generate_user_id() -> String {
    const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            // SAFETY: idx is always within bounds since random_range returns 0..CHARSET.len()
            char::from(*CHARSET.get(idx).expect("idx within bounds"))
        })
        .collect();
    format!("anonymous_{suffix}")
}
