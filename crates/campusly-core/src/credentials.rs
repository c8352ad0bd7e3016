//! Session persistence in the system keyring.
//!
//! The JWT pair is stored as JSON under one entry so the app can resume
//! a session on the next launch:
//! - Linux: Secret Service (GNOME Keyring, `KWallet`)
//! - macOS: Keychain
//! - Windows: Credential Manager

use campusly_api::Credential;
use keyring::Entry;
use tracing::{debug, warn};

/// Service name used for keyring entries.
const SERVICE_NAME: &str = "campusly";

/// Entry holding the serialized credential.
const SESSION_ENTRY: &str = "session";

/// Error type for credential operations.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// Failed to access keyring.
    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    /// Stored value is not a credential.
    #[error("Stored session is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Result type for credential operations.
pub type CredentialResult<T> = std::result::Result<T, CredentialError>;

fn entry() -> CredentialResult<Entry> {
    Ok(Entry::new(SERVICE_NAME, SESSION_ENTRY)?)
}

/// Stores the session credential.
///
/// # Errors
///
/// Returns an error if the keyring operation fails.
pub fn store_session(credential: &Credential) -> CredentialResult<()> {
    let json = serde_json::to_string(credential)?;
    entry()?.set_password(&json)?;
    debug!("Stored session credential");
    Ok(())
}

/// Loads the session credential, if one was stored.
///
/// A corrupt entry is deleted and reported as absent.
///
/// # Errors
///
/// Returns an error if the keyring operation fails.
pub fn load_session() -> CredentialResult<Option<Credential>> {
    let entry = entry()?;
    match entry.get_password() {
        Ok(json) => match serde_json::from_str(&json) {
            Ok(credential) => Ok(Some(credential)),
            Err(e) => {
                warn!("Discarding unreadable session credential: {e}");
                delete_session()?;
                Ok(None)
            }
        },
        Err(keyring::Error::NoEntry) => {
            debug!("No stored session credential");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Deletes the stored session credential.
///
/// # Errors
///
/// Returns an error if the keyring operation fails (except for a missing
/// entry).
pub fn delete_session() -> CredentialResult<()> {
    match entry()?.delete_credential() {
        Ok(()) => {
            debug!("Deleted session credential");
            Ok(())
        }
        Err(keyring::Error::NoEntry) => {
            debug!("No session credential to delete");
            Ok(())
        }
        Err(e) => {
            warn!("Failed to delete session credential: {e}");
            Err(e.into())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    // These tests touch the real system keyring; run with `cargo test -- --ignored`.

    use super::*;

    #[test]
    #[ignore = "Interacts with system keyring"]
    fn test_store_load_delete_session() {
        let credential = Credential::new("access-token").with_refresh("refresh-token");
        store_session(&credential).unwrap();
        assert_eq!(load_session().unwrap(), Some(credential));

        delete_session().unwrap();
        assert_eq!(load_session().unwrap(), None);
    }

    #[test]
    #[ignore = "Interacts with system keyring"]
    fn test_delete_missing_session_is_ok() {
        delete_session().unwrap();
        delete_session().unwrap();
    }
}
