//! Server functions for authentication and session management.
//!
//! Everything here talks to Appwrite with the admin API key or a stored
//! session secret; neither ever reaches the browser.

use dioxus::prelude::*;

use crate::appwrite::{self, equal_query, AppwriteClient, UserDocument};
use crate::state::AVATAR_PLACEHOLDER_URL;
use crate::types::{AuthUser, CreatedAccount};

/// Key of the Appwrite session handle inside the tower session.
#[cfg(feature = "server")]
const SESSION_KEY: &str = "appwrite_session";

/// Appwrite session handle persisted across requests.
#[cfg(feature = "server")]
#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct StoredSession {
    account_id: String,
    session_id: String,
    secret: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

/// Create (or reuse) the account behind `email` and send a one-time
/// password to it. `username` may be empty when an existing account signs
/// in.
#[server]
pub async fn create_account(
    username: String,
    email: String,
) -> Result<CreatedAccount, ServerFnError> {
    let client = admin_client()?;
    let config = appwrite::config().map_err(|e| ServerFnError::new(e.to_string()))?;

    let existing = find_user_by_email(&client, &email).await?;

    // Appwrite merges tokens by email: the returned user id is the
    // canonical account id whether or not the requested one gets used.
    let requested_id = uuid::Uuid::new_v4().to_string();
    let token = client
        .create_email_token(&requested_id, &email)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    tracing::debug!(account_id = %token.user_id, expire = %token.expire, "email token issued");

    if existing.is_none() {
        #[derive(serde::Serialize)]
        #[serde(rename_all = "camelCase")]
        struct NewUser<'a> {
            username: &'a str,
            email: &'a str,
            avatar: &'a str,
            account_id: &'a str,
        }

        let document_id = uuid::Uuid::new_v4().to_string();
        let _created: UserDocument = client
            .create_document(
                &config.database_id,
                &config.user_collection_id,
                &document_id,
                &NewUser {
                    username: &username,
                    email: &email,
                    avatar: AVATAR_PLACEHOLDER_URL,
                    account_id: &token.user_id,
                },
            )
            .await
            .map_err(|e| ServerFnError::new(e.to_string()))?;
        tracing::info!(account_id = %token.user_id, "user profile created");
    }

    Ok(CreatedAccount {
        account_id: token.user_id,
    })
}

/// Exchange the emailed one-time password for a session. Returns false on
/// a wrong or expired code so the caller can let the user retry.
#[server]
pub async fn verify_otp(account_id: String, otp: String) -> Result<bool, ServerFnError> {
    let client = admin_client()?;

    match client.create_token_session(&account_id, &otp).await {
        Ok(session) => {
            store_session(StoredSession {
                account_id: session.user_id,
                session_id: session.id,
                secret: session.secret,
                created_at: chrono::Utc::now(),
            })
            .await?;
            tracing::info!(account_id = %account_id, "session established");
            Ok(true)
        }
        Err(err) if err.is_unauthorized() => {
            tracing::debug!(account_id = %account_id, "otp rejected");
            Ok(false)
        }
        Err(err) => Err(ServerFnError::new(err.to_string())),
    }
}

/// Send a fresh one-time password to `email`.
#[server]
pub async fn resend_email_otp(email: String) -> Result<(), ServerFnError> {
    let client = admin_client()?;

    let requested_id = uuid::Uuid::new_v4().to_string();
    client
        .create_email_token(&requested_id, &email)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    Ok(())
}

/// Resolve the signed-in user from the stored session, if any.
#[server]
pub async fn get_current_user() -> Result<Option<AuthUser>, ServerFnError> {
    let Some(stored) = load_session().await? else {
        return Ok(None);
    };

    let config = appwrite::config().map_err(|e| ServerFnError::new(e.to_string()))?;

    // Validate the session against Appwrite before trusting it.
    let session_client = AppwriteClient::new(config).with_session(&stored.secret);
    let account = match session_client.get_account().await {
        Ok(account) => account,
        Err(err) => {
            tracing::debug!(error = %err, "stored session rejected, clearing");
            clear_session().await?;
            return Ok(None);
        }
    };

    let admin = admin_client()?;
    let list = admin
        .list_documents::<UserDocument>(
            &config.database_id,
            &config.user_collection_id,
            &[equal_query("accountId", &account.id)],
        )
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(list.documents.into_iter().next().map(|doc| AuthUser {
        owner_id: doc.id,
        account_id: doc.account_id,
        username: doc.username,
        email: doc.email,
        avatar: doc.avatar,
    }))
}

/// Sign out: best-effort invalidation of the Appwrite session, then drop
/// the local one. Navigation after sign-out is the caller's concern.
#[server]
pub async fn sign_out() -> Result<(), ServerFnError> {
    if let Some(stored) = load_session().await? {
        if let Ok(config) = appwrite::config() {
            let client = AppwriteClient::new(config).with_session(&stored.secret);
            if let Err(err) = client.delete_current_session().await {
                tracing::warn!(error = %err, "failed to invalidate appwrite session");
            }
        }
    }
    clear_session().await
}

#[cfg(feature = "server")]
fn admin_client() -> Result<AppwriteClient, ServerFnError> {
    let config = appwrite::config().map_err(|e| ServerFnError::new(e.to_string()))?;
    Ok(AppwriteClient::new(config).with_key(&config.api_key))
}

#[cfg(feature = "server")]
async fn find_user_by_email(
    client: &AppwriteClient,
    email: &str,
) -> Result<Option<UserDocument>, ServerFnError> {
    let config = appwrite::config().map_err(|e| ServerFnError::new(e.to_string()))?;
    let list = client
        .list_documents::<UserDocument>(
            &config.database_id,
            &config.user_collection_id,
            &[equal_query("email", email)],
        )
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    Ok(list.documents.into_iter().next())
}

#[cfg(feature = "server")]
async fn store_session(stored: StoredSession) -> Result<(), ServerFnError> {
    use tower_sessions::Session;

    let session: Session = extract()
        .await
        .map_err(|e| ServerFnError::new(format!("failed to get session: {e:?}")))?;
    session
        .insert(SESSION_KEY, stored)
        .await
        .map_err(|e| ServerFnError::new(format!("failed to store session: {e}")))?;
    Ok(())
}

#[cfg(feature = "server")]
async fn load_session() -> Result<Option<StoredSession>, ServerFnError> {
    use tower_sessions::Session;

    let session: Session = extract()
        .await
        .map_err(|e| ServerFnError::new(format!("failed to get session: {e:?}")))?;
    session
        .get(SESSION_KEY)
        .await
        .map_err(|e| ServerFnError::new(format!("failed to read session: {e}")))
}

#[cfg(feature = "server")]
async fn clear_session() -> Result<(), ServerFnError> {
    use tower_sessions::Session;

    let session: Session = extract()
        .await
        .map_err(|e| ServerFnError::new(format!("failed to get session: {e:?}")))?;
    session
        .flush()
        .await
        .map_err(|e| ServerFnError::new(format!("failed to clear session: {e}")))?;
    Ok(())
}

#[cfg(all(test, feature = "server"))]
mod tests {
    use super::*;

    // The session store keeps records as JSON values; the stored handle
    // must survive that form intact.
    #[test]
    fn stored_session_survives_the_session_store() {
        let stored = StoredSession {
            account_id: "acc_123".to_string(),
            session_id: "ses_1".to_string(),
            secret: "tok_secret".to_string(),
            created_at: chrono::Utc::now(),
        };

        let value = serde_json::to_value(&stored).expect("session handle should serialize");
        let back: StoredSession =
            serde_json::from_value(value).expect("session handle should deserialize");

        assert_eq!(back.account_id, stored.account_id);
        assert_eq!(back.session_id, stored.session_id);
        assert_eq!(back.secret, stored.secret);
        assert_eq!(back.created_at, stored.created_at);
    }
}
