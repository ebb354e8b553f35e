//! Typed client for the Appwrite REST API.
//!
//! Covers the account, database and storage operations the server
//! functions need. Requests carry either the project API key (admin
//! operations) or a session secret (operations on behalf of the
//! signed-in user).

use chrono::{DateTime, Utc};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::config::AppwriteConfig;

/// Error type for Appwrite operations.
#[derive(Debug, thiserror::Error)]
pub enum AppwriteError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("appwrite error {code} ({kind}): {message}")]
    Api {
        code: u16,
        kind: String,
        message: String,
    },

    #[error("appwrite configuration was not initialized at startup")]
    Uninitialized,
}

impl AppwriteError {
    /// True for authentication failures: a wrong or expired OTP secret, a
    /// revoked session.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppwriteError::Api { code: 401, .. })
    }
}

/// Error body returned by Appwrite for non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    code: u16,
    #[serde(rename = "type", default)]
    kind: String,
}

/// Token issued for email OTP verification.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailToken {
    #[serde(rename = "$id")]
    pub id: String,
    /// Canonical id of the account the code was mailed to.
    pub user_id: String,
    /// When the emailed code stops being accepted.
    pub expire: DateTime<Utc>,
}

/// Session created by exchanging an email token secret.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSession {
    #[serde(rename = "$id")]
    pub id: String,
    pub user_id: String,
    /// Secret for the `X-Appwrite-Session` header on later calls.
    #[serde(default)]
    pub secret: String,
    pub expire: DateTime<Utc>,
}

/// The account behind a session.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(rename = "$id")]
    pub id: String,
    pub name: String,
    pub email: String,
}

/// One page of a document listing.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentList<T> {
    pub total: u64,
    pub documents: Vec<T>,
}

/// A document in the user collection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDocument {
    #[serde(rename = "$id")]
    pub id: String,
    pub username: String,
    pub email: String,
    pub avatar: String,
    pub account_id: String,
}

/// Metadata of an uploaded bucket file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageFile {
    #[serde(rename = "$id")]
    pub id: String,
    pub name: String,
    pub size_original: u64,
    pub mime_type: String,
}

/// Client for the Appwrite REST API.
#[derive(Clone)]
pub struct AppwriteClient {
    http: reqwest::Client,
    endpoint: String,
    project_id: String,
    api_key: Option<String>,
    session_secret: Option<String>,
}

impl AppwriteClient {
    /// Create an unauthenticated client for the configured project.
    pub fn new(config: &AppwriteConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: config.endpoint.clone(),
            project_id: config.project_id.clone(),
            api_key: None,
            session_secret: None,
        }
    }

    /// Authenticate with the project API key (admin operations).
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Act on behalf of the user owning the session `secret`.
    pub fn with_session(mut self, secret: impl Into<String>) -> Self {
        self.session_secret = Some(secret.into());
        self
    }

    /// Issue an email OTP token. Appwrite resolves the account by email,
    /// creating one under `user_id` when the address is new; the returned
    /// `user_id` is always the canonical account id.
    pub async fn create_email_token(
        &self,
        user_id: &str,
        email: &str,
    ) -> Result<EmailToken, AppwriteError> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Body<'a> {
            user_id: &'a str,
            email: &'a str,
        }

        self.send(
            self.request(Method::POST, "/account/tokens/email")
                .json(&Body { user_id, email }),
        )
        .await
    }

    /// Exchange an emailed OTP secret for a session.
    pub async fn create_token_session(
        &self,
        user_id: &str,
        secret: &str,
    ) -> Result<TokenSession, AppwriteError> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Body<'a> {
            user_id: &'a str,
            secret: &'a str,
        }

        self.send(
            self.request(Method::POST, "/account/sessions/token")
                .json(&Body { user_id, secret }),
        )
        .await
    }

    /// Invalidate the session this client acts under.
    pub async fn delete_current_session(&self) -> Result<(), AppwriteError> {
        self.send_no_content(self.request(Method::DELETE, "/account/sessions/current"))
            .await
    }

    /// The account owning this client's session.
    pub async fn get_account(&self) -> Result<Account, AppwriteError> {
        self.send(self.request(Method::GET, "/account")).await
    }

    /// List documents of a collection, filtered by `queries` (see
    /// [`equal_query`]).
    pub async fn list_documents<R: DeserializeOwned>(
        &self,
        database_id: &str,
        collection_id: &str,
        queries: &[String],
    ) -> Result<DocumentList<R>, AppwriteError> {
        let path = format!("/databases/{database_id}/collections/{collection_id}/documents");
        let query: Vec<(&str, &str)> = queries
            .iter()
            .map(|query| ("queries[]", query.as_str()))
            .collect();
        self.send(self.request(Method::GET, &path).query(&query)).await
    }

    /// Create a document with the given id and payload.
    pub async fn create_document<D: Serialize, R: DeserializeOwned>(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        data: &D,
    ) -> Result<R, AppwriteError> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Body<'a, D> {
            document_id: &'a str,
            data: &'a D,
        }

        let path = format!("/databases/{database_id}/collections/{collection_id}/documents");
        self.send(
            self.request(Method::POST, &path)
                .json(&Body { document_id, data }),
        )
        .await
    }

    /// Upload raw bytes into a storage bucket.
    pub async fn upload_file(
        &self,
        bucket_id: &str,
        file_id: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<StorageFile, AppwriteError> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new()
            .text("fileId", file_id.to_string())
            .part("file", part);

        let path = format!("/storage/buckets/{bucket_id}/files");
        self.send(self.request(Method::POST, &path).multipart(form))
            .await
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let mut request = self
            .http
            .request(method, format!("{}{}", self.endpoint, path))
            .header("X-Appwrite-Project", &self.project_id);
        if let Some(key) = &self.api_key {
            request = request.header("X-Appwrite-Key", key);
        }
        if let Some(secret) = &self.session_secret {
            request = request.header("X-Appwrite-Session", secret);
        }
        request
    }

    async fn send<R: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<R, AppwriteError> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Self::api_error(status, response).await);
        }
        Ok(response.json().await?)
    }

    /// Like [`Self::send`] for endpoints answering with an empty body.
    async fn send_no_content(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<(), AppwriteError> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Self::api_error(status, response).await);
        }
        Ok(())
    }

    async fn api_error(status: StatusCode, response: reqwest::Response) -> AppwriteError {
        match response.json::<ErrorBody>().await {
            Ok(body) => AppwriteError::Api {
                code: body.code,
                kind: body.kind,
                message: body.message,
            },
            // Not all failures come from Appwrite itself (proxies, etc.)
            Err(_) => AppwriteError::Api {
                code: status.as_u16(),
                kind: "unknown".to_string(),
                message: status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string(),
            },
        }
    }
}

/// Appwrite JSON query string for `attribute == value`.
pub fn equal_query(attribute: &str, value: &str) -> String {
    serde_json::json!({
        "method": "equal",
        "attribute": attribute,
        "values": [value]
    })
    .to_string()
}

/// Public view URL of an uploaded file.
pub fn file_view_url(config: &AppwriteConfig, file_id: &str) -> String {
    format!(
        "{}/storage/buckets/{}/files/{}/view?project={}",
        config.endpoint, config.bucket_id, file_id, config.project_id
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_query_produces_the_appwrite_shape() {
        let query = equal_query("email", "al@example.com");
        let value: serde_json::Value =
            serde_json::from_str(&query).expect("query string should be valid JSON");

        assert_eq!(value["method"], "equal");
        assert_eq!(value["attribute"], "email");
        assert_eq!(value["values"], serde_json::json!(["al@example.com"]));
    }

    #[test]
    fn error_body_deserializes_from_an_appwrite_response() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"message":"Invalid token passed in the request.","code":401,"type":"user_invalid_token","version":"1.6.0"}"#,
        )
        .expect("error body should deserialize");

        assert_eq!(body.code, 401);
        assert_eq!(body.kind, "user_invalid_token");

        let err = AppwriteError::Api {
            code: body.code,
            kind: body.kind,
            message: body.message,
        };
        assert!(err.is_unauthorized());
    }

    #[test]
    fn non_auth_api_errors_are_not_unauthorized() {
        let err = AppwriteError::Api {
            code: 503,
            kind: "general_service_disabled".to_string(),
            message: "The service is unavailable.".to_string(),
        };
        assert!(!err.is_unauthorized());
        assert!(err.to_string().contains("503"), "display should carry the code");
    }

    #[test]
    fn email_token_parses_system_fields() {
        let token: EmailToken = serde_json::from_str(
            r#"{"$id":"tok_1","$createdAt":"2025-03-01T09:00:00.000+00:00","userId":"acc_123","secret":"","expire":"2025-03-01T09:15:00.000+00:00","phrase":""}"#,
        )
        .expect("token should deserialize");

        assert_eq!(token.id, "tok_1");
        assert_eq!(token.user_id, "acc_123");
        assert_eq!(token.expire.to_rfc3339(), "2025-03-01T09:15:00+00:00");
    }

    #[test]
    fn file_view_url_points_into_the_configured_bucket() {
        let config = AppwriteConfig {
            endpoint: "https://cloud.appwrite.io/v1".to_string(),
            project_id: "proj_1".to_string(),
            api_key: "key_1".to_string(),
            database_id: "db_1".to_string(),
            user_collection_id: "users".to_string(),
            file_collection_id: "files".to_string(),
            session_collection_id: "sessions".to_string(),
            bucket_id: "bucket_1".to_string(),
        };

        assert_eq!(
            file_view_url(&config, "file_9"),
            "https://cloud.appwrite.io/v1/storage/buckets/bucket_1/files/file_9/view?project=proj_1"
        );
    }
}
