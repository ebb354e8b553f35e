//! Appwrite connection configuration.
//!
//! Read once from the environment at startup and held process-wide;
//! server functions obtain it through [`config`] instead of touching the
//! environment per request.

use std::sync::OnceLock;

static CONFIG: OnceLock<AppwriteConfig> = OnceLock::new();

/// Connection parameters of the Appwrite project backing the app.
#[derive(Debug, Clone)]
pub struct AppwriteConfig {
    /// Base REST endpoint, without a trailing slash.
    pub endpoint: String,
    pub project_id: String,
    /// Admin API key. Server-side only; never sent to the browser.
    pub api_key: String,
    pub database_id: String,
    pub user_collection_id: String,
    pub file_collection_id: String,
    pub session_collection_id: String,
    pub bucket_id: String,
}

impl AppwriteConfig {
    /// Load configuration from environment variables, reading a `.env`
    /// file first in development. Fails when a required variable is
    /// missing.
    #[cfg(feature = "server")]
    pub fn from_env() -> anyhow::Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    #[cfg(any(feature = "server", test))]
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        use anyhow::Context;

        let require =
            |name: &str| lookup(name).with_context(|| format!("{name} must be set"));

        Ok(Self {
            endpoint: require("APPWRITE_ENDPOINT")?
                .trim_end_matches('/')
                .to_string(),
            project_id: require("APPWRITE_PROJECT_ID")?,
            api_key: require("APPWRITE_API_KEY")?,
            database_id: require("APPWRITE_DATABASE_ID")?,
            user_collection_id: require("APPWRITE_USER_COLLECTION_ID")?,
            file_collection_id: require("APPWRITE_FILE_COLLECTION_ID")?,
            session_collection_id: require("APPWRITE_SESSION_COLLECTION_ID")?,
            bucket_id: require("APPWRITE_BUCKET_ID")?,
        })
    }
}

/// Install the process-wide configuration. Called once from `main` before
/// the server starts accepting requests.
#[cfg(feature = "server")]
pub fn init_config() -> anyhow::Result<()> {
    let config = AppwriteConfig::from_env()?;
    tracing::debug!(
        endpoint = %config.endpoint,
        project = %config.project_id,
        "appwrite configuration loaded"
    );
    let _ = CONFIG.set(config);
    Ok(())
}

/// The process-wide configuration installed by [`init_config`].
pub fn config() -> Result<&'static AppwriteConfig, super::AppwriteError> {
    CONFIG.get().ok_or(super::AppwriteError::Uninitialized)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn complete_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("APPWRITE_ENDPOINT", "https://cloud.appwrite.io/v1"),
            ("APPWRITE_PROJECT_ID", "proj_1"),
            ("APPWRITE_API_KEY", "key_1"),
            ("APPWRITE_DATABASE_ID", "db_1"),
            ("APPWRITE_USER_COLLECTION_ID", "users"),
            ("APPWRITE_FILE_COLLECTION_ID", "files"),
            ("APPWRITE_SESSION_COLLECTION_ID", "sessions"),
            ("APPWRITE_BUCKET_ID", "bucket_1"),
        ])
    }

    fn lookup_in<'a>(
        env: &'a HashMap<&'static str, &'static str>,
    ) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| env.get(name).map(|value| value.to_string())
    }

    #[test]
    fn loads_all_eight_fields() {
        let env = complete_env();
        let config = AppwriteConfig::from_lookup(lookup_in(&env)).expect("complete env should load");

        assert_eq!(config.endpoint, "https://cloud.appwrite.io/v1");
        assert_eq!(config.project_id, "proj_1");
        assert_eq!(config.api_key, "key_1");
        assert_eq!(config.database_id, "db_1");
        assert_eq!(config.user_collection_id, "users");
        assert_eq!(config.file_collection_id, "files");
        assert_eq!(config.session_collection_id, "sessions");
        assert_eq!(config.bucket_id, "bucket_1");
    }

    #[test]
    fn missing_variable_fails_and_names_it() {
        let mut env = complete_env();
        env.remove("APPWRITE_BUCKET_ID");

        let err = AppwriteConfig::from_lookup(lookup_in(&env))
            .expect_err("an incomplete env must not produce a config");
        assert!(
            err.to_string().contains("APPWRITE_BUCKET_ID"),
            "error should name the missing variable, got: {err}"
        );
    }

    #[test]
    fn endpoint_trailing_slash_is_stripped() {
        let mut env = complete_env();
        env.insert("APPWRITE_ENDPOINT", "https://cloud.appwrite.io/v1/");

        let config = AppwriteConfig::from_lookup(lookup_in(&env)).expect("env should load");
        assert_eq!(
            config.endpoint, "https://cloud.appwrite.io/v1",
            "path joins expect the endpoint without a trailing slash"
        );
    }

    #[test]
    fn accessor_reports_uninitialized_before_startup() {
        // Nothing in the test binary installs a config.
        assert!(matches!(
            config(),
            Err(super::super::AppwriteError::Uninitialized)
        ));
    }
}
