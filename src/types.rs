//! Shared types crossing the server-function boundary.

use serde::{Deserialize, Serialize};

/// Profile of the signed-in user, as shown in the navigation chrome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    /// User document id, used as the owner id when scoping files.
    pub owner_id: String,
    /// Appwrite account id.
    pub account_id: String,
    pub username: String,
    pub email: String,
    /// Avatar image URL.
    pub avatar: String,
}

/// Result of the account-creation operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedAccount {
    pub account_id: String,
}
