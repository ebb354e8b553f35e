//! Upload control embedded in the navigation drawer.

use dioxus::prelude::*;

use crate::appwrite::{self, file_view_url, AppwriteClient};

/// Uploads above this size are rejected client-side.
const MAX_FILE_SIZE: usize = 50 * 1024 * 1024;

#[derive(Props, Clone, PartialEq)]
pub struct FileUploaderProps {
    /// User document id recorded as the file's owner.
    pub owner_id: String,
    /// Appwrite account id granted access to the file.
    pub account_id: String,
}

#[derive(Clone, PartialEq)]
enum UploadStatus {
    Idle,
    Uploading { name: String },
    Done { name: String },
    Failed { message: String },
}

/// File picker wired to the storage bucket, scoped to the given owner and
/// account.
#[component]
pub fn FileUploader(props: FileUploaderProps) -> Element {
    let mut status = use_signal(|| UploadStatus::Idle);

    let owner_id = props.owner_id.clone();
    let account_id = props.account_id.clone();
    let handle_change = move |event: FormEvent| {
        let Some(file_engine) = event.files() else {
            return;
        };
        let Some(file_name) = file_engine.files().into_iter().next() else {
            return;
        };

        let owner_id = owner_id.clone();
        let account_id = account_id.clone();
        spawn(async move {
            status.set(UploadStatus::Uploading {
                name: file_name.clone(),
            });

            let Some(bytes) = file_engine.read_file(&file_name).await else {
                status.set(UploadStatus::Failed {
                    message: "Could not read the selected file".to_string(),
                });
                return;
            };
            if bytes.len() > MAX_FILE_SIZE {
                status.set(UploadStatus::Failed {
                    message: "File is too large (max 50 MB)".to_string(),
                });
                return;
            }

            match upload_file(owner_id, account_id, file_name.clone(), bytes).await {
                Ok(()) => status.set(UploadStatus::Done { name: file_name }),
                Err(_) => status.set(UploadStatus::Failed {
                    message: "Upload failed. Please try again.".to_string(),
                }),
            }
        });
    };

    let current = status();

    rsx! {
        div { class: "uploader",
            label { class: "uploader-button",
                img { src: "/assets/icons/upload.svg", alt: "", class: "icon-image" }
                p { "Upload" }
                input {
                    r#type: "file",
                    class: "uploader-input",
                    onchange: handle_change,
                }
            }

            match current {
                UploadStatus::Idle => rsx! {},
                UploadStatus::Uploading { name } => rsx! {
                    p { class: "upload-status", "Uploading {name}..." }
                },
                UploadStatus::Done { name } => rsx! {
                    p { class: "upload-status done", "Uploaded {name}" }
                },
                UploadStatus::Failed { message } => rsx! {
                    p { class: "upload-status failed", "{message}" }
                },
            }
        }
    }
}

/// Store the bytes in the bucket and record a file document pointing at
/// them, scoped to the owner and account.
#[server]
async fn upload_file(
    owner_id: String,
    account_id: String,
    file_name: String,
    bytes: Vec<u8>,
) -> Result<(), ServerFnError> {
    let config = appwrite::config().map_err(|e| ServerFnError::new(e.to_string()))?;
    let client = AppwriteClient::new(config).with_key(&config.api_key);

    let file_id = uuid::Uuid::new_v4().to_string();
    let stored = client
        .upload_file(&config.bucket_id, &file_id, &file_name, bytes)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    #[derive(serde::Serialize)]
    #[serde(rename_all = "camelCase")]
    struct NewFile<'a> {
        name: &'a str,
        url: String,
        size: u64,
        mime_type: &'a str,
        owner: &'a str,
        account_id: &'a str,
        bucket_file_id: &'a str,
    }

    let document_id = uuid::Uuid::new_v4().to_string();
    let _document: serde_json::Value = client
        .create_document(
            &config.database_id,
            &config.file_collection_id,
            &document_id,
            &NewFile {
                name: &stored.name,
                url: file_view_url(config, &stored.id),
                size: stored.size_original,
                mime_type: &stored.mime_type,
                owner: &owner_id,
                account_id: &account_id,
                bucket_file_id: &stored.id,
            },
        )
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    tracing::info!(file = %stored.name, size = stored.size_original, owner = %owner_id, "file uploaded");
    Ok(())
}
