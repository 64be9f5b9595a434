//! Upload of generated feeds to the store's Files API.
//!
//! Each file goes through a three-step handshake:
//!
//! 1. `stagedUploadsCreate` reserves a staged target (a storage URL plus
//!    form parameters),
//! 2. the file is POSTed there as `multipart/form-data`, parameters first
//!    and the file part last,
//! 3. `fileCreate` registers a file record pointing at the staged resource.
//!
//! The CDN URL is not always available straight away; the record is
//! re-queried once after a short wait, and the staged resource URL is used
//! when it still is not.

pub mod types;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::client::{ACCESS_TOKEN_HEADER, API_VERSION};
use crate::error::ShopifyError;
use types::{
    describe_user_errors, FileCreateData, GraphQlResponse, NodeData, StagedTarget,
    StagedUploadsData,
};

const STAGED_UPLOADS_CREATE: &str = r"
mutation stagedUploadsCreate($input: [StagedUploadInput!]!) {
  stagedUploadsCreate(input: $input) {
    stagedTargets { url resourceUrl parameters { name value } }
    userErrors { field message }
  }
}";

const FILE_CREATE: &str = r"
mutation fileCreate($files: [FileCreateInput!]!) {
  fileCreate(files: $files) {
    files { ... on GenericFile { id url alt } }
    userErrors { field message }
  }
}";

const FILE_URL: &str = r"
query getFile($id: ID!) {
  node(id: $id) { ... on GenericFile { id url } }
}";

/// Timing and HTTP settings for a [`FilesUploader`].
#[derive(Debug, Clone)]
pub struct UploadSettings {
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Pause after each successful upload, to stay under the API rate limit.
    pub upload_delay: Duration,
    /// Wait before re-querying a new file record for its CDN URL.
    pub cdn_poll_delay: Duration,
}

/// MIME type sent for a feed file.
#[must_use]
pub fn mime_type_for(filename: &str) -> &'static str {
    if filename.ends_with(".gz") {
        "application/gzip"
    } else {
        "application/xml"
    }
}

/// Client for one store's Files API.
pub struct FilesUploader {
    client: Client,
    graphql_url: String,
    access_token: String,
    settings: UploadSettings,
}

impl FilesUploader {
    /// Creates an uploader for the store whose Admin API lives at `origin`.
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        origin: &str,
        access_token: &str,
        settings: UploadSettings,
    ) -> Result<Self, ShopifyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&settings.user_agent)
            .build()?;

        Ok(Self {
            client,
            graphql_url: format!(
                "{}/admin/api/{API_VERSION}/graphql.json",
                origin.trim_end_matches('/')
            ),
            access_token: access_token.to_owned(),
            settings,
        })
    }

    /// Uploads every `*.xml.gz` under `feeds_dir`.
    ///
    /// Files are named after their path relative to `feeds_dir` with
    /// separators replaced by `_`. A failed file is logged and skipped; the
    /// returned map only holds successful uploads (local path → URL).
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError::Io`] only if `feeds_dir` cannot be listed.
    pub async fn upload_feeds(
        &self,
        feeds_dir: &Path,
    ) -> Result<BTreeMap<PathBuf, String>, ShopifyError> {
        let archives =
            shopfeed_core::layout::find_feed_archives(feeds_dir).map_err(|e| ShopifyError::Io {
                path: feeds_dir.display().to_string(),
                source: e,
            })?;

        let mut uploaded = BTreeMap::new();
        for local_path in archives {
            let remote_name = remote_file_name(feeds_dir, &local_path);
            match self.upload_file(&local_path, &remote_name).await {
                Ok(url) => {
                    uploaded.insert(local_path, url);
                    if !self.settings.upload_delay.is_zero() {
                        tokio::time::sleep(self.settings.upload_delay).await;
                    }
                }
                Err(e) => {
                    tracing::error!(path = %local_path.display(), error = %e, "upload failed");
                }
            }
        }

        Ok(uploaded)
    }

    /// Uploads one file and returns its public URL.
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError::Io`] if the file cannot be read, and the
    /// handshake errors documented on [`ShopifyError`] otherwise.
    pub async fn upload_file(
        &self,
        local_path: &Path,
        filename: &str,
    ) -> Result<String, ShopifyError> {
        let content = tokio::fs::read(local_path)
            .await
            .map_err(|e| ShopifyError::Io {
                path: local_path.display().to_string(),
                source: e,
            })?;
        let mime_type = mime_type_for(filename);

        tracing::info!(filename, bytes = content.len(), "uploading feed");

        let target = self
            .create_staged_upload(filename, content.len(), mime_type)
            .await?;
        self.post_to_staged_target(&target, filename, content, mime_type)
            .await?;
        let url = self.create_file_record(&target, filename).await?;

        tracing::info!(filename, url = %url, "uploaded feed");
        Ok(url)
    }

    async fn create_staged_upload(
        &self,
        filename: &str,
        file_size: usize,
        mime_type: &str,
    ) -> Result<StagedTarget, ShopifyError> {
        let variables = json!({
            "input": [{
                "resource": "FILE",
                "filename": filename,
                "mimeType": mime_type,
                "httpMethod": "POST",
                "fileSize": file_size.to_string(),
            }]
        });

        let data: StagedUploadsData = self
            .graphql("stagedUploadsCreate", STAGED_UPLOADS_CREATE, variables)
            .await?;
        let payload = data.staged_uploads_create;

        payload
            .staged_targets
            .into_iter()
            .next()
            .ok_or_else(|| ShopifyError::NoStagedTarget {
                user_errors: describe_user_errors(&payload.user_errors),
            })
    }

    async fn post_to_staged_target(
        &self,
        target: &StagedTarget,
        filename: &str,
        content: Vec<u8>,
        mime_type: &str,
    ) -> Result<(), ShopifyError> {
        let mut form = Form::new();
        for param in &target.parameters {
            form = form.text(param.name.clone(), param.value.clone());
        }
        // Object storage only accepts the file as the final part.
        let file_part = Part::bytes(content)
            .file_name(filename.to_owned())
            .mime_str(mime_type)?;
        form = form.part("file", file_part);

        let response = self.client.post(&target.url).multipart(form).send().await?;
        let status = response.status().as_u16();
        if matches!(status, 200 | 201 | 204) {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(ShopifyError::UploadRejected { status, body })
    }

    async fn create_file_record(
        &self,
        target: &StagedTarget,
        filename: &str,
    ) -> Result<String, ShopifyError> {
        let variables = json!({
            "files": [{
                "alt": filename,
                "contentType": "FILE",
                "originalSource": target.resource_url,
            }]
        });

        let data: FileCreateData = self.graphql("fileCreate", FILE_CREATE, variables).await?;
        let payload = data.file_create.ok_or_else(|| ShopifyError::MissingFileRecord {
            response: "fileCreate payload is null".to_owned(),
        })?;

        if !payload.user_errors.is_empty() {
            return Err(ShopifyError::UserErrors {
                operation: "fileCreate".to_owned(),
                errors: describe_user_errors(&payload.user_errors),
            });
        }

        let file = payload
            .files
            .into_iter()
            .next()
            .flatten()
            .filter(|f| !f.is_empty())
            .ok_or_else(|| ShopifyError::MissingFileRecord {
                response: format!("no file returned for {filename}"),
            })?;

        let mut url = file.url;
        if url.is_none() {
            if let Some(id) = file.id.as_deref() {
                tracing::info!(file_id = id, "CDN URL not ready, re-querying");
                tokio::time::sleep(self.settings.cdn_poll_delay).await;
                url = self.file_url(id).await;
            }
        }

        Ok(url.unwrap_or_else(|| {
            tracing::warn!(filename, "CDN URL not available, using staged resource URL");
            target.resource_url.clone()
        }))
    }

    /// Looks up a file's CDN URL; any failure is logged and treated as "not yet".
    async fn file_url(&self, file_id: &str) -> Option<String> {
        match self
            .graphql::<NodeData>("getFile", FILE_URL, json!({ "id": file_id }))
            .await
        {
            Ok(data) => data.node.and_then(|n| n.url),
            Err(e) => {
                tracing::warn!(file_id, error = %e, "failed to query file URL");
                None
            }
        }
    }

    async fn graphql<T: DeserializeOwned>(
        &self,
        operation: &str,
        query: &str,
        variables: Value,
    ) -> Result<T, ShopifyError> {
        let response = self
            .client
            .post(&self.graphql_url)
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ShopifyError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.graphql_url.clone(),
            });
        }

        let body = response.text().await?;
        let envelope: GraphQlResponse<T> =
            serde_json::from_str(&body).map_err(|e| ShopifyError::Deserialize {
                context: format!("{operation} response"),
                source: e,
            })?;

        if let Some(errors) = envelope.errors.filter(|e| !e.is_null()) {
            return Err(ShopifyError::GraphQl {
                operation: operation.to_owned(),
                errors: errors.to_string(),
            });
        }

        envelope.data.ok_or_else(|| ShopifyError::GraphQl {
            operation: operation.to_owned(),
            errors: "response has no data".to_owned(),
        })
    }
}

/// `FR/google_fr_EUR.xml.gz` under `feeds/` becomes `FR_google_fr_EUR.xml.gz`.
fn remote_file_name(feeds_dir: &Path, local_path: &Path) -> String {
    let relative = local_path.strip_prefix(feeds_dir).unwrap_or(local_path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("_")
}
