//! GraphQL payloads for the Files API upload handshake.

use serde::Deserialize;
use serde_json::Value;

/// Standard GraphQL envelope. `errors` is kept raw for diagnostics.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct UserError {
    #[serde(default)]
    pub field: Option<Vec<String>>,
    pub message: String,
}

/// Renders user errors as `field.path: message; ...`.
pub(crate) fn describe_user_errors(errors: &[UserError]) -> String {
    errors
        .iter()
        .map(|e| match &e.field {
            Some(field) if !field.is_empty() => format!("{}: {}", field.join("."), e.message),
            _ => e.message.clone(),
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StagedUploadsData {
    pub staged_uploads_create: StagedUploadsPayload,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StagedUploadsPayload {
    #[serde(default)]
    pub staged_targets: Vec<StagedTarget>,
    #[serde(default)]
    pub user_errors: Vec<UserError>,
}

/// Where and how to POST the file bytes.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StagedTarget {
    pub url: String,
    /// Location of the staged object; becomes the file record's `originalSource`.
    pub resource_url: String,
    /// Form fields that must precede the file part, in this order.
    #[serde(default)]
    pub parameters: Vec<StagedParameter>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StagedParameter {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileCreateData {
    #[serde(default)]
    pub file_create: Option<FileCreatePayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileCreatePayload {
    #[serde(default)]
    pub files: Vec<Option<CreatedFile>>,
    #[serde(default)]
    pub user_errors: Vec<UserError>,
}

/// A created file. Non-generic file kinds come back as `{}`.
#[derive(Debug, Default, Deserialize)]
pub struct CreatedFile {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl CreatedFile {
    pub(crate) fn is_empty(&self) -> bool {
        self.id.is_none() && self.url.is_none()
    }
}

#[derive(Debug, Deserialize)]
pub struct NodeData {
    #[serde(default)]
    pub node: Option<CreatedFile>,
}
