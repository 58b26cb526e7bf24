//! Vector file-system operations.

use serde::{Deserialize, Serialize};

use super::{SchemaPayload, SchemaType};

/// Create `folder_name` under `path`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VecFsCreateFolder {
    /// Parent folder.
    pub path: String,
    /// New folder name.
    pub folder_name: String,
}

/// Move a folder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VecFsMoveFolder {
    /// Current location.
    pub origin_path: String,
    /// New parent.
    pub destination_path: String,
}

/// Copy a folder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VecFsCopyFolder {
    /// Current location.
    pub origin_path: String,
    /// New parent.
    pub destination_path: String,
}

/// Move an item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VecFsMoveItem {
    /// Current location.
    pub origin_path: String,
    /// New parent.
    pub destination_path: String,
}

/// Copy an item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VecFsCopyItem {
    /// Current location.
    pub origin_path: String,
    /// New parent.
    pub destination_path: String,
}

/// Retrieve a path as simplified JSON.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VecFsRetrievePath {
    /// Path to retrieve.
    pub path: String,
}

/// Vector search, returning simplified JSON.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VecFsVectorSearch {
    /// Query text.
    pub search: String,
    /// Restrict the search to this folder.
    pub path: Option<String>,
    /// Result cap.
    pub max_results: Option<u64>,
    /// Scan cap.
    pub max_files_to_scan: Option<u64>,
}

/// Convert the files in an inbox and save them into a folder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertFilesAndSaveToFolder {
    /// Destination folder.
    pub path: String,
    /// Inbox holding the uploaded files.
    pub file_inbox: String,
    /// Epoch milliseconds to stamp on the saved files.
    pub file_datetime: Option<u64>,
}

impl SchemaPayload for VecFsCreateFolder {
    const SCHEMA: SchemaType = SchemaType::VecFsCreateFolder;
}

impl SchemaPayload for VecFsMoveFolder {
    const SCHEMA: SchemaType = SchemaType::VecFsMoveFolder;
}

impl SchemaPayload for VecFsCopyFolder {
    const SCHEMA: SchemaType = SchemaType::VecFsCopyFolder;
}

impl SchemaPayload for VecFsMoveItem {
    const SCHEMA: SchemaType = SchemaType::VecFsMoveItem;
}

impl SchemaPayload for VecFsCopyItem {
    const SCHEMA: SchemaType = SchemaType::VecFsCopyItem;
}

impl SchemaPayload for VecFsRetrievePath {
    const SCHEMA: SchemaType = SchemaType::VecFsRetrievePathSimplifiedJson;
}

impl SchemaPayload for VecFsVectorSearch {
    const SCHEMA: SchemaType = SchemaType::VecFsRetrieveVectorSearchSimplifiedJson;
}

impl SchemaPayload for ConvertFilesAndSaveToFolder {
    const SCHEMA: SchemaType = SchemaType::ConvertFilesAndSaveToFolder;
}
