//! Vector file-system operations.
//!
//! All of them are sealed for the recipient node and carry the sender
//! sub-identity in `intra_sender`, which the node uses to resolve the
//! profile whose file system is addressed.

use super::operations::require_non_empty;
use super::{Draft, MessageBuilder, MessageContext, Operation};
use crate::envelope::Envelope;
use crate::error::Result;
use crate::schemas::{
    ConvertFilesAndSaveToFolder, MessageContent, SchemaPayload, VecFsCopyFolder, VecFsCopyItem,
    VecFsCreateFolder, VecFsMoveFolder, VecFsMoveItem, VecFsRetrievePath, VecFsVectorSearch,
};

impl MessageBuilder {
    /// Create `folder_name` under `path`.
    pub fn create_folder(
        &self,
        ctx: &MessageContext<'_>,
        path: &str,
        folder_name: &str,
    ) -> Result<Envelope> {
        require_non_empty("path", path)?;
        require_non_empty("folder name", folder_name)?;
        self.file_system(
            ctx,
            &VecFsCreateFolder {
                path: path.to_string(),
                folder_name: folder_name.to_string(),
            },
        )
    }

    /// Move the folder at `origin_path` into `destination_path`.
    pub fn move_folder(
        &self,
        ctx: &MessageContext<'_>,
        origin_path: &str,
        destination_path: &str,
    ) -> Result<Envelope> {
        require_paths(origin_path, destination_path)?;
        self.file_system(
            ctx,
            &VecFsMoveFolder {
                origin_path: origin_path.to_string(),
                destination_path: destination_path.to_string(),
            },
        )
    }

    /// Copy the folder at `origin_path` into `destination_path`.
    pub fn copy_folder(
        &self,
        ctx: &MessageContext<'_>,
        origin_path: &str,
        destination_path: &str,
    ) -> Result<Envelope> {
        require_paths(origin_path, destination_path)?;
        self.file_system(
            ctx,
            &VecFsCopyFolder {
                origin_path: origin_path.to_string(),
                destination_path: destination_path.to_string(),
            },
        )
    }

    /// Move the item at `origin_path` into `destination_path`.
    pub fn move_item(
        &self,
        ctx: &MessageContext<'_>,
        origin_path: &str,
        destination_path: &str,
    ) -> Result<Envelope> {
        require_paths(origin_path, destination_path)?;
        self.file_system(
            ctx,
            &VecFsMoveItem {
                origin_path: origin_path.to_string(),
                destination_path: destination_path.to_string(),
            },
        )
    }

    /// Copy the item at `origin_path` into `destination_path`.
    pub fn copy_item(
        &self,
        ctx: &MessageContext<'_>,
        origin_path: &str,
        destination_path: &str,
    ) -> Result<Envelope> {
        require_paths(origin_path, destination_path)?;
        self.file_system(
            ctx,
            &VecFsCopyItem {
                origin_path: origin_path.to_string(),
                destination_path: destination_path.to_string(),
            },
        )
    }

    /// Retrieve `path` as simplified JSON.
    pub fn retrieve_path(&self, ctx: &MessageContext<'_>, path: &str) -> Result<Envelope> {
        require_non_empty("path", path)?;
        self.file_system(
            ctx,
            &VecFsRetrievePath {
                path: path.to_string(),
            },
        )
    }

    /// Run a vector search.
    pub fn vector_search(
        &self,
        ctx: &MessageContext<'_>,
        search: &VecFsVectorSearch,
    ) -> Result<Envelope> {
        require_non_empty("search", &search.search)?;
        self.file_system(ctx, search)
    }

    /// Convert the files uploaded to `file_inbox` and save them under `path`.
    pub fn convert_files_and_save(
        &self,
        ctx: &MessageContext<'_>,
        request: &ConvertFilesAndSaveToFolder,
    ) -> Result<Envelope> {
        require_non_empty("path", &request.path)?;
        require_non_empty("file inbox", &request.file_inbox)?;
        self.file_system(ctx, request)
    }

    fn file_system<P: SchemaPayload>(&self, ctx: &MessageContext<'_>, payload: &P) -> Result<Envelope> {
        let draft = Draft::direct(Operation::FileSystem, MessageContent::encode(payload)?)
            .with_intra_sender(ctx);
        self.assemble(ctx, draft)
    }
}

fn require_paths(origin_path: &str, destination_path: &str) -> Result<()> {
    require_non_empty("origin path", origin_path)?;
    require_non_empty("destination path", destination_path)
}
