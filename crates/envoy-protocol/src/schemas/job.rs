//! Job payloads: creating a job and posting messages into it.

use serde::{Deserialize, Deserializer, Serialize};

use super::{SchemaPayload, SchemaType};
use crate::limits::UNDEFINED_WORKFLOW_NAME;

/// Resources a job may read.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobScope {
    /// Local item paths.
    pub local_items: Vec<String>,
    /// Local folder paths.
    pub local_folders: Vec<String>,
    /// Folders shared by other nodes.
    pub network_folders: Vec<String>,
}

impl JobScope {
    /// Whether the scope grants nothing.
    pub fn is_empty(&self) -> bool {
        self.local_items.is_empty() && self.local_folders.is_empty() && self.network_folders.is_empty()
    }
}

/// Request to create a job.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobCreationInfo {
    /// What the job may read.
    pub scope: JobScope,
    /// Hide the job from listings.
    pub is_hidden: Option<bool>,
}

impl SchemaPayload for JobCreationInfo {
    const SCHEMA: SchemaType = SchemaType::JobCreationSchema;
}

/// A message posted into a job.
///
/// Built with [`JobMessage::new`] and the `with_*` methods:
///
/// ```
/// use envoy_protocol::schemas::JobMessage;
///
/// let msg = JobMessage::new("job1", "summarize the report")
///     .with_files_inbox("files")
///     .with_workflow_name("summarizer:::v1");
/// assert_eq!(msg.workflow_name.as_deref(), Some("summarizer:::v1"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobMessage {
    /// Target job.
    pub job_id: String,
    /// Message text.
    pub content: String,
    /// Inbox holding attached files, empty if none.
    pub files_inbox: String,
    /// Message this one replies to.
    pub parent: Option<String>,
    /// Inline workflow source.
    pub workflow_code: Option<String>,
    /// Named workflow. `"undefined:::undefined"` reads as absent.
    #[serde(default, deserialize_with = "deserialize_workflow_name")]
    pub workflow_name: Option<String>,
    /// Serialized sheet job data.
    pub sheet_job_data: Option<String>,
    /// Action to run once the job answers.
    pub callback: Option<Box<CallbackAction>>,
}

impl JobMessage {
    /// Plain job message.
    pub fn new(job_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            content: content.into(),
            files_inbox: String::new(),
            parent: None,
            workflow_code: None,
            workflow_name: None,
            sheet_job_data: None,
            callback: None,
        }
    }

    /// Attach a files inbox.
    pub fn with_files_inbox(mut self, files_inbox: impl Into<String>) -> Self {
        self.files_inbox = files_inbox.into();
        self
    }

    /// Reply to a parent message.
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Run inline workflow code.
    pub fn with_workflow_code(mut self, code: impl Into<String>) -> Self {
        self.workflow_code = Some(code.into());
        self
    }

    /// Run a named workflow.
    pub fn with_workflow_name(mut self, name: impl Into<String>) -> Self {
        self.workflow_name = Some(name.into());
        self
    }

    /// Attach sheet job data.
    pub fn with_sheet_job_data(mut self, data: impl Into<String>) -> Self {
        self.sheet_job_data = Some(data.into());
        self
    }

    /// Attach a callback.
    pub fn with_callback(mut self, callback: CallbackAction) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }
}

impl SchemaPayload for JobMessage {
    const SCHEMA: SchemaType = SchemaType::JobMessageSchema;
}

fn deserialize_workflow_name<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let name = Option::<String>::deserialize(deserializer)?;
    Ok(name.filter(|n| n != UNDEFINED_WORKFLOW_NAME))
}

/// Follow-up action attached to a job message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallbackAction {
    /// Post another job message.
    Job(JobMessage),
    /// Update a sheet cell.
    Sheet(SheetManagerAction),
}

/// Sheet update, optionally chained to another job message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetManagerAction {
    /// Message to post after the update.
    pub job_message_next: Option<JobMessage>,
    /// The cell to update.
    pub sheet_action: SheetJobAction,
}

/// Address of a sheet cell.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SheetJobAction {
    /// Sheet identifier.
    pub sheet_id: String,
    /// Row index.
    pub row: u64,
    /// Column index.
    pub col: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::MessageContent;

    #[test]
    fn test_undefined_workflow_name_reads_as_none() {
        let json = r#"{"job_id":"j","content":"c","files_inbox":"","parent":null,"workflow_code":null,"workflow_name":"undefined:::undefined","sheet_job_data":null,"callback":null}"#;
        let msg: JobMessage = serde_json::from_str(json).unwrap();
        assert_eq!(msg.workflow_name, None);
    }

    #[test]
    fn test_missing_workflow_name_reads_as_none() {
        let json = r#"{"job_id":"j","content":"c","files_inbox":"","parent":null,"workflow_code":null,"sheet_job_data":null,"callback":null}"#;
        let msg: JobMessage = serde_json::from_str(json).unwrap();
        assert_eq!(msg.workflow_name, None);
    }

    #[test]
    fn test_job_message_field_order() {
        let json = serde_json::to_string(&JobMessage::new("job1", "hi")).unwrap();
        assert_eq!(
            json,
            r#"{"job_id":"job1","content":"hi","files_inbox":"","parent":null,"workflow_code":null,"workflow_name":null,"sheet_job_data":null,"callback":null}"#
        );
    }

    #[test]
    fn test_nested_callback_roundtrip() {
        let next = JobMessage::new("job2", "next step");
        let msg = JobMessage::new("job1", "fill the sheet").with_callback(CallbackAction::Sheet(
            SheetManagerAction {
                job_message_next: Some(next),
                sheet_action: SheetJobAction {
                    sheet_id: "sheet-1".into(),
                    row: 3,
                    col: 4,
                },
            },
        ));

        let content = MessageContent::encode(&msg).unwrap();
        let decoded: JobMessage = content.decode().unwrap();
        assert_eq!(decoded, msg);
    }

    #[test]
    fn test_job_creation_default_scope() {
        let info = JobCreationInfo::default();
        assert!(info.scope.is_empty());
        assert_eq!(
            serde_json::to_string(&info).unwrap(),
            r#"{"scope":{"local_items":[],"local_folders":[],"network_folders":[]},"is_hidden":null}"#
        );
    }
}
