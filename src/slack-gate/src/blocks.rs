//! Block Kit message content.
//!
//! Blocks are modeled as a tagged enum rather than raw JSON values, so
//! caller-supplied block input is validated at the boundary: a payload that
//! does not match the schema fails fast with [`GateError::InvalidBlocks`]
//! instead of producing a malformed message later.

use serde::{Deserialize, Serialize};

use crate::error::{GateError, GateResult};

/// Block Kit block types used by the gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// Header block.
    Header { text: TextObject },
    /// Section block (main content). Either `text`, `fields`, or both.
    Section {
        #[serde(skip_serializing_if = "Option::is_none")]
        text: Option<TextObject>,
        #[serde(skip_serializing_if = "Option::is_none")]
        fields: Option<Vec<TextObject>>,
    },
    /// Divider block.
    Divider {},
    /// Context block (small text/images).
    Context { elements: Vec<ContextElement> },
    /// Actions block (buttons).
    Actions { elements: Vec<BlockElement> },
    /// Image block.
    Image {
        image_url: String,
        alt_text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<TextObject>,
    },
}

impl Block {
    /// Section block with mrkdwn text and no fields.
    pub fn section(text: impl Into<String>) -> Self {
        Block::Section {
            text: Some(TextObject::mrkdwn(text)),
            fields: None,
        }
    }

    /// Section block with only labeled fields.
    pub fn fields_section(fields: Vec<TextObject>) -> Self {
        Block::Section {
            text: None,
            fields: Some(fields),
        }
    }
}

/// Slack text object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextObject {
    #[serde(rename = "type")]
    pub text_type: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<bool>,
}

impl TextObject {
    /// Create a plain text object.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text_type: "plain_text".to_string(),
            text: text.into(),
            emoji: Some(true),
        }
    }

    /// Create a mrkdwn text object.
    pub fn mrkdwn(text: impl Into<String>) -> Self {
        Self {
            text_type: "mrkdwn".to_string(),
            text: text.into(),
            emoji: None,
        }
    }
}

/// Slack context element (for context blocks).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContextElement {
    /// Plain text.
    PlainText { text: String },
    /// Mrkdwn text.
    Mrkdwn { text: String },
    /// Image.
    Image { image_url: String, alt_text: String },
}

/// Slack block element (buttons).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockElement {
    /// Button element.
    Button {
        text: TextObject,
        action_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        url: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        style: Option<String>,
    },
}

/// Parse caller-supplied Block Kit JSON (a JSON array of blocks).
///
/// Used for the optional custom message body. Any shape mismatch is a fatal
/// error for the caller; nothing is recovered here.
pub fn parse_custom_blocks(raw: &str) -> GateResult<Vec<Block>> {
    serde_json::from_str::<Vec<Block>>(raw)
        .map_err(|e| GateError::InvalidBlocks(format!("failed to parse blocks JSON: {}", e)))
}

/// Metadata about the pipeline run requesting approval.
#[derive(Debug, Clone, Default)]
pub struct RunMetadata {
    /// Server base URL (e.g. `https://github.com`).
    pub server_url: String,
    /// `owner/repo` slug.
    pub repository: String,
    /// Numeric run id as a string.
    pub run_id: String,
    /// Workflow name.
    pub workflow: String,
    /// Runner operating system.
    pub runner_os: String,
    /// User who triggered the run.
    pub actor: String,
}

impl RunMetadata {
    /// URL of the repository.
    pub fn repository_url(&self) -> String {
        format!("{}/{}", self.server_url, self.repository)
    }

    /// URL of the run's page in the Actions UI.
    pub fn run_url(&self) -> String {
        format!(
            "{}/{}/actions/runs/{}",
            self.server_url, self.repository, self.run_id
        )
    }
}

/// Default message body: one section with six labeled fields, in fixed
/// order: actor, repository URL, actions URL, run id, workflow, runner OS.
pub fn summary_blocks(metadata: &RunMetadata) -> Vec<Block> {
    vec![Block::fields_section(vec![
        TextObject::mrkdwn(format!("*GitHub Actor:*\n{}", metadata.actor)),
        TextObject::mrkdwn(format!("*Repos:*\n{}", metadata.repository_url())),
        TextObject::mrkdwn(format!("*Actions URL:*\n{}", metadata.run_url())),
        TextObject::mrkdwn(format!("*GITHUB_RUN_ID:*\n{}", metadata.run_id)),
        TextObject::mrkdwn(format!("*Workflow:*\n{}", metadata.workflow)),
        TextObject::mrkdwn(format!("*RunnerOS:*\n{}", metadata.runner_os)),
    ])]
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample_metadata() -> RunMetadata {
        RunMetadata {
            server_url: "https://github.com".to_string(),
            repository: "org/repo".to_string(),
            run_id: "42".to_string(),
            workflow: "CI".to_string(),
            runner_os: "Linux".to_string(),
            actor: "alice".to_string(),
        }
    }

    #[test]
    fn test_run_url() {
        let metadata = sample_metadata();
        assert_eq!(metadata.run_url(), "https://github.com/org/repo/actions/runs/42");
        assert_eq!(metadata.repository_url(), "https://github.com/org/repo");
    }

    #[test]
    fn test_summary_blocks_field_order() {
        let blocks = summary_blocks(&sample_metadata());
        assert_eq!(blocks.len(), 1);

        let Block::Section { text, fields } = &blocks[0] else {
            panic!("expected a section block");
        };
        assert!(text.is_none());

        let fields = fields.as_ref().expect("fields present");
        assert_eq!(fields.len(), 6);
        assert_eq!(fields[0].text, "*GitHub Actor:*\nalice");
        assert_eq!(fields[1].text, "*Repos:*\nhttps://github.com/org/repo");
        assert_eq!(
            fields[2].text,
            "*Actions URL:*\nhttps://github.com/org/repo/actions/runs/42"
        );
        assert_eq!(fields[3].text, "*GITHUB_RUN_ID:*\n42");
        assert_eq!(fields[4].text, "*Workflow:*\nCI");
        assert_eq!(fields[5].text, "*RunnerOS:*\nLinux");
    }

    #[test]
    fn test_parse_custom_blocks() {
        let raw = r#"[
            {"type": "section", "text": {"type": "mrkdwn", "text": "Deploy to *prod*?"}},
            {"type": "divider"},
            {"type": "context", "elements": [{"type": "mrkdwn", "text": "requested by alice"}]}
        ]"#;

        let blocks = parse_custom_blocks(raw).expect("valid blocks");
        assert_eq!(blocks.len(), 3);
        assert!(matches!(blocks[1], Block::Divider {}));
    }

    #[test]
    fn test_parse_custom_blocks_malformed() {
        let result = parse_custom_blocks("not json");
        assert!(matches!(result, Err(GateError::InvalidBlocks(_))));

        // Valid JSON, wrong shape.
        let result = parse_custom_blocks(r#"{"type": "section"}"#);
        assert!(matches!(result, Err(GateError::InvalidBlocks(_))));

        // Unknown block type.
        let result = parse_custom_blocks(r#"[{"type": "carousel"}]"#);
        assert!(matches!(result, Err(GateError::InvalidBlocks(_))));
    }

    #[test]
    fn test_block_serialization_shape() {
        let block = Block::section("hello");
        let json = serde_json::to_value(&block).expect("serialize");
        assert_eq!(json["type"], "section");
        assert_eq!(json["text"]["type"], "mrkdwn");
        assert_eq!(json["text"]["text"], "hello");

        let divider = serde_json::to_value(Block::Divider {}).expect("serialize");
        assert_eq!(divider["type"], "divider");
    }

    #[test]
    fn test_button_serialization_shape() {
        let button = BlockElement::Button {
            text: TextObject::plain("Approve"),
            action_id: "slack-approval-approve-abc".to_string(),
            value: Some("approve".to_string()),
            url: None,
            style: Some("primary".to_string()),
        };
        let json = serde_json::to_value(&button).expect("serialize");
        assert_eq!(json["type"], "button");
        assert_eq!(json["text"]["type"], "plain_text");
        assert_eq!(json["style"], "primary");
        assert!(json.get("url").is_none());
    }

    #[test]
    fn test_blocks_round_trip_through_payload() {
        // Blocks coming back in an interactive payload carry extra fields
        // (block_id, verbatim). The deserializer must tolerate them.
        let raw = r#"[
            {"type": "section", "block_id": "x1",
             "text": {"type": "mrkdwn", "text": "hi", "verbatim": false}}
        ]"#;
        let blocks: Vec<Block> = serde_json::from_str(raw).expect("deserialize");
        assert_eq!(blocks.len(), 1);
    }
}
