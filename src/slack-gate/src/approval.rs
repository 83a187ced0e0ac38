//! The approval protocol: one request, one decision.
//!
//! An [`ApprovalRequest`] is minted once per process run with a fresh
//! correlation id. Both button action ids embed that id, so a click on a
//! stale message from an earlier run can never resolve this run's gate.

use uuid::Uuid;

use crate::blocks::{Block, BlockElement, RunMetadata, TextObject, summary_blocks};
use crate::client::PostedMessage;

/// Prefix shared by both action identifiers.
pub const ACTION_ID_PREFIX: &str = "slack-approval";

/// Header shown above the message body.
const MESSAGE_HEADER: &str = "GitHub Actions Approval Request";

/// Fallback notification text.
const NOTIFICATION_TEXT: &str = "GitHub Actions Approval request";

/// The two possible resolutions of an approval request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The gate passes; the pipeline continues.
    Approved,
    /// The gate fails; the pipeline stops.
    Rejected,
}

impl Outcome {
    /// Button value and action-id infix (`approve` / `reject`).
    pub fn value(self) -> &'static str {
        match self {
            Outcome::Approved => "approve",
            Outcome::Rejected => "reject",
        }
    }

    /// Button label.
    pub fn button_label(self) -> &'static str {
        match self {
            Outcome::Approved => "Approve",
            Outcome::Rejected => "Reject",
        }
    }

    /// Button style (`primary` / `danger`).
    pub fn button_style(self) -> &'static str {
        match self {
            Outcome::Approved => "primary",
            Outcome::Rejected => "danger",
        }
    }

    /// Label used in the resolution block.
    pub fn resolution_label(self) -> &'static str {
        match self {
            Outcome::Approved => "Approved by",
            Outcome::Rejected => "Rejected by",
        }
    }

    /// Process exit code bound to this outcome.
    pub fn exit_code(self) -> u8 {
        match self {
            Outcome::Approved => 0,
            Outcome::Rejected => 1,
        }
    }
}

/// A single pending approval. Immutable after creation.
#[derive(Debug, Clone)]
pub struct ApprovalRequest {
    /// Run-scoped correlation id embedded in both action ids.
    id: String,
    /// Destination channel.
    channel: String,
    /// Message body (custom blocks, or the default run summary).
    body: Vec<Block>,
}

impl ApprovalRequest {
    /// Create a request with a fresh correlation id.
    ///
    /// If `custom_blocks` is supplied and non-empty it is used verbatim as
    /// the body; otherwise a summary section is synthesized from `metadata`.
    pub fn new(
        channel: impl Into<String>,
        custom_blocks: Option<Vec<Block>>,
        metadata: &RunMetadata,
    ) -> Self {
        let body = match custom_blocks {
            Some(blocks) if !blocks.is_empty() => blocks,
            _ => summary_blocks(metadata),
        };

        Self {
            id: Uuid::new_v4().to_string(),
            channel: channel.into(),
            body,
        }
    }

    /// Replace the correlation id (deterministic tests only).
    #[cfg(test)]
    pub(crate) fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// The correlation id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The destination channel.
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Fallback text for the notification.
    pub fn notification_text(&self) -> &'static str {
        NOTIFICATION_TEXT
    }

    /// Action id for one of the two buttons:
    /// `slack-approval-{approve|reject}-{id}`.
    pub fn action_id(&self, outcome: Outcome) -> String {
        format!("{}-{}-{}", ACTION_ID_PREFIX, outcome.value(), self.id)
    }

    /// Map an incoming action id back to an outcome, if it belongs to this
    /// request. Action ids from other runs return `None`.
    pub fn match_action(&self, action_id: &str) -> Option<Outcome> {
        if action_id == self.action_id(Outcome::Approved) {
            Some(Outcome::Approved)
        } else if action_id == self.action_id(Outcome::Rejected) {
            Some(Outcome::Rejected)
        } else {
            None
        }
    }

    /// The full message: header section, body blocks, then one actions
    /// block with the Approve and Reject buttons.
    pub fn message_blocks(&self) -> Vec<Block> {
        let mut blocks = Vec::with_capacity(self.body.len() + 2);
        blocks.push(Block::section(MESSAGE_HEADER));
        blocks.extend(self.body.iter().cloned());
        blocks.push(Block::Actions {
            elements: vec![
                self.button(Outcome::Approved),
                self.button(Outcome::Rejected),
            ],
        });
        blocks
    }

    fn button(&self, outcome: Outcome) -> BlockElement {
        BlockElement::Button {
            text: TextObject::plain(outcome.button_label()),
            action_id: self.action_id(outcome),
            value: Some(outcome.value().to_string()),
            url: None,
            style: Some(outcome.button_style().to_string()),
        }
    }
}

/// The human's decision, as delivered by the event listener.
#[derive(Debug, Clone)]
pub struct Decision {
    /// Which button was clicked.
    pub outcome: Outcome,
    /// Slack user id of the person who clicked.
    pub user_id: String,
    /// Channel the click occurred in, when present in the payload.
    pub channel_id: Option<String>,
    /// Timestamp of the clicked message, when present in the payload.
    pub message_ts: Option<String>,
    /// Blocks of the clicked message, as Slack echoed them back.
    pub blocks: Vec<Block>,
}

impl Decision {
    /// Address of the message to update: the event's source message,
    /// falling back to the message we posted.
    pub fn source_message(&self, posted: &PostedMessage) -> PostedMessage {
        PostedMessage {
            channel: self
                .channel_id
                .clone()
                .unwrap_or_else(|| posted.channel.clone()),
            ts: self.message_ts.clone().unwrap_or_else(|| posted.ts.clone()),
        }
    }
}

/// Rewrite a resolved message: drop the trailing actions block and append a
/// resolution section naming the actor and verdict. All preceding blocks
/// are preserved, so the total block count is unchanged.
pub fn resolved_blocks(mut blocks: Vec<Block>, outcome: Outcome, user_id: &str) -> Vec<Block> {
    blocks.pop();
    blocks.push(Block::section(format!(
        "{} <@{}>",
        outcome.resolution_label(),
        user_id
    )));
    blocks
}
