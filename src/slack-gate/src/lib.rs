//! Slack approval gate for CI pipeline runs.
//!
//! This crate implements the protocol behind a manual approval gate: it
//! posts an interactive message with Approve/Reject buttons to a Slack
//! channel, listens on a Socket Mode connection for the first button click
//! that belongs to this run, and rewrites the message to show who decided.
//! The supervising binary maps the decision to a process exit code that the
//! calling pipeline interprets as gate-passed or gate-failed.
//!
//! # Architecture
//!
//! - [`approval`] - the request/decision protocol: run-scoped correlation
//!   id, action-id derivation, message assembly, resolution rewrite.
//! - [`blocks`] - typed Block Kit content, custom-blocks parsing, and the
//!   default run-summary body.
//! - [`client`] - Slack Web API client (`chat.postMessage`, `chat.update`,
//!   `auth.test`, `apps.connections.open`).
//! - [`socket`] - Socket Mode WebSocket listener delivering the first
//!   matching click through a oneshot channel.
//!
//! # Configuration
//!
//! Required environment variables:
//! - `SLACK_BOT_TOKEN` - Bot OAuth token (xoxb-...)
//! - `SLACK_APP_TOKEN` - App-level token for Socket Mode (xapp-...)
//! - `SLACK_SIGNING_SECRET` - Signing secret for request verification
//!
//! # Example
//!
//! ```rust,ignore
//! use slack_gate::{ApprovalRequest, GateConfig, SlackClient, SocketModeListener};
//!
//! let config = GateConfig::from_env()?;
//! let client = SlackClient::new(config)?;
//! let request = ApprovalRequest::new(channel, custom_blocks, &metadata);
//! let posted = client
//!     .post_message(request.channel(), request.notification_text(), &request.message_blocks())
//!     .await?;
//!
//! let (tx, rx) = tokio::sync::oneshot::channel();
//! tokio::spawn(SocketModeListener::new(client.clone(), request.clone(), tx).run());
//! let decision = rx.await?;
//! ```

pub mod approval;
pub mod blocks;
pub mod client;
pub mod config;
pub mod error;
pub mod socket;

// Re-export main types
pub use approval::{ApprovalRequest, Decision, Outcome, resolved_blocks};
pub use blocks::{Block, RunMetadata, parse_custom_blocks, summary_blocks};
pub use client::{PostedMessage, SlackClient};
pub use config::GateConfig;
pub use error::{GateError, GateResult};
pub use socket::SocketModeListener;
