//! slack-gate - Main entry point.
//!
//! Single-shot process supervisor for one approval request:
//! build the message, post it, listen for the first matching button click,
//! rewrite the message with the verdict, and exit with the outcome's code
//! (0 approved, 1 rejected). The calling pipeline gates on that code.

use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{error, info};

use slack_gate::socket::SocketModeListener;
use slack_gate::{ApprovalRequest, GateConfig, Outcome, SlackClient, parse_custom_blocks, resolved_blocks};

mod github;

/// Manual approval gate for GitHub Actions runs via Slack.
#[derive(Debug, Parser)]
#[command(name = "slack-gate", version, about)]
struct Cli {
    /// Slack channel to post the approval request to.
    #[arg(long, env = "SLACK_CHANNEL_ID")]
    channel: String,

    /// Custom Block Kit blocks (JSON array) replacing the default run
    /// summary. Bound to the action's `blocks` input.
    #[arg(long, env = "INPUT_BLOCKS")]
    blocks: Option<String>,
}

/// Log panics from any task before the default hook runs, so an unobserved
/// background failure is reported instead of silently dropped.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        error!("Unhandled panic: {}", panic_info);
        original_hook(panic_info);
    }));
}

fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> ExitCode {
    // For local runs; the Actions runner injects everything directly.
    dotenvy::dotenv().ok();

    init_logging();
    install_panic_hook();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(e) => {
            error!("{:#}", e);
            github::set_failed(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<Outcome> {
    let config = GateConfig::from_env()?;
    let metadata = github::run_metadata_from_env();

    // Custom blocks must parse before anything is sent; a malformed input
    // aborts with no partial post.
    let custom_blocks = match cli.blocks.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => Some(parse_custom_blocks(raw)?),
        _ => None,
    };

    let request = ApprovalRequest::new(cli.channel, custom_blocks, &metadata);
    let client = SlackClient::new(config)?;

    client
        .auth_test()
        .await
        .context("Slack authentication failed")?;

    let posted = client
        .post_message(
            request.channel(),
            request.notification_text(),
            &request.message_blocks(),
        )
        .await
        .context("Failed to post approval message")?;
    info!(
        channel = %posted.channel,
        ts = %posted.ts,
        id = %request.id(),
        "Approval message posted"
    );

    let (decision_tx, decision_rx) = tokio::sync::oneshot::channel();
    let listener = SocketModeListener::new(client.clone(), request.clone(), decision_tx);
    let mut listener_task = tokio::spawn(listener.run());

    // First click wins: the listener consumes its sender on the first
    // matching action. If the listener dies first, that is fatal - there
    // is no gate without an event channel.
    let decision = tokio::select! {
        decision = decision_rx => {
            decision.context("Event listener stopped before a decision was received")?
        }
        result = &mut listener_task => {
            match result {
                Ok(Ok(())) => bail!("Event listener exited without a decision"),
                Ok(Err(e)) => {
                    return Err(e).context("Event listener failed");
                }
                Err(e) => bail!("Event listener task panicked: {}", e),
            }
        }
    };

    info!(
        user = %decision.user_id,
        outcome = ?decision.outcome,
        "Approval decision received"
    );

    // Rewrite the message before exiting. A failed update is logged and
    // swallowed: the decision stands, and the exit code must reflect it.
    let source = decision.source_message(&posted);
    let message_blocks = if decision.blocks.is_empty() {
        request.message_blocks()
    } else {
        decision.blocks.clone()
    };
    let resolved = resolved_blocks(message_blocks, decision.outcome, &decision.user_id);

    match client.update_message(&source, &resolved).await {
        Ok(()) => info!("Approval message updated"),
        Err(e) => error!("Failed to update approval message: {}", e),
    }

    if decision.outcome == Outcome::Rejected {
        github::set_failed("Approval request rejected");
    }

    Ok(decision.outcome)
}
