//! GitHub Actions environment integration.
//!
//! Reads the run metadata the runner exports and writes workflow commands
//! (`::error::`) so a rejection shows up as a failure annotation on the run,
//! not just a non-zero exit code.

use slack_gate::RunMetadata;

/// Read run metadata from the environment the Actions runner provides.
/// Missing variables become empty strings, matching how the runner treats
/// unset context values.
pub fn run_metadata_from_env() -> RunMetadata {
    RunMetadata {
        server_url: env_or_default("GITHUB_SERVER_URL"),
        repository: env_or_default("GITHUB_REPOSITORY"),
        run_id: env_or_default("GITHUB_RUN_ID"),
        workflow: env_or_default("GITHUB_WORKFLOW"),
        runner_os: env_or_default("RUNNER_OS"),
        actor: env_or_default("GITHUB_ACTOR"),
    }
}

fn env_or_default(name: &str) -> String {
    std::env::var(name).unwrap_or_default()
}

/// Emit an `error` workflow command, the caller-facing failure status.
/// The process exit code carries the actual gate result.
pub fn set_failed(message: &str) {
    println!("::error::{}", escape_data(message));
}

/// Escape a workflow-command data value.
fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
