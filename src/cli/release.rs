//! Release command - raise the release PR for the current push

use crate::cli::context::CommandContext;
use anstream::println;
use owo_colors::OwoColorize;
use release_pr::error::Result;
use release_pr::git::SystemRunner;
use release_pr::workflow::{ReleaseOutcome, ReleaseWorkflow};
use std::path::Path;

/// Run the release command
pub async fn run_release(workdir: &Path, event_path: &Path) -> Result<()> {
    let ctx = CommandContext::new(workdir, event_path)?;
    let runner = SystemRunner;

    let workflow = ReleaseWorkflow::new(
        &ctx.config,
        &runner,
        ctx.platform.as_ref(),
        &ctx.auth,
        &ctx.workdir,
    );

    match workflow.raise_pull_request(&ctx.event).await? {
        ReleaseOutcome::NotReleaseBranch { pushed_ref } => {
            println!(
                "{} {} is not {}, nothing to do",
                "-".dimmed(),
                pushed_ref.cyan(),
                ctx.config.release_ref().cyan()
            );
        }
        ReleaseOutcome::NoChanges => {
            println!("{} No version bump in the working tree, nothing to do", "-".dimmed());
        }
        ReleaseOutcome::Opened {
            version,
            branch,
            pull_request,
        } => {
            println!(
                "{} Opened PR #{} for {} from {}",
                "✓".green(),
                pull_request.number,
                version.bold(),
                branch.cyan()
            );
            println!("  {}", pull_request.html_url.underline());
        }
    }

    Ok(())
}
