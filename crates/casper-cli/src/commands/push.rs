//! Push command implementation

use std::io::{self, IsTerminal, Write};

use dialoguer::Confirm;

use crate::cli::DiffArgs;
use crate::context::Context;
use crate::error::{CliError, Result};

use super::diff::print_changes;

const PROMPT: &str = "Continue";

/// Show the diff, confirm unless `force`, then apply it to the store.
pub fn run_push(ctx: &Context, args: &DiffArgs, force: bool, out: &mut impl Write) -> Result<()> {
    let mut store = ctx.open_store()?;
    let changes = ctx.changes(store.as_ref(), args.key.as_deref())?;
    print_changes(&changes, args, out)?;
    if changes.is_empty() {
        return Ok(());
    }

    if !force {
        out.flush()?;
        if !confirm(io::stdin().is_terminal())? {
            writeln!(out, "Canceled")?;
            return Ok(());
        }
    }

    writeln!(out, "Applying changes...")?;
    ctx.reconciler()
        .push(&changes, &mut store)
        .map_err(|e| CliError::from(e).during("applying changes"))?;
    tracing::info!(changes = changes.len(), "Push complete");
    Ok(())
}

fn confirm(interactive: bool) -> Result<bool> {
    if !interactive {
        return Err(CliError::user(
            "push needs confirmation from a terminal; pass --force to apply without asking",
        ));
    }
    Ok(Confirm::new().with_prompt(PROMPT).default(false).interact()?)
}
