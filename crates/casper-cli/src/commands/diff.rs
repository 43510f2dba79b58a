//! Diff command implementation
//!
//! Previews what push would change without touching the store.

use std::io::Write;

use casper_core::{ChangeSet, no_changes, render_diff};
use colored::Colorize;

use crate::cli::DiffArgs;
use crate::context::Context;
use crate::error::Result;

/// Run the diff command
pub fn run_diff(ctx: &Context, args: &DiffArgs, out: &mut impl Write) -> Result<()> {
    let store = ctx.open_store()?;
    let changes = ctx.changes(store.as_ref(), args.key.as_deref())?;
    print_changes(&changes, args, out)
}

/// Write `changes` the way `args` asks for.
pub(crate) fn print_changes(
    changes: &ChangeSet,
    args: &DiffArgs,
    out: &mut impl Write,
) -> Result<()> {
    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(changes)?)?;
        return Ok(());
    }
    if changes.is_empty() {
        write!(out, "{}", no_changes(args.key.as_deref()))?;
        return Ok(());
    }

    let text = render_diff(changes, !args.plain)?;
    if args.plain {
        write!(out, "{text}")?;
        return Ok(());
    }
    for line in text.lines() {
        if line.starts_with('-') {
            writeln!(out, "{}", line.red())?;
        } else if line.starts_with('+') {
            writeln!(out, "{}", line.green())?;
        } else {
            writeln!(out, "{line}")?;
        }
    }
    Ok(())
}
