//! Fetch command implementation

use std::io::Write;

use casper_core::Format;

use crate::context::Context;
use crate::error::Result;

/// Print the whole store as a document in `format`.
pub fn run_fetch(ctx: &Context, format: Format, out: &mut impl Write) -> Result<()> {
    let store = ctx.open_store()?;
    let document = ctx.reconciler().fetch(store.as_ref(), format)?;
    write!(out, "{document}")?;
    if !document.ends_with('\n') {
        writeln!(out)?;
    }
    Ok(())
}
