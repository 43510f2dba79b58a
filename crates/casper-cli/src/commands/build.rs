//! Build command implementation
//!
//! Renders the template without touching the store.

use std::io::Write;

use crate::context::Context;
use crate::error::Result;

/// Print the rendered template.
pub fn run_build(ctx: &Context, out: &mut impl Write) -> Result<()> {
    tracing::debug!(
        template = %ctx.template().display(),
        sources = ctx.sources().len(),
        "Building"
    );
    let rendered = ctx.render_template()?;
    write!(out, "{rendered}")?;
    Ok(())
}
