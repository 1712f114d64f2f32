//! `lineage collect` — print the collected chain without remote effects.

use std::fmt::Write as _;
use std::path::Path;

use crate::artifact;
use crate::context::ServiceContext;
use crate::genealogy::{collect, Genealogy};

/// Collects and prints the genealogy chain for one chain identifier.
///
/// Only the filesystem port is touched; the store and chain ports stay
/// idle, which makes this the quick way to inspect what `resolve` would
/// link before running it.
///
/// # Errors
///
/// Returns an error if artifact loading fails.
pub fn run(ctx: &ServiceContext, chain_id: &str, artifacts_dir: &Path) -> Result<(), String> {
    let artifacts = artifact::load_artifacts(ctx.fs.as_ref(), artifacts_dir)?;
    let observations = artifact::observations_for_chain(&artifacts, chain_id);

    match collect(&observations) {
        None => println!("No networks observed for chain {chain_id}."),
        Some(genealogy) => println!("{}", format_genealogy(chain_id, &genealogy)),
    }
    Ok(())
}

/// Formats a collected chain as a human-readable listing.
#[must_use]
pub fn format_genealogy(chain_id: &str, genealogy: &Genealogy) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Chain {chain_id}: {} networks observed",
        genealogy.links.len() + 1
    );
    let _ = writeln!(
        out,
        "  Earliest: {} (#{})",
        genealogy.ancestor.id, genealogy.ancestor.historic_block.height
    );
    let _ = writeln!(
        out,
        "  Latest:   {} (#{})",
        genealogy.descendant.id, genealogy.descendant.historic_block.height
    );
    for link in &genealogy.links {
        let _ = writeln!(
            out,
            "  LINK {} (#{}) -> {} (#{})",
            link.ancestor.id,
            link.ancestor.historic_block.height,
            link.descendant.id,
            link.descendant.historic_block.height
        );
    }
    out.trim_end().to_string()
}
