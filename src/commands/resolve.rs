//! `lineage resolve` — full genealogy resolution for one chain.

use std::fmt::Write as _;
use std::path::Path;

use uuid::Uuid;

use crate::artifact;
use crate::context::ServiceContext;
use crate::genealogy::{self, Resolution};

/// Runs resolution for one chain identifier over an artifact directory.
///
/// Loads artifacts through the filesystem port, assembles the genealogy
/// (collect + extend both endpoints), persists the link set unless
/// `dry_run` is set, and prints a report.
///
/// # Errors
///
/// Returns an error if artifact loading, either relation search, or the
/// persist step fails.
pub fn run(
    ctx: &ServiceContext,
    chain_id: &str,
    artifacts_dir: &Path,
    dry_run: bool,
) -> Result<(), String> {
    let run_id = Uuid::new_v4();
    let span = tracing::info_span!("resolve", %run_id, chain_id);
    let _guard = span.enter();

    let artifacts = artifact::load_artifacts(ctx.fs.as_ref(), artifacts_dir)?;
    tracing::info!(artifacts = artifacts.len(), "loaded deployment artifacts");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start runtime: {e}"))?;

    let outcome: Option<(Resolution, Vec<String>)> = runtime.block_on(async {
        let Some(resolution) = genealogy::assemble(
            ctx.store.as_ref(),
            ctx.chain.as_ref(),
            chain_id,
            &artifacts,
        )
        .await?
        else {
            return Ok::<_, String>(None);
        };

        let ids = if dry_run {
            Vec::new()
        } else {
            genealogy::persist_resolution(ctx.store.as_ref(), &resolution).await?
        };
        Ok(Some((resolution, ids)))
    })?;

    match outcome {
        None => {
            println!("No networks observed for chain {chain_id}; nothing to resolve.");
        }
        Some((resolution, ids)) => {
            println!("{}", format_resolution(chain_id, &resolution, &ids, dry_run));
            println!("Run {run_id} finished at {}", ctx.clock.now().to_rfc3339());
        }
    }

    Ok(())
}

/// Formats a resolution as a human-readable report.
#[must_use]
pub fn format_resolution(
    chain_id: &str,
    resolution: &Resolution,
    ids: &[String],
    dry_run: bool,
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Chain {chain_id}: {} -> {}",
        describe(&resolution.ancestor.id, resolution.ancestor.historic_block.height),
        describe(&resolution.descendant.id, resolution.descendant.historic_block.height),
    );

    for link in &resolution.links {
        let _ = writeln!(
            out,
            "  LINK {} -> {}",
            describe(&link.ancestor.id, link.ancestor.historic_block.height),
            describe(&link.descendant.id, link.descendant.historic_block.height),
        );
    }

    match &resolution.extended_ancestor {
        Some(found) => {
            let _ = writeln!(
                out,
                "  Known ancestor: {}",
                describe(&found.id, found.historic_block.height)
            );
        }
        None => {
            let _ = writeln!(out, "  No known ancestor");
        }
    }
    match &resolution.extended_descendant {
        Some(found) => {
            let _ = writeln!(
                out,
                "  Known descendant: {}",
                describe(&found.id, found.historic_block.height)
            );
        }
        None => {
            let _ = writeln!(out, "  No known descendant");
        }
    }

    if dry_run {
        let _ = write!(out, "Dry run — {} links not persisted.", resolution.links.len());
    } else {
        let _ = write!(out, "Persisted {} links: [{}]", ids.len(), ids.join(", "));
    }
    out
}

fn describe(id: &str, height: u64) -> String {
    format!("{id} (#{height})")
}
