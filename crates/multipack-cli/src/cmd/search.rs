//! Search command

use std::time::Duration;

use anyhow::{Context, Result};
use multipack_core::registry::DEFAULT_BASE_URL;
use multipack_core::search::SearchSession;

/// Query the registry and print suggestion rows.
pub async fn search(query: &str, limit: usize) -> Result<()> {
    let start = std::time::Instant::now();

    // One-shot invocation: nothing can supersede the query, so skip the pause.
    let session = SearchSession::with_registry(DEFAULT_BASE_URL, Duration::ZERO);
    let results = session
        .query(query, limit)
        .await
        .context("Failed to fetch package suggestions")?
        .unwrap_or_default();

    if results.is_empty() {
        println!("No packages found matching '{query}'");
        return Ok(());
    }

    println!();
    for pkg in &results {
        println!(
            "{:<28} {:>12}  {} ({})",
            pkg.name,
            format!("v{}", pkg.version),
            pkg.description,
            pkg.publisher
        );
    }

    let elapsed = start.elapsed();
    println!();
    println!(
        "SEARCH COMPLETE {}, elapsed {:.2}s",
        results.len(),
        elapsed.as_secs_f64()
    );

    Ok(())
}
