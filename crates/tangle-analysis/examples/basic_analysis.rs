//! Basic analysis example.
//!
//! Loads the project configuration from the current directory, builds the
//! dependency graph and prints a summary.

use tangle_analysis::{Analyzer, TangleConfig, UnusedDependencyOptions};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // tangle.toml, tangle.json or package.json#tangle, then TANGLE_* overrides
    let config = TangleConfig::load(".")?;
    let analysis = Analyzer::new(config).analyze().await?;

    println!("Visited {} files", analysis.files.len());
    println!("Leaves: {:?}", analysis.find_leaves());

    match analysis
        .find_unused_dependencies(UnusedDependencyOptions::default())
        .await
    {
        Ok(unused) => println!("Unused dependencies: {:?}", unused.third_party),
        Err(err) => eprintln!("Skipping unused dependencies: {err}"),
    }

    println!("\n{analysis}");

    Ok(())
}
