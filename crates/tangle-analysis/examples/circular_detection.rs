//! Circular dependency detection example.
//!
//! Usage: `cargo run --example circular_detection -- src/index.ts`

use tangle_analysis::{Analyzer, TangleConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let entry = std::env::args().nth(1).unwrap_or_else(|| "src/index.ts".to_string());
    let analysis = Analyzer::new(TangleConfig::with_entrypoint(entry))
        .analyze()
        .await?;

    let circular = analysis.find_circular_dependencies();
    if circular.is_empty() {
        println!("No circular dependencies found!");
        return Ok(());
    }

    println!("Found {} circular dependency chains:", circular.len());
    for (i, chain) in circular.iter().enumerate() {
        println!("\nChain {}:", i + 1);
        println!("  {}", chain.join(" -> "));
        if let Some(first) = chain.first() {
            println!("  imported (transitively) by {:?}", analysis.find_parents_of(first));
        }
    }

    Ok(())
}
