//! Check command implementation

use crate::Verbosity;
use crate::common::{apply_log_level, load_config, load_universe};
use anyhow::Result;
use deepequal_gen::Generator;
use deepequal_logging::Diagnostics;
use std::path::Path;

/// Check command implementation
pub fn run(input: &Path, config_path: Option<&Path>, verbosity: Verbosity) -> Result<()> {
    let config = load_config(config_path)?;
    apply_log_level(&config, verbosity)?;

    println!("Checking declarations: {}", input.display());

    let universe = load_universe(input)?;
    let outputs = Generator::new(&universe, &config.generator).run()?;

    let mut generated = 0;
    let mut kept = 0;
    println!("✓ Packages needing generation: {}", outputs.len());
    for output in &outputs {
        let package_generated = output.generated().count();
        let package_kept = output.kept().count();
        println!(
            "  {} ({} generated, {} hand-written)",
            output.path, package_generated, package_kept
        );
        generated += package_generated;
        kept += package_kept;
    }
    println!("✓ Types generated: {}", generated);
    println!("✓ Types delegated to hand-written methods: {}", kept);

    let warnings = Diagnostics::global().warnings();
    if warnings > 0 {
        println!("! Warnings: {}", warnings);
    }
    println!("\nDeclarations are valid!");

    Ok(())
}
