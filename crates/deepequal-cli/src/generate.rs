//! Generate command implementation

use crate::Verbosity;
use crate::common::{apply_log_level, load_config, load_universe};
use anyhow::{Context, Result};
use clap::Args;
use deepequal_core::GeneratorConfig;
use deepequal_gen::{Generator, PackageOutput};
use deepequal_logging::Diagnostics;
use std::path::{Path, PathBuf};
use tracing::info;

/// Marker line identifying generated files
pub const GENERATED_MARKER: &str = "// Code generated by deepequal-gen. DO NOT EDIT.";

#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Declaration file describing the scanned packages
    #[arg(short, long)]
    pub input: PathBuf,

    /// Path to deepequal.toml (default: ./deepequal.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Root directory generated files are written under
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Output file name without the .go extension
    #[arg(long)]
    pub output_file_base: Option<String>,

    /// Build tag excluded by the generated files
    #[arg(long)]
    pub build_tag: Option<String>,

    /// File whose contents are prepended to each generated file
    #[arg(long)]
    pub boilerplate: Option<PathBuf>,

    /// Source root used to place packages found under a vendor directory
    #[arg(long)]
    pub output_base: Option<String>,

    /// Write every file to this package path instead of the source package's
    #[arg(long)]
    pub gen_package_path: Option<String>,

    /// Only consider packages rooted under this dir (repeatable)
    #[arg(long = "bounding-dir")]
    pub bounding_dirs: Vec<String>,

    /// Print the files instead of writing them
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateArgs {
    /// Override config file values with the flags that were given
    pub fn apply(&self, config: &mut GeneratorConfig) {
        if let Some(base) = &self.output_file_base {
            config.output_file_base = base.clone();
        }
        if let Some(tag) = &self.build_tag {
            config.build_tag = tag.clone();
        }
        if let Some(boilerplate) = &self.boilerplate {
            config.boilerplate = Some(boilerplate.clone());
        }
        if let Some(base) = &self.output_base {
            config.output_base = Some(base.clone());
        }
        if let Some(path) = &self.gen_package_path {
            config.gen_package_path = Some(path.clone());
        }
        if !self.bounding_dirs.is_empty() {
            config.bounding_dirs = self.bounding_dirs.clone();
        }
    }
}

/// A rendered output file, relative to the output dir
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub path: PathBuf,
    pub contents: String,
}

/// File header: build constraint, boilerplate and the generated marker
pub fn header(config: &GeneratorConfig, boilerplate: &str) -> String {
    let mut out = format!("// +build !{}\n\n", config.build_tag);
    let boilerplate = boilerplate.trim_end();
    if !boilerplate.is_empty() {
        out.push_str(boilerplate);
        out.push_str("\n\n");
    }
    out.push_str(GENERATED_MARKER);
    out.push_str("\n\n");
    out
}

/// Package path a package's file is written under
pub fn output_package_path(output: &PackageOutput, config: &GeneratorConfig) -> String {
    if let Some(path) = &config.gen_package_path {
        return path.clone();
    }

    // Packages found under a vendor dir are written to their vendored
    // location rather than their import path.
    if let (Some(base), Some(source)) = (&config.output_base, &output.source_path) {
        if let Some(expanded) = source.strip_prefix(base.as_str()) {
            if expanded.contains("/vendor/") {
                return expanded.trim_start_matches('/').to_string();
            }
        }
    }
    output.path.clone()
}

/// Render the complete file for one package
pub fn render_file(output: &PackageOutput, config: &GeneratorConfig, boilerplate: &str) -> RenderedFile {
    let mut contents = header(config, boilerplate);
    contents.push_str(&format!("package {}\n", output.name));

    let methods = output.render_methods();
    if !methods.is_empty() {
        contents.push('\n');
        contents.push_str(&methods);
    }

    let path = Path::new(&output_package_path(output, config)).join(format!("{}.go", config.output_file_base));
    RenderedFile { path, contents }
}

/// Generate command implementation
pub fn run(args: &GenerateArgs, verbosity: Verbosity) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    args.apply(&mut config.generator);
    config.generator.validate()?;
    apply_log_level(&config, verbosity)?;

    let universe = load_universe(&args.input)?;
    let outputs = Generator::new(&universe, &config.generator).run()?;

    let boilerplate = match &config.generator.boilerplate {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed loading boilerplate: {}", path.display()))?,
        None => String::new(),
    };

    // Everything is rendered before the first write.
    let files: Vec<RenderedFile> = outputs
        .iter()
        .map(|output| render_file(output, &config.generator, &boilerplate))
        .collect();

    if args.dry_run {
        for file in &files {
            println!("==> {}", file.path.display());
            print!("{}", file.contents);
        }
    } else {
        for file in &files {
            let target = args.output_dir.join(&file.path);
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
            std::fs::write(&target, &file.contents)
                .with_context(|| format!("Failed to write {}", target.display()))?;
            info!(path = %target.display(), "wrote file");
        }
    }

    let generated: usize = outputs.iter().map(|o| o.generated().count()).sum();
    eprintln!(
        "Generated {} DeepEqual method(s) in {} package(s)",
        generated,
        files.len()
    );
    let warnings = Diagnostics::global().warnings();
    if warnings > 0 {
        eprintln!("{} warning(s)", warnings);
    }

    Ok(())
}

#[cfg(test)]
#[path = "generate/generate_tests.rs"]
mod generate_tests;
