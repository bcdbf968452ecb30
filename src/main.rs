//! docgo-validate - strict manifest validation for authoring and CI
//!
//! Validates a manifest.json against the full authoring schema (category,
//! form metadata, numeric config block). Exit code 0 with a summary when
//! valid, 1 with an enumerated error list otherwise.

use std::fs;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use serde_json::Value;

use docgo::validation::validate_manifest;

#[derive(Parser)]
#[command(name = "docgo-validate")]
#[command(author, version, about = "Validate a docgo manifest.json against the authoring schema")]
struct Cli {
    /// Path to the manifest file
    #[arg(default_value = "./manifest.json")]
    manifest: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    if !cli.manifest.exists() {
        eprintln!("✗ File not found: {}", cli.manifest.display());
        process::exit(1);
    }

    let content = match fs::read_to_string(&cli.manifest) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("✗ Failed to read {}: {}", cli.manifest.display(), e);
            process::exit(1);
        }
    };

    let doc: Value = match serde_json::from_str(&content) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("✗ Failed to parse {}: {}", cli.manifest.display(), e);
            process::exit(1);
        }
    };

    println!("Validating manifest: {}", cli.manifest.display());
    println!("{}", "-".repeat(50));

    let report = validate_manifest(&doc);
    if report.is_valid() {
        println!("✓ Manifest valid!");
        if let Some(name) = doc.get("name").and_then(Value::as_str) {
            println!("  Name:       {}", name);
        }
        if let Some(version) = doc.get("version").and_then(Value::as_str) {
            println!("  Version:    {}", version);
        }
        if let Some(functions) = doc.get("functions").and_then(Value::as_object) {
            let total_params: usize = functions
                .values()
                .filter_map(|f| f.get("params").and_then(Value::as_array))
                .map(|params| params.len())
                .sum();
            println!("  Functions:  {}", functions.len());
            println!("  Parameters: {}", total_params);
        }
    } else {
        println!("✗ Manifest invalid!");
        println!();
        println!("Errors found:");
        for (index, error) in report.errors.iter().enumerate() {
            println!("  {}. {}", index + 1, error);
        }
        process::exit(1);
    }
}
