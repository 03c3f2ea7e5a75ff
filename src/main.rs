//! branchcfg CLI
//!
//! Entry point for the `branchcfg` command-line tool.

use branchcfg::sanitize::{sanitize_branch, sanitize_project, sanitize_user};
use branchcfg::{
    branch_defaults, branch_schema, find_branch, load_override, EffectiveBranchConfig,
    OverrideDocument,
};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "branchcfg")]
#[command(about = "Schema-driven branch configuration resolution", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the built-in branch schema defaults
    Defaults,

    /// Resolve the effective configuration for a branch
    Resolve {
        /// Path to the branch records file (JSON array)
        #[arg(long, short = 'b')]
        branches: PathBuf,

        /// Branch name to resolve
        #[arg(long)]
        branch: String,

        /// Path to a repository override file (.json or .toml)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Print the full artifact with provenance instead of the config alone
        #[arg(long)]
        full: bool,
    },

    /// Find the branch record matching a name
    FindBranch {
        /// Path to the branch records file (JSON array)
        #[arg(long, short = 'b')]
        branches: PathBuf,

        /// Branch name to look up
        name: String,
    },

    /// Strip secret material from a record
    Sanitize {
        /// Record kind: branch, project, or user
        #[arg(long, default_value = "branch")]
        kind: String,

        /// Path to the record file (JSON)
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Defaults => run_defaults(),
        Commands::Resolve {
            branches,
            branch,
            config,
            full,
        } => run_resolve(&branches, &branch, config, full),
        Commands::FindBranch { branches, name } => run_find_branch(&branches, &name),
        Commands::Sanitize { kind, file } => run_sanitize(&kind, &file),
    }
}

fn run_defaults() {
    print_json(&branch_defaults());
}

fn run_resolve(branches_path: &Path, branch: &str, config_path: Option<PathBuf>, full: bool) {
    let records = load_branches(branches_path);

    let override_doc: Option<OverrideDocument> = config_path.map(|path| {
        match load_override(&path) {
            Ok(doc) => doc,
            Err(e) => {
                eprintln!("Error loading override config: {}", e);
                process::exit(1);
            }
        }
    });

    let resolved =
        EffectiveBranchConfig::build(&branch_schema(), &records, branch, override_doc.as_ref());

    if full {
        match resolved.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        }
    } else {
        print_json(&resolved.config);
    }
}

fn run_find_branch(branches_path: &Path, name: &str) {
    let records = load_branches(branches_path);

    match find_branch(&records, name) {
        Some(record) => print_json(record),
        None => {
            eprintln!(
                "No branch record matches '{}' ({} records scanned)",
                name,
                records.len()
            );
            process::exit(1);
        }
    }
}

fn run_sanitize(kind: &str, file: &Path) {
    let record = load_json(file);

    let sanitized = match kind {
        "branch" => sanitize_branch(&record),
        "project" => sanitize_project(&record),
        "user" => sanitize_user(&record),
        other => {
            eprintln!("Unknown record kind '{}' (expected branch, project, or user)", other);
            process::exit(2);
        }
    };

    print_json(&sanitized);
}

/// Load branch records: either a top-level JSON array or an object with a
/// `branches` array.
fn load_branches(path: &Path) -> Vec<Value> {
    let document = load_json(path);

    let records = match &document {
        Value::Array(records) => Some(records.clone()),
        Value::Object(_) => document
            .get("branches")
            .and_then(Value::as_array)
            .cloned(),
        _ => None,
    };

    match records {
        Some(records) => records,
        None => {
            eprintln!(
                "Branch records file {} must be a JSON array or carry a 'branches' array",
                path.display()
            );
            process::exit(1);
        }
    }
}

fn load_json(path: &Path) -> Value {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            eprintln!("Error reading {}: {}", path.display(), e);
            process::exit(1);
        }
    };

    match serde_json::from_str(&contents) {
        Ok(value) => value,
        Err(e) => {
            eprintln!("Error parsing {}: {}", path.display(), e);
            process::exit(1);
        }
    }
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}
