use clap::{Parser, Subcommand};
use ikou::prelude::*;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Instant;

// A node file holds either one serialized node or a list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawNodes {
    Many(Vec<LegacyNodeInstance>),
    One(LegacyNodeInstance),
}

impl RawNodes {
    fn into_vec(self) -> Vec<LegacyNodeInstance> {
        match self {
            RawNodes::Many(nodes) => nodes,
            RawNodes::One(node) => vec![node],
        }
    }
}

/// Validate node migration catalogs and migrate legacy nodes with them
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the migration catalog JSON file
    catalog_path: String,

    /// Pretty-print JSON output instead of emitting it on one line
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate the catalog and list every registered migration
    Check {
        /// Exit with an error if any entry was rejected
        #[arg(long)]
        deny_rejected: bool,
    },
    /// Print the catalog in its canonical encoding
    Normalize,
    /// Migrate the node(s) in a JSON file and print the resulting descriptors
    Resolve {
        /// Path to a JSON file with one legacy node or an array of them
        nodes_path: String,

        /// Inputs the new node requires; missing ones are reported as errors
        #[arg(long, value_delimiter = ',')]
        strict: Vec<String>,

        /// Fail if any downstream link is left dangling
        #[arg(long)]
        deny_dangling: bool,
    },
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let load_start = Instant::now();
    let catalog_json = fs::read_to_string(&cli.catalog_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read catalog file '{}': {}",
            &cli.catalog_path, e
        ))
    });
    let load = MigrationCatalog::from_json(&catalog_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load catalog: {}", e)));
    log::info!(
        "Catalog '{}' loaded in {:?}",
        cli.catalog_path,
        load_start.elapsed()
    );

    match cli.command {
        Command::Check { deny_rejected } => run_check(load, deny_rejected),
        Command::Normalize => {
            let snapshots: Vec<RecordSnapshot> = load.catalog.iter().map(MigrationRecord::snapshot).collect();
            println!("{}", render_json(&snapshots, cli.pretty));
        }
        Command::Resolve {
            nodes_path,
            strict,
            deny_dangling,
        } => run_resolve(&load.catalog, &nodes_path, &strict, deny_dangling, cli.pretty),
    }
}

fn run_check(load: CatalogLoad, deny_rejected: bool) {
    println!("--- Registered Migrations ({}) ---", load.catalog.len());
    for record in load.catalog.iter() {
        println!(
            "  {} -> {} ({} inputs, {} outputs)",
            record.old_node_type(),
            record.new_node_type(),
            record.input_mappings().len(),
            record.output_mappings().len()
        );
    }

    if !load.rejected.is_empty() {
        println!("\n--- Rejected Entries ({}) ---", load.rejected.len());
        for err in &load.rejected {
            println!("  {}", err);
        }
        if deny_rejected {
            exit_with_error("Catalog contains invalid entries");
        }
    }
}

fn run_resolve(
    catalog: &MigrationCatalog,
    nodes_path: &str,
    strict: &[String],
    deny_dangling: bool,
    pretty: bool,
) {
    let nodes_json = fs::read_to_string(nodes_path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read node file '{}': {}", nodes_path, e))
    });
    let nodes = serde_json::from_str::<RawNodes>(&nodes_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse node JSON: {}", e)))
        .into_vec();

    let resolve_start = Instant::now();
    let mut descriptors = Vec::with_capacity(nodes.len());
    let mut failures = 0usize;

    for node in &nodes {
        let descriptor = match catalog.resolve(node) {
            Ok(descriptor) => descriptor,
            Err(e) => {
                log::error!("{}", e);
                failures += 1;
                continue;
            }
        };

        if let Err(e) = descriptor.require_inputs(strict) {
            log::error!("{}", e);
            failures += 1;
        }
        if deny_dangling {
            if let Some(report) = dangling_report(&descriptor) {
                log::error!("{}", report);
                failures += 1;
            }
        }
        descriptors.push(descriptor);
    }
    log::info!(
        "Resolved {} of {} nodes in {:?}",
        descriptors.len(),
        nodes.len(),
        resolve_start.elapsed()
    );

    println!("{}", render_json(&descriptors, pretty));

    if failures > 0 {
        exit_with_error(&format!("{} node(s) failed to migrate cleanly", failures));
    }
}

fn render_json<T: Serialize>(value: &T, pretty: bool) -> String {
    let result = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    result.unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize output: {}", e)))
}

/// Names the node and every link it left dangling, or `None` if all links moved.
fn dangling_report(descriptor: &NewNodeDescriptor) -> Option<String> {
    if !descriptor.has_dangling_outputs() {
        return None;
    }
    let links = descriptor
        .dangling_outputs
        .iter()
        .map(|d| format!("link {} (old output {})", d.link.link_id, d.link.origin_slot))
        .collect::<Vec<_>>()
        .join(", ");
    Some(format!(
        "Node '{}' ({} -> {}) has dangling links: {}",
        descriptor.node_id, descriptor.replaced_type, descriptor.node_type, links
    ))
}

/// Logs to stderr so descriptor JSON on stdout stays machine-readable.
/// The level comes from `RUST_LOG` and defaults to `info`.
fn init_logging() {
    let level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|l| l.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info);

    let result = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply();

    if let Err(e) = result {
        eprintln!("Failed to initialize logging: {}", e);
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
