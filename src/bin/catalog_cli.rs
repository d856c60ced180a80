//! Studio Catalog CLI
//!
//! Commands: categories, genres, search, show, browse
//! Outputs JSON to stdout, logs to stderr
//! Returns non-zero on caller errors

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use studio_catalog::{
    link,
    observability::{init_logging, LogFormat},
    Catalog, CatalogBrowser, FacetState, FilterPipeline, WorkId,
};

#[derive(Parser)]
#[command(name = "catalog-cli")]
#[command(about = "Studio Catalog CLI - search and browse the catalog")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a catalog document (defaults to the built-in catalog)
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// List selectable categories
    Categories,

    /// List distinct genre tags
    Genres,

    /// Filter and sort the catalog
    Search {
        /// JSON payload (FacetState)
        #[arg(short, long, default_value = "{}")]
        facets: String,

        /// Category link parameter; replaces the payload's genres
        #[arg(long)]
        category: Option<String>,
    },

    /// Show one work with its catalog neighbours
    Show {
        /// Work id
        id: String,
    },

    /// Open the detail view and step through results
    Browse {
        /// JSON payload (FacetState)
        #[arg(short, long, default_value = "{}")]
        facets: String,

        /// Category link parameter; replaces the payload's genres
        #[arg(long)]
        category: Option<String>,

        /// Result index to open
        #[arg(short, long, default_value_t = 0)]
        open: usize,

        /// Navigation steps, applied in order
        #[arg(short, long, value_enum)]
        step: Vec<Step>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Step {
    Next,
    Prev,
    Close,
}

fn emit<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => fail(&format!("Failed to serialize output: {}", e)),
    }
}

fn fail(message: &str) -> ExitCode {
    println!("{}", serde_json::json!({ "success": false, "error": message }));
    ExitCode::FAILURE
}

fn parse_facets(payload: &str, catalog: &Catalog, category: Option<&str>) -> Result<FacetState, String> {
    let facets: FacetState =
        serde_json::from_str(payload).map_err(|e| format!("Invalid payload: {}", e))?;
    Ok(match category {
        Some(param) => link::from_link(&facets, catalog.taxonomy(), Some(param)),
        None => facets,
    })
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_format);

    let loaded = match &cli.catalog {
        Some(path) => Catalog::load_from_path(path),
        None => Catalog::builtin(),
    };
    let catalog = match loaded {
        Ok(c) => Arc::new(c),
        Err(e) => return fail(&format!("Failed to load catalog: {}", e)),
    };

    match cli.command {
        Commands::Categories => {
            let taxonomy = catalog.taxonomy();
            let listed: Vec<_> = taxonomy
                .list()
                .iter()
                .map(|category| {
                    serde_json::json!({
                        "category": category,
                        "aliases": taxonomy.aliases_of(&category.genre),
                    })
                })
                .collect();
            emit(&listed)
        }

        Commands::Genres => emit(&catalog.genres()),

        Commands::Search { facets, category } => {
            let facets = match parse_facets(&facets, &catalog, category.as_deref()) {
                Ok(f) => f,
                Err(e) => return fail(&e),
            };

            let pipeline = FilterPipeline::new(Arc::clone(&catalog));
            match pipeline.report(&facets) {
                Ok(report) => emit(&serde_json::json!({
                    "success": true,
                    "category": link::to_link(&facets, catalog.taxonomy()),
                    "report": report,
                })),
                Err(e) => fail(&e.to_string()),
            }
        }

        Commands::Show { id } => {
            let work = id.parse::<WorkId>().ok().and_then(|id| catalog.get(id));
            match work {
                Some(work) => emit(&serde_json::json!({
                    "success": true,
                    "work": work,
                    "prevId": catalog.prev_id(work.id),
                    "nextId": catalog.next_id(work.id),
                })),
                None => fail(&format!("Work not found: {}", id)),
            }
        }

        Commands::Browse { facets, category, open, step } => {
            let facets = match parse_facets(&facets, &catalog, category.as_deref()) {
                Ok(f) => f,
                Err(e) => return fail(&e),
            };

            let mut browser = match CatalogBrowser::with_facets(Arc::clone(&catalog), facets) {
                Ok(b) => b,
                Err(e) => return fail(&e.to_string()),
            };
            if let Err(e) = browser.open(open) {
                return fail(&e.to_string());
            }
            for s in step {
                match s {
                    Step::Next => {
                        browser.next();
                    }
                    Step::Prev => {
                        browser.prev();
                    }
                    Step::Close => browser.close(),
                }
            }

            emit(&serde_json::json!({
                "success": true,
                "matched": browser.results().len(),
                "selection": browser.selection(),
                "hasPrev": browser.has_prev(),
                "hasNext": browser.has_next(),
                "work": browser.selected(),
            }))
        }
    }
}
