//! # Stockroom Report
//!
//! Prints the inventory dashboard for a JSON export of product records, and
//! optionally checks a product draft against it.
//!
//! ## Usage
//! ```bash
//! # Summary and status table
//! cargo run -p stockroom-report -- products.json
//!
//! # Also validate a draft (create form)
//! cargo run -p stockroom-report -- products.json draft.json
//!
//! # Validate a draft as an edit of product 7, table filtered by "mouse"
//! cargo run -p stockroom-report -- products.json draft.json --edit 7 --search mouse
//! ```
//!
//! ## Environment
//! - `STOCKROOM_STRICT_PRICE`: reject zero prices (default: false)
//! - `STOCKROOM_CURRENCY_SYMBOL`: display symbol (default: `$`)
//! - `STOCKROOM_LOW_STOCK_THRESHOLD`: low-stock boundary (default: 20)
//! - `RUST_LOG`: log filter (default: `info`)
//!
//! Exits 2 on usage errors, 1 on config, I/O or parse failures, and 1 when
//! the draft is rejected.

mod config;
mod error;
mod report;

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use serde::de::DeserializeOwned;
use stockroom_core::search::filter_products;
use stockroom_core::{ProductDraft, ProductRecord, ProductValidator, StatusCalculator};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::ReportConfig;
use crate::error::{ReportError, ReportResult};
use crate::report::{DraftOutcome, StatsView, StatusTable};

const USAGE: &str = "Usage: stockroom-report <products.json> [draft.json] [OPTIONS]";

/// Parsed command line.
#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    products: PathBuf,
    draft: Option<PathBuf>,
    edit: Option<i64>,
    search: Option<String>,
    help: bool,
}

fn parse_args<I>(args: I) -> ReportResult<Args>
where
    I: IntoIterator<Item = String>,
{
    let mut parsed = Args::default();
    let mut positional = Vec::new();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--edit" | "-e" => {
                let value = args
                    .next()
                    .ok_or_else(|| ReportError::Usage("--edit needs a product id".to_string()))?;
                let id = value
                    .parse()
                    .map_err(|_| ReportError::Usage(format!("invalid product id: {}", value)))?;
                parsed.edit = Some(id);
            }
            "--search" | "-s" => {
                let term = args
                    .next()
                    .ok_or_else(|| ReportError::Usage("--search needs a term".to_string()))?;
                parsed.search = Some(term);
            }
            "--help" | "-h" => parsed.help = true,
            flag if flag.starts_with('-') => {
                return Err(ReportError::Usage(format!("unknown option: {}", flag)));
            }
            _ => positional.push(PathBuf::from(arg)),
        }
    }

    if parsed.help {
        return Ok(parsed);
    }

    let mut positional = positional.into_iter();
    parsed.products = positional
        .next()
        .ok_or_else(|| ReportError::Usage(USAGE.to_string()))?;
    parsed.draft = positional.next();

    if positional.next().is_some() {
        return Err(ReportError::Usage(USAGE.to_string()));
    }

    Ok(parsed)
}

fn print_help() {
    println!("Stockroom Inventory Report");
    println!();
    println!("{}", USAGE);
    println!();
    println!("Options:");
    println!("  -e, --edit <ID>      Check the draft as an edit of product ID");
    println!("  -s, --search <TERM>  Only list products matching TERM");
    println!("  -h, --help           Show this help message");
}

fn read_json<T: DeserializeOwned>(path: &Path) -> ReportResult<T> {
    let text = fs::read_to_string(path).map_err(|source| ReportError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&text).map_err(|source| ReportError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn run(args: Args, config: ReportConfig) -> ReportResult<()> {
    let products: Vec<ProductRecord> = read_json(&args.products)?;
    info!(path = %args.products.display(), count = products.len(), "Products loaded");

    let calculator = StatusCalculator::new(config.inventory_policy());
    let symbol = config.currency_symbol.as_str();

    let stats = calculator.aggregate(&products);
    println!("{}", StatsView { stats: &stats, symbol });

    let listed = filter_products(&products, args.search.as_deref().unwrap_or(""));
    print!(
        "{}",
        StatusTable {
            products: &listed,
            calculator: &calculator,
            symbol,
        }
    );

    let Some(draft_path) = args.draft else {
        return Ok(());
    };

    let draft: ProductDraft = read_json(&draft_path)?;
    let validator = ProductValidator::new(config.validation_policy());
    let outcome = validator.validate_for_submit(&draft, &products, args.edit);

    println!();
    print!("{}", DraftOutcome { outcome: &outcome, symbol });

    outcome.map(|_| ()).map_err(ReportError::InvalidDraft)
}

/// Process exit code for a failed run.
fn exit_status(err: &ReportError) -> u8 {
    match err {
        ReportError::Usage(_) => 2,
        _ => 1,
    }
}

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = match parse_args(env::args().skip(1)) {
        Ok(args) if args.help => {
            print_help();
            return ExitCode::SUCCESS;
        }
        Ok(args) => args,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::from(exit_status(&err));
        }
    };

    let result = ReportConfig::load()
        .map_err(ReportError::from)
        .and_then(|config| {
            info!(
                strict_price = config.strict_price,
                low_stock_threshold = config.low_stock_threshold,
                "Configuration loaded"
            );
            run(args, config)
        });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match &err {
                ReportError::InvalidDraft(errors) => {
                    info!(fields = errors.len(), "Draft rejected");
                }
                _ => error!(error = %err, "Report failed"),
            }
            ExitCode::from(exit_status(&err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use stockroom_core::Field;
    use tempfile::NamedTempFile;

    const PRODUCTS: &str = r#"[
        {"id": 1, "name": "Wireless Mouse", "sku": "123-456-78", "category": "Electronics",
         "stock": 45, "price": 29.99, "description": null},
        {"id": 2, "name": "Desk Lamp", "sku": "234-567-89", "category": "Home & Garden",
         "stock": 3, "price": 12.5, "description": "LED"}
    ]"#;

    fn json_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn run_with(products: &NamedTempFile, draft: Option<&NamedTempFile>) -> ReportResult<()> {
        let args = Args {
            products: products.path().to_path_buf(),
            draft: draft.map(|file| file.path().to_path_buf()),
            ..Args::default()
        };
        run(args, ReportConfig::default())
    }

    fn args(list: &[&str]) -> ReportResult<Args> {
        parse_args(list.iter().map(|arg| arg.to_string()))
    }

    #[test]
    fn test_products_only() {
        let parsed = args(&["products.json"]).unwrap();
        assert_eq!(parsed.products, PathBuf::from("products.json"));
        assert_eq!(parsed.draft, None);
        assert_eq!(parsed.edit, None);
    }

    #[test]
    fn test_draft_and_options() {
        let parsed = args(&["-s", "mouse", "products.json", "draft.json", "--edit", "7"]).unwrap();
        assert_eq!(parsed.draft, Some(PathBuf::from("draft.json")));
        assert_eq!(parsed.edit, Some(7));
        assert_eq!(parsed.search.as_deref(), Some("mouse"));
    }

    #[test]
    fn test_help_needs_no_paths() {
        assert!(args(&["--help"]).unwrap().help);
    }

    #[test]
    fn test_usage_errors() {
        assert!(matches!(args(&[]), Err(ReportError::Usage(_))));
        assert!(matches!(args(&["a.json", "b.json", "c.json"]), Err(ReportError::Usage(_))));
        assert!(matches!(args(&["a.json", "--edit"]), Err(ReportError::Usage(_))));
        assert!(matches!(args(&["a.json", "--edit", "seven"]), Err(ReportError::Usage(_))));
        assert!(matches!(args(&["a.json", "--verbose"]), Err(ReportError::Usage(_))));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let result: ReportResult<Vec<ProductRecord>> =
            read_json(Path::new("/nonexistent/stockroom/products.json"));
        assert!(matches!(result, Err(ReportError::Read { .. })));
    }

    #[test]
    fn test_run_products_only() {
        let products = json_file(PRODUCTS);
        assert!(run_with(&products, None).is_ok());
    }

    #[test]
    fn test_run_accepts_valid_draft() {
        let products = json_file(PRODUCTS);
        let draft = json_file(
            r#"{"name": "Keyboard", "sku": "345-678-90", "category": "Electronics",
                "stock": "10", "price": "49.99", "description": ""}"#,
        );
        assert!(run_with(&products, Some(&draft)).is_ok());
    }

    #[test]
    fn test_run_rejects_invalid_draft() {
        let products = json_file(PRODUCTS);
        let draft = json_file(
            r#"{"name": "Copy", "sku": "123-456-78", "category": "Electronics",
                "stock": "-1", "price": "5"}"#,
        );

        let Err(ReportError::InvalidDraft(errors)) = run_with(&products, Some(&draft)) else {
            panic!("expected the draft to be rejected");
        };
        assert!(errors.get(Field::Sku).is_some());
        assert!(errors.get(Field::Stock).is_some());
    }

    #[test]
    fn test_run_malformed_products_is_parse_error() {
        let products = json_file(r#"[{"id": 1, "name": "#);
        assert!(matches!(run_with(&products, None), Err(ReportError::Parse { .. })));
    }

    #[test]
    fn test_run_malformed_draft_is_parse_error() {
        let products = json_file(PRODUCTS);
        let draft = json_file("not json");
        let result = run_with(&products, Some(&draft));
        assert!(
            matches!(result, Err(ReportError::Parse { ref path, .. }) if path == draft.path())
        );
    }

    #[test]
    fn test_exit_status() {
        assert_eq!(exit_status(&args(&[]).unwrap_err()), 2);

        let products = json_file(PRODUCTS);
        let draft = json_file(r#"{"name": ""}"#);
        let rejected = run_with(&products, Some(&draft)).unwrap_err();
        assert!(matches!(rejected, ReportError::InvalidDraft(_)));
        assert_eq!(exit_status(&rejected), 1);

        let broken = json_file("{");
        assert_eq!(exit_status(&run_with(&broken, None).unwrap_err()), 1);
    }
}
