use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::types::{Category, SortOrder};

/// RigForge - assemble a PC build from the parts catalog
#[derive(Parser)]
#[command(name = "rigforge")]
#[command(about = "Pick parts, check compatibility and request a quote")]
#[command(version)]
pub struct Cli {
    /// Configuration file (JSON). Defaults are used when omitted.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the saved build (overrides the configuration)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Catalog file to load instead of the bundled one
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the components of one category
    Catalog {
        category: Category,
        /// Only this brand
        #[arg(short, long)]
        brand: Option<String>,
        /// Lowest price, display currency
        #[arg(long)]
        min_price: Option<u64>,
        /// Highest price, display currency
        #[arg(long)]
        max_price: Option<u64>,
        /// Text to look for in name, brand or specs
        #[arg(short, long)]
        search: Option<String>,
        /// price-asc, price-desc, performance, rating or newest
        #[arg(long, default_value = "none")]
        sort: SortOrder,
        /// List the brands of the category instead of its components
        #[arg(long, conflicts_with_all = ["brand", "min_price", "max_price", "search"])]
        brands: bool,
    },
    /// Show the current build and its summary
    Show,
    /// Put a component into its slot
    Select { category: Category, id: String },
    /// Empty one slot, or every slot with --all
    Clear {
        #[arg(required_unless_present = "all")]
        category: Option<Category>,
        #[arg(long, conflicts_with = "category")]
        all: bool,
    },
    /// List the available presets
    Presets,
    /// Replace the build with a preset
    Preset { name: String },
    /// Write the build to a JSON document
    Export { path: PathBuf },
    /// Load a build from an exported JSON document
    Import { path: PathBuf },
    /// Print a link that reproduces the build
    Share,
    /// Load a build from a share link or token
    OpenShare { token: String },
    /// Compose a quote request for the build
    Quote {
        /// Hand the request to the mail client
        #[arg(long)]
        send: bool,
        /// Where to write the draft if the mail client cannot be opened
        #[arg(long, requires = "send")]
        draft: Option<PathBuf>,
    },
    /// Validate a configuration file
    ConfigCheck {
        /// Path to configuration file to validate
        path: PathBuf,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_no_args() {
        let cli = Cli::try_parse_from(["rigforge"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_catalog_filters() {
        let cli = Cli::try_parse_from([
            "rigforge",
            "catalog",
            "GPU",
            "--brand",
            "AMD",
            "--max-price",
            "90000",
            "--sort",
            "price-desc",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Catalog {
                category,
                brand,
                max_price,
                sort,
                ..
            }) => {
                assert_eq!(category, Category::Gpu);
                assert_eq!(brand.as_deref(), Some("AMD"));
                assert_eq!(max_price, Some(90000));
                assert_eq!(sort, SortOrder::PriceDesc);
            }
            _ => panic!("Expected Catalog command"),
        }
    }

    #[test]
    fn test_cli_catalog_brands_flag() {
        let cli = Cli::try_parse_from(["rigforge", "catalog", "cpu", "--brands"]).unwrap();
        match cli.command {
            Some(Commands::Catalog { brands, .. }) => assert!(brands),
            _ => panic!("Expected Catalog command"),
        }
        assert!(
            Cli::try_parse_from(["rigforge", "catalog", "cpu", "--brands", "--brand", "AMD"])
                .is_err()
        );
    }

    #[test]
    fn test_cli_unknown_category_rejected() {
        assert!(Cli::try_parse_from(["rigforge", "select", "monitor", "lg-27"]).is_err());
    }

    #[test]
    fn test_cli_clear_requires_category_or_all() {
        assert!(Cli::try_parse_from(["rigforge", "clear"]).is_err());
        assert!(Cli::try_parse_from(["rigforge", "clear", "--all"]).is_ok());
        assert!(Cli::try_parse_from(["rigforge", "clear", "cpu", "--all"]).is_err());
    }

    #[test]
    fn test_cli_global_store_after_subcommand() {
        let cli = Cli::try_parse_from(["rigforge", "show", "--store", "/tmp/builds"]).unwrap();
        assert_eq!(cli.store, Some(PathBuf::from("/tmp/builds")));
    }

    #[test]
    fn test_cli_draft_requires_send() {
        assert!(Cli::try_parse_from(["rigforge", "quote", "--draft", "q.txt"]).is_err());
        let cli = Cli::try_parse_from(["rigforge", "quote", "--send", "--draft", "q.txt"]).unwrap();
        match cli.command {
            Some(Commands::Quote { send, draft }) => {
                assert!(send);
                assert_eq!(draft, Some(PathBuf::from("q.txt")));
            }
            _ => panic!("Expected Quote command"),
        }
    }
}
