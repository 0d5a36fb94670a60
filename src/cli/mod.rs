//! Command-line interface for shelf.
//!
//! Without a subcommand the interactive shell is started. The subcommands
//! run a single catalog operation and exit.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;

use crate::config::ResolvedConfig;
use crate::domain::BookStatus;
use crate::library::Catalog;

pub mod input;
pub mod messages;
pub mod shell;

pub use shell::Shell;

/// shelf - personal library catalog
#[derive(Parser, Debug)]
#[command(name = "shelf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Library data file (overrides the config file)
    #[arg(long, global = true, env = "SHELF_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the interactive menu (default)
    Shell,

    /// Show all books
    List,

    /// Add a book
    Add {
        /// Book title
        #[arg(short, long)]
        title: String,

        /// Book author
        #[arg(short, long)]
        author: String,

        /// Publication year (up to 4 digits)
        #[arg(short, long, value_parser = input::parse_year)]
        year: i32,
    },

    /// Remove a book by ID
    Remove {
        /// Book ID
        id: u64,
    },

    /// Search books by title, author or year
    Search {
        /// Keyword (case-insensitive)
        keyword: String,
    },

    /// Change the loan status of a book
    Status {
        /// Book ID
        id: u64,

        /// New status (prompted if omitted)
        #[arg(value_enum)]
        status: Option<StatusArg>,
    },

    /// Show resolved configuration (debug)
    Config,
}

/// Book status for CLI (maps to BookStatus)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    /// On the shelf
    Available,

    /// Lent out
    Loaned,
}

impl From<StatusArg> for BookStatus {
    fn from(s: StatusArg) -> Self {
        match s {
            StatusArg::Available => BookStatus::Available,
            StatusArg::Loaned => BookStatus::Loaned,
        }
    }
}

impl Cli {
    /// Data file after applying the flag/env override
    pub fn data_file(&self, config: &ResolvedConfig) -> PathBuf {
        self.data_file
            .clone()
            .unwrap_or_else(|| config.data_file.clone())
    }

    /// Execute the CLI command
    pub async fn execute(self, config: &ResolvedConfig) -> Result<()> {
        let data_file = self.data_file(config);
        debug!(data_file = %data_file.display(), "Resolved data file");

        match self.command.unwrap_or(Commands::Shell) {
            Commands::Shell => run_shell(&data_file).await,
            Commands::List => list_books(&data_file).await,
            Commands::Add {
                title,
                author,
                year,
            } => add_book(&data_file, title, author, year).await,
            Commands::Remove { id } => remove_book(&data_file, id).await,
            Commands::Search { keyword } => search_books(&data_file, &keyword).await,
            Commands::Status { id, status } => {
                change_status(&data_file, id, status.map(BookStatus::from)).await
            }
            Commands::Config => show_config(config, &data_file),
        }
    }
}

/// Open the catalog, reporting (not failing on) a corrupted data file
async fn open_catalog(path: &Path) -> Result<Catalog> {
    let (catalog, corruption) = Catalog::open(path)
        .await
        .with_context(|| format!("Failed to open catalog: {}", path.display()))?;

    if let Some(e) = corruption {
        eprintln!("{}", messages::CORRUPTED);
        eprintln!("   {:#}", anyhow::Error::from(e));
    }

    Ok(catalog)
}

/// Run the interactive menu on stdin/stdout
async fn run_shell(path: &Path) -> Result<()> {
    let catalog = open_catalog(path).await?;
    let stdin = io::stdin();
    let stdout = io::stdout();

    let mut shell = Shell::new(catalog, stdin.lock(), stdout.lock());
    shell.run().await
}

/// Show all books
async fn list_books(path: &Path) -> Result<()> {
    let catalog = open_catalog(path).await?;
    println!("{}", catalog.display());
    Ok(())
}

/// Add a book
async fn add_book(path: &Path, title: String, author: String, year: i32) -> Result<()> {
    let mut catalog = open_catalog(path).await?;
    let book = catalog.add(title, author, year).await?;
    println!("{}", messages::added(book));
    Ok(())
}

/// Remove a book
async fn remove_book(path: &Path, id: u64) -> Result<()> {
    let mut catalog = open_catalog(path).await?;

    match catalog.remove(id).await? {
        Some(_) => println!("{}", messages::removed(id)),
        None => println!("{}", messages::not_found(id)),
    }

    Ok(())
}

/// Search books
async fn search_books(path: &Path, keyword: &str) -> Result<()> {
    let catalog = open_catalog(path).await?;
    let results = catalog.search(keyword);

    if results.is_empty() {
        println!("{}", messages::NO_BOOKS_FOUND);
    } else {
        println!("{}", catalog.display_books(Some(results.as_slice())));
    }

    Ok(())
}

/// Change the status of a book, prompting for it if not given
async fn change_status(path: &Path, id: u64, status: Option<BookStatus>) -> Result<()> {
    let mut catalog = open_catalog(path).await?;

    if catalog.find_by_id(id).is_none() {
        println!("{}", messages::not_found(id));
        return Ok(());
    }

    let status = match status {
        Some(status) => status,
        None => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            match input::prompt_status(&mut stdin.lock(), &mut stdout.lock())? {
                Some(status) => status,
                None => anyhow::bail!("No status selected"),
            }
        }
    };

    if let Some(book) = catalog.update_status(id, status).await? {
        println!("{}", messages::status_changed(book));
    }

    Ok(())
}

/// Show the resolved configuration (for debugging)
fn show_config(config: &ResolvedConfig, data_file: &Path) -> Result<()> {
    println!("shelf configuration");
    println!();
    println!(
        "Config file: {}",
        config
            .config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!("Data file:   {}", data_file.display());
    println!("Log level:   {} (RUST_LOG overrides)", config.log_level);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add_command() {
        let cli = Cli::try_parse_from([
            "shelf", "add", "--title", "Dune", "--author", "Herbert", "--year", "1965",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Add {
                title,
                author,
                year,
            }) => {
                assert_eq!(title, "Dune");
                assert_eq!(author, "Herbert");
                assert_eq!(year, 1965);
            }
            other => panic!("Expected add command, got {:?}", other),
        }
    }

    #[test]
    fn test_add_rejects_long_year() {
        let result = Cli::try_parse_from([
            "shelf", "add", "-t", "Dune", "-a", "Herbert", "-y", "19650",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_status_command() {
        let cli = Cli::try_parse_from(["shelf", "status", "3", "loaned"]).unwrap();

        match cli.command {
            Some(Commands::Status { id, status }) => {
                assert_eq!(id, 3);
                assert_eq!(status.map(BookStatus::from), Some(BookStatus::Loaned));
            }
            other => panic!("Expected status command, got {:?}", other),
        }
    }

    #[test]
    fn test_data_file_flag_overrides_config() {
        let config = ResolvedConfig::default();

        let cli = Cli::try_parse_from(["shelf", "--data-file", "/tmp/books.json", "list"]).unwrap();
        assert_eq!(cli.data_file(&config), PathBuf::from("/tmp/books.json"));
    }

    #[test]
    fn test_no_subcommand_means_shell() {
        let cli = Cli::try_parse_from(["shelf"]).unwrap();
        assert!(cli.command.is_none());
    }
}
