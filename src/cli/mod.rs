use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Settings;

pub mod commands;

use commands::{auth, browse, categories, favorites, show};

#[derive(Parser)]
#[command(name = "audioshelf")]
#[command(about = "Browse an audiobook catalog from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all categories
    Categories,
    /// Browse the catalog, optionally within one category
    Browse {
        /// Category id to browse; omit for the whole catalog
        #[arg(short, long)]
        category: Option<i32>,
        /// How many pages to load before stopping
        #[arg(short, long, default_value_t = 1)]
        pages: u32,
    },
    /// Search audiobooks by title, description, or author
    Search {
        query: String,
        /// How many pages of results to load
        #[arg(short, long, default_value_t = 1)]
        pages: u32,
    },
    /// Show details for one audiobook
    Show { id: i32 },
    /// A few random picks from the catalog
    Random {
        /// How many picks; defaults to the configured featured count
        #[arg(short, long)]
        number: Option<u32>,
    },
    /// Total number of audiobooks in the catalog
    Count,
    /// Manage favorites (needs AUDIOSHELF_EMAIL / AUDIOSHELF_PASSWORD)
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
    /// Verify credentials against the auth endpoints
    Login {
        email: String,
        /// Password; falls back to AUDIOSHELF_PASSWORD
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Create an account
    Register {
        email: String,
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Show the user the configured credentials belong to
    Whoami,
}

#[derive(Subcommand)]
pub enum FavoritesAction {
    /// List favorited audiobooks
    List {
        #[arg(short, long, default_value_t = 1)]
        pages: u32,
    },
    /// Add an audiobook to favorites
    Add { id: i32 },
    /// Remove an audiobook from favorites
    Remove { id: i32 },
    /// Flip favorite membership
    Toggle { id: i32 },
    /// Check whether an audiobook is favorited
    Check { id: i32 },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let settings = Settings::load()?;
        match self.command {
            Commands::Categories => categories::list(&settings).await?,
            Commands::Browse { category, pages } => {
                browse::browse(&settings, category, pages).await?
            }
            Commands::Search { query, pages } => browse::search(&settings, &query, pages).await?,
            Commands::Show { id } => show::show(&settings, id).await?,
            Commands::Random { number } => {
                show::random(&settings, number.unwrap_or(settings.featured)).await?
            }
            Commands::Count => show::count(&settings).await?,
            Commands::Favorites { action } => favorites::run(&settings, action).await?,
            Commands::Login { email, password } => {
                auth::login(&settings, &email, password.as_deref()).await?
            }
            Commands::Register { email, password } => {
                auth::register(&settings, &email, password.as_deref()).await?
            }
            Commands::Whoami => auth::whoami(&settings).await?,
        }
        Ok(())
    }
}
