//! CLI entry point for blogstore

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blogstore::content::Layout;

#[derive(Parser)]
#[command(name = "blogstore")]
#[command(version)]
#[command(about = "Read, validate and query a Markdown blog content tree", long_about = None)]
struct Cli {
    /// Set the site directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List site content
    #[command(alias = "ls")]
    List {
        /// Type of content to list (documents, posts, categories, tags)
        #[arg(default_value = "documents")]
        r#type: String,
    },

    /// Show metadata and outline of one document
    Show {
        /// Path relative to the source directory
        path: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Validate every document
    Check,

    /// Create a new post or simple page
    New {
        /// Layout to use (post, simple)
        #[arg(short, long, default_value = "post")]
        layout: Layout,

        /// Category, may be repeated
        #[arg(short = 'C', long = "category")]
        categories: Vec<String>,

        /// Title of the new document
        title: String,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "blogstore=debug,info"
    } else {
        "blogstore=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::List { r#type } => {
            let site = blogstore::Site::new(&base_dir)?;
            blogstore::commands::list::run(&site, &r#type)?;
        }

        Commands::Show { path, json } => {
            let site = blogstore::Site::new(&base_dir)?;
            blogstore::commands::show::run(&site, &path, json)?;
        }

        Commands::Check => {
            let site = blogstore::Site::new(&base_dir)?;
            tracing::info!("Checking documents in {:?}", site.source_dir);
            blogstore::commands::check::run(&site)?;
        }

        Commands::New {
            layout,
            categories,
            title,
        } => {
            let site = blogstore::Site::new(&base_dir)?;
            tracing::info!("Creating new {} with title: {}", layout, title);
            let path = blogstore::commands::new::run(&site, &title, layout, &categories)?;
            println!("Created: {:?}", path);
        }

        Commands::Version => {
            println!("blogstore version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
