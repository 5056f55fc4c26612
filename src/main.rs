//! CLI entry point for blog-content

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blog_content::{commands, Site};

#[derive(Parser)]
#[command(name = "blog-content")]
#[command(version)]
#[command(about = "Ingest, list and route the posts of a personal blog", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
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
    /// List published posts, one page at a time
    #[command(alias = "ls")]
    List {
        /// Page number (1-indexed)
        #[arg(short, long)]
        page: Option<String>,

        /// Only posts with this tag
        #[arg(short, long)]
        tag: Option<String>,
    },

    /// Show the latest posts, as on the home page
    Latest,

    /// List tags with post counts
    Tags,

    /// Print the static routes
    Routes,

    /// Show a single post
    Show {
        /// Route segments, e.g. `blog hello` or `blog/hello`
        #[arg(required = true)]
        slug: Vec<String>,

        /// Render the body to HTML
        #[arg(long)]
        html: bool,
    },

    /// Write the content manifest
    #[command(alias = "b")]
    Build {
        /// Rebuild on content changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Create as an unpublished draft
        #[arg(long)]
        draft: bool,
    },

    /// Remove the generated manifest
    Clean,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "blog_content=debug,info"
    } else {
        "blog_content=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let site = Site::new(&base_dir)?;

    match cli.command {
        Commands::List { page, tag } => {
            commands::list::posts(&site, page.as_deref(), tag.as_deref())?;
        }

        Commands::Latest => commands::list::latest(&site)?,

        Commands::Tags => commands::list::tags(&site)?,

        Commands::Routes => commands::routes::run(&site)?,

        Commands::Show { slug, html } => commands::show::run(&site, &slug, html)?,

        Commands::Build { watch } => {
            tracing::info!("Building content manifest...");
            site.build()?;
            println!("Built successfully!");

            if watch {
                commands::build::watch(&base_dir)?;
            }
        }

        Commands::New { title, draft } => {
            let path = site.new_post(&title, draft)?;
            println!("Created: {:?}", path);
        }

        Commands::Clean => {
            tracing::info!("Cleaning output folder...");
            site.clean()?;
            println!("Cleaned successfully!");
        }
    }

    Ok(())
}
