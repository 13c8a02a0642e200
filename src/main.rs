//! CLI entry point for folio-rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_rs::content::PostField;
use folio_rs::{commands, server, Folio};

#[derive(Parser)]
#[command(name = "folio-rs")]
#[command(version)]
#[command(about = "A static generator for a portfolio and markdown blog", long_about = None)]
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
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Slug for the new post (defaults to the slugified title)
        #[arg(short, long)]
        slug: Option<String>,

        /// Create the post inactive
        #[arg(long)]
        draft: bool,
    },

    /// Generate static files
    #[command(alias = "g")]
    Generate {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Start a local server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,

        /// Enable static mode (no file watching)
        #[arg(long)]
        r#static: bool,
    },

    /// Print the rendered HTML of one post
    Render {
        /// Post slug, with or without the .md extension
        slug: String,
    },

    /// List site information
    List {
        /// What to list (posts, routes)
        #[arg(default_value = "posts")]
        r#type: String,

        /// Include inactive posts
        #[arg(short, long)]
        all: bool,

        /// Print JSON
        #[arg(long)]
        json: bool,

        /// Only these post fields, comma separated (slug, title, description, image, content, active, date)
        #[arg(short, long, value_delimiter = ',')]
        fields: Vec<PostField>,
    },

    /// Remove the public folder
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        "folio_rs=debug,info"
    } else {
        "folio_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::New { title, slug, draft } => {
            let folio = Folio::new(&base_dir)?;
            let path = folio.new_post(&title, slug.as_deref(), draft)?;
            println!("Created: {:?}", path);
        }

        Commands::Generate { watch } => {
            let folio = Folio::new(&base_dir)?;
            tracing::info!("Generating static files...");

            let result = folio.generate();
            if watch {
                if let Err(e) = result {
                    tracing::error!("Generation failed: {:#}", e);
                }
                commands::generate::watch(&folio).await?;
            } else {
                result?;
                println!("Generated successfully!");
            }
        }

        Commands::Server {
            port,
            ip,
            open,
            r#static,
        } => {
            let folio = Folio::new(&base_dir)?;

            tracing::info!("Generating static files...");
            if let Err(e) = folio.generate() {
                // keep serving; the watcher regenerates on the next edit
                tracing::error!("Generation failed: {:#}", e);
            }

            tracing::info!("Starting server at http://{}:{}", ip, port);
            server::start(&folio, &ip, port, !r#static, open).await?;
        }

        Commands::Render { slug } => {
            let folio = Folio::new(&base_dir)?;
            commands::render::run(&folio, &slug)?;
        }

        Commands::List {
            r#type,
            all,
            json,
            fields,
        } => {
            let folio = Folio::new(&base_dir)?;
            commands::list::run(&folio, &r#type, all, json, &fields)?;
        }

        Commands::Clean => {
            let folio = Folio::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            folio.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("folio-rs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
