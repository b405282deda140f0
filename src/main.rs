//! CLI entry point for blog-rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "blog-rs")]
#[command(version)]
#[command(about = "A personal blog and portfolio server", long_about = None)]
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
    /// Start the blog server
    #[command(alias = "s")]
    Server {
        /// Port to listen on (defaults to `port` in _config.yml)
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// List posts or tags
    List {
        /// Type of content to list (post, tag)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Search posts by title
    Search {
        /// Text the title must contain (case-insensitive)
        query: String,
    },

    /// Print the Markdown body of a post
    Show {
        /// Slug of the post
        slug: String,
    },

    /// Show the theme preference
    Theme {
        /// Switch between light and dark
        #[arg(long)]
        toggle: bool,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "blog_rs=debug,info"
    } else {
        "blog_rs=info"
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

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Server { port, ip } => {
            let blog = blog_rs::Blog::new(&base_dir)?;
            let port = port.unwrap_or(blog.config.port);
            tracing::info!("Starting server at http://{}:{}", ip, port);
            blog_rs::server::start(&blog, &ip, port).await?;
        }

        Commands::List { r#type } => {
            let blog = blog_rs::Blog::new(&base_dir)?;
            blog_rs::commands::list::run(&blog, &r#type, &mut out)?;
        }

        Commands::Search { query } => {
            let blog = blog_rs::Blog::new(&base_dir)?;
            blog_rs::commands::search::run(&blog, &query, &mut out)?;
        }

        Commands::Show { slug } => {
            let blog = blog_rs::Blog::new(&base_dir)?;
            blog_rs::commands::show::run(&blog, &slug, &mut out).await?;
        }

        Commands::Theme { toggle } => {
            let blog = blog_rs::Blog::new(&base_dir)?;
            blog_rs::commands::theme::run(&blog, toggle, &mut out)?;
        }

        Commands::Version => {
            writeln!(out, "blog-rs version {}", env!("CARGO_PKG_VERSION"))?;
        }
    }

    Ok(())
}
