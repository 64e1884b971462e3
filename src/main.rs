//! CLI entry point for folio

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio::content::ContentKind;
use folio::generator::BuildReport;
use folio::Site;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version = "0.1.0")]
#[command(about = "Front-matter resolver and build tool for Markdown blogs", long_about = None)]
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

    /// Create a new post, draft or page
    New {
        /// Kind of content to create (post, draft, page)
        #[arg(short, long, default_value = "post")]
        layout: String,

        /// Title of the new content
        title: String,
    },

    /// Parse and validate all content without writing anything
    Check {
        /// Exit with an error if any file was skipped or has warnings
        #[arg(long)]
        strict: bool,
    },

    /// Resolve all content into the destination directory
    #[command(alias = "b", alias = "generate", alias = "g")]
    Build {
        /// Exit with an error if any file was skipped or has warnings
        #[arg(long)]
        strict: bool,

        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,

        /// Include files under `_drafts/`
        #[arg(long)]
        drafts: bool,
    },

    /// Clean the destination folder
    Clean,

    /// List site information
    List {
        /// Type of content to list (post, page, tag, category)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio=debug,info"
    } else {
        "folio=info"
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

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            folio::commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::New { layout, title } => {
            let site = Site::new(&base_dir)?;
            let kind = match layout.as_str() {
                "post" => ContentKind::Post,
                "draft" => ContentKind::Draft,
                "page" => ContentKind::Page,
                other => anyhow::bail!("Unknown layout: {}. Available: post, draft, page", other),
            };
            tracing::info!("Creating new {} with title: {}", layout, title);
            let path = site.new_post(&title, kind)?;
            println!("Created {:?}", path);
        }

        Commands::Check { strict } => {
            let site = Site::new(&base_dir)?;
            let report = site.check()?;
            folio::commands::check::print_report(&report);
            enforce(&site, &report, strict)?;
        }

        Commands::Build {
            strict,
            watch,
            drafts,
        } => {
            let mut site = Site::new(&base_dir)?;
            if drafts {
                site.config.show_drafts = true;
            }
            tracing::info!("Building site...");

            let report = site.build()?;
            enforce(&site, &report, strict)?;
            println!("Built {} pages into {:?}", report.emitted, site.destination_dir);

            if watch {
                tracing::info!("Watching for file changes...");
                folio::commands::generate::watch(&site).await?;
            }
        }

        Commands::Clean => {
            let site = Site::new(&base_dir)?;
            tracing::info!("Cleaning destination folder...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type } => {
            let site = Site::new(&base_dir)?;
            folio::commands::list::run(&site, &r#type)?;
        }

        Commands::Version => {
            println!("folio version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

/// In strict mode any problem fails the command
fn enforce(site: &Site, report: &BuildReport, strict: bool) -> Result<()> {
    if (strict || site.config.strict_front_matter) && !report.is_clean() {
        anyhow::bail!("{} problems found ({})", report.problem_count(), report.summary());
    }
    Ok(())
}
