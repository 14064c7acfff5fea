use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::warn;
use pdf_attendees::{
    DEFAULT_EXCLUDED_ORGANIZATIONS, DocumentKind, DocumentOptions, DuplexMode, Session,
    TemplateOptions,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pdft", about = "Attendee PDF tools", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate flashcard PDFs from an attendee CSV
    Flashcards {
        #[command(flatten)]
        source: SourceArgs,

        /// Directory the PDFs are written to
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Documents to produce
        #[arg(
            long,
            value_enum,
            value_delimiter = ',',
            default_value = "combined,guides"
        )]
        outputs: Vec<OutputArg>,

        #[command(flatten)]
        shared: SharedArgs,
    },

    /// Generate a facebook proof: five attendees per page
    Facebook {
        #[command(flatten)]
        source: SourceArgs,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        shared: SharedArgs,
    },

    /// Generate table tents: two per page
    Tents {
        #[command(flatten)]
        source: SourceArgs,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,

        /// Leave headshots off the tents
        #[arg(long)]
        no_images: bool,

        #[command(flatten)]
        shared: SharedArgs,
    },

    /// Overlay attendee names on a template image or PDF
    Template {
        #[command(flatten)]
        source: SourceArgs,

        /// Background image (png, jpg, gif, webp, bmp) or PDF
        #[arg(short, long)]
        background: Option<PathBuf>,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        shared: SharedArgs,
    },
}

#[derive(Args)]
struct SourceArgs {
    /// Attendee CSV (first name, last name, organization, title)
    #[arg(short, long)]
    input: PathBuf,

    /// Directory of headshots named First_Last.ext
    #[arg(long, default_value = "headshots")]
    headshots: PathBuf,
}

#[derive(Args)]
struct SharedArgs {
    /// How the printer flips sheets for the back side
    #[arg(long, value_enum)]
    duplex_mode: Option<DuplexArg>,

    /// Render at most this many attendees
    #[arg(long)]
    limit: Option<usize>,

    /// Leave out attendees from this organization (repeatable)
    #[arg(long = "exclude-org")]
    exclude_orgs: Vec<String>,

    /// Also leave out the built-in list of excluded organizations
    #[arg(long)]
    exclude_default_orgs: bool,

    /// JSON options file; flags given on the command line take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Show statistics only, don't generate PDFs
    #[arg(long)]
    stats_only: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum DuplexArg {
    ShortEdge,
    LongEdge,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputArg {
    Fronts,
    Backs,
    Combined,
    Guides,
    Facebook,
}

impl From<DuplexArg> for DuplexMode {
    fn from(arg: DuplexArg) -> Self {
        match arg {
            DuplexArg::ShortEdge => Self::ShortEdge,
            DuplexArg::LongEdge => Self::LongEdge,
        }
    }
}

impl OutputArg {
    fn kind(self) -> DocumentKind {
        match self {
            OutputArg::Fronts => DocumentKind::Fronts,
            OutputArg::Backs => DocumentKind::Backs,
            OutputArg::Combined => DocumentKind::Combined,
            OutputArg::Guides => DocumentKind::Guides,
            OutputArg::Facebook => DocumentKind::Facebook,
        }
    }

    fn file_name(self) -> &'static str {
        match self {
            OutputArg::Fronts => "flashcards_fronts.pdf",
            OutputArg::Backs => "flashcards_backs.pdf",
            OutputArg::Combined => "flashcards_combined.pdf",
            OutputArg::Guides => "flashcards_guides.pdf",
            OutputArg::Facebook => "facebook_proof.pdf",
        }
    }
}

/// Drop repeated outputs, keeping the first occurrence of each
fn unique_outputs(outputs: Vec<OutputArg>) -> Vec<OutputArg> {
    let mut unique = Vec::with_capacity(outputs.len());
    for output in outputs {
        if !unique.contains(&output) {
            unique.push(output);
        }
    }
    unique
}

impl SharedArgs {
    /// Options from `--config` (or defaults) with command line overrides applied
    async fn options(&self) -> Result<DocumentOptions> {
        let mut options = match &self.config {
            Some(path) => DocumentOptions::load(path)
                .await
                .with_context(|| format!("Failed to load options from {}", path.display()))?,
            None => DocumentOptions::default(),
        };

        if let Some(mode) = self.duplex_mode {
            options.duplex_mode = mode.into();
        }
        if self.limit.is_some() {
            options.limit = self.limit;
        }
        options
            .excluded_organizations
            .extend(self.exclude_orgs.iter().cloned());
        if self.exclude_default_orgs {
            options
                .excluded_organizations
                .extend(DEFAULT_EXCLUDED_ORGANIZATIONS.iter().map(|org| org.to_string()));
        }
        Ok(options)
    }
}

async fn load_session(source: &SourceArgs) -> Result<Session> {
    let mut session = Session::new(&source.headshots);
    let added = session
        .load_csv(&source.input)
        .await
        .with_context(|| format!("Failed to read attendees from {}", source.input.display()))?;
    println!("Loaded {} attendees from {}", added, source.input.display());

    let missing = session.missing_headshots();
    if !missing.is_empty() {
        println!("  No headshot found for {} attendee(s):", missing.len());
        for prefix in missing {
            println!("    {}", prefix);
        }
    }
    Ok(session)
}

/// Print statistics, then generate unless `stats_only`
async fn produce(
    session: &Session,
    kind: DocumentKind,
    options: &DocumentOptions,
    output: &Path,
    stats_only: bool,
) -> Result<()> {
    let (records, _) = pdf_attendees::prepare_records(kind, session.records(), options);
    let stats = pdf_attendees::calculate_statistics(kind, records.len(), options)?;
    println!("{} statistics:", kind.name());
    println!("  Attendees: {}", stats.records);
    println!("  Per page: {}", stats.items_per_page);
    println!("  Output pages: {}", stats.output_pages);
    println!("  On last page: {}", stats.items_on_last_page);

    if stats_only {
        return Ok(());
    }

    let report = session.generate(kind, options, output).await?;
    println!(
        "{}: {} pages, {} attendees → {}",
        kind.name(),
        report.page_count,
        report.record_count,
        report.output_path.display()
    );
    for path in &report.skipped_images {
        warn!("Skipped unreadable headshot {}", path.display());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Flashcards {
            source,
            output_dir,
            outputs,
            shared,
        } => {
            let options = shared.options().await?;
            let session = load_session(&source).await?;

            let outputs = unique_outputs(outputs);
            if !shared.stats_only {
                tokio::fs::create_dir_all(&output_dir).await?;
            }
            for output in outputs {
                let path = output_dir.join(output.file_name());
                produce(&session, output.kind(), &options, &path, shared.stats_only).await?;
            }
        }

        Commands::Facebook {
            source,
            output,
            shared,
        } => {
            let options = shared.options().await?;
            let session = load_session(&source).await?;
            produce(&session, DocumentKind::Facebook, &options, &output, shared.stats_only).await?;
        }

        Commands::Tents {
            source,
            output,
            no_images,
            shared,
        } => {
            let mut options = shared.options().await?;
            if no_images {
                options.include_images = false;
            }
            let session = load_session(&source).await?;
            produce(&session, DocumentKind::TableTents, &options, &output, shared.stats_only).await?;
        }

        Commands::Template {
            source,
            background,
            output,
            shared,
        } => {
            let mut options = shared.options().await?;
            if let Some(background) = background {
                let template = options
                    .template
                    .get_or_insert_with(|| TemplateOptions::new(&background));
                template.background = background;
            }
            if options.template.is_none() {
                anyhow::bail!("A template needs --background or a config with template options");
            }
            let session = load_session(&source).await?;
            produce(&session, DocumentKind::Template, &options, &output, shared.stats_only).await?;
        }
    }

    Ok(())
}
