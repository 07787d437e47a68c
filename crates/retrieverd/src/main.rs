//! CLI for fetching, summarizing, and downloading arXiv papers.

use std::path::{Path, PathBuf};

use clap::{builder::ArgAction, Parser, Subcommand};
use console::{style, Emoji};
use errors::RetrieverdError;
use retriever::{
  client::ArxivClient,
  download,
  paper::Paper,
  query::AuthorLogic,
  summarize::{self, AnthropicClient},
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub mod errors;

static LOOKING_GLASS: Emoji<'_, '_> = Emoji("🔍 ", "");
static PAPER: Emoji<'_, '_> = Emoji("📄 ", "");
static SAVE: Emoji<'_, '_> = Emoji("💾 ", "");
static WARNING: Emoji<'_, '_> = Emoji("⚠️  ", "");
static SUCCESS: Emoji<'_, '_> = Emoji("✨ ", "");

#[derive(Parser)]
#[command(author, version, about = "CLI for retrieving and summarizing arXiv papers")]
struct Cli {
  /// Verbose mode (-v, -vv, -vvv)
  #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase logging verbosity"
    )]
  verbose: u8,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Fetch the newest papers from arXiv categories
  Fetch {
    /// arXiv categories to fetch papers from
    #[arg(required = true)]
    categories: Vec<String>,

    /// Maximum number of papers to fetch
    #[arg(long, default_value_t = 10)]
    limit: usize,

    /// Author(s) to refine paper fetching by
    #[arg(long)]
    authors: Vec<String>,

    /// How multiple author filters combine (AND | OR)
    #[arg(long, default_value = "AND")]
    author_logic: String,

    /// Download retrieved papers
    #[arg(long)]
    download: bool,

    /// Directory to download retrieved papers into
    #[arg(long, default_value = "./arxiv_downloads")]
    download_dir: PathBuf,

    /// Summarize abstracts without asking first
    #[arg(long)]
    summarize: bool,

    /// Skip interactive prompts, taking the default answer
    #[arg(long)]
    accept_defaults: bool,
  },
  /// Search for papers on arXiv by title
  Search {
    /// Title to search for
    title: String,

    /// Maximum number of papers to return
    #[arg(long, default_value_t = 10)]
    limit: usize,

    /// Author(s) to refine the title search by
    #[arg(long)]
    authors: Vec<String>,

    /// How multiple author filters combine (AND | OR)
    #[arg(long, default_value = "AND")]
    author_logic: String,

    /// Download retrieved papers
    #[arg(long)]
    download: bool,

    /// Directory to download retrieved papers into
    #[arg(long, default_value = "./arxiv_downloads")]
    download_dir: PathBuf,

    /// Summarize abstracts without asking first
    #[arg(long)]
    summarize: bool,

    /// Skip interactive prompts, taking the default answer
    #[arg(long)]
    accept_defaults: bool,
  },
  /// Download papers from arXiv links (PDF or abstract links)
  Download {
    /// arXiv links to download from
    #[arg(required = true)]
    links: Vec<String>,

    /// Directory to download papers into
    #[arg(long, default_value = "./arxiv_downloads")]
    download_dir: PathBuf,
  },
}

/// Setup logging with the specified verbosity level
fn setup_logging(verbosity: u8) {
  let filter = match verbosity {
    0 => "warn",
    1 => "info",
    2 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() {
  let cli = Cli::parse();
  setup_logging(cli.verbose);

  if let Err(e) = run(cli.command).await {
    eprintln!("{} An error occurred: {}", style(WARNING).red(), style(e).red());
    std::process::exit(1);
  }
}

/// Dispatches one subcommand. Retrieval failures propagate out of here;
/// downstream phase failures are reported inline and leave the exit status
/// untouched.
async fn run(command: Commands) -> Result<(), RetrieverdError> {
  match command {
    Commands::Fetch {
      categories,
      limit,
      authors,
      author_logic,
      download,
      download_dir,
      summarize,
      accept_defaults,
    } => {
      println!(
        "{} Fetching up to {} papers from categories: {}",
        style(LOOKING_GLASS).cyan(),
        style(limit).yellow(),
        style(categories.join(", ")).yellow()
      );

      let logic = AuthorLogic::parse_or_default(&author_logic);
      let papers = ArxivClient::new().fetch_papers(&categories, limit, &authors, logic).await?;
      debug!("fetched {} papers", papers.len());

      present_papers(&papers);
      summarize_phase(&papers, summarize, accept_defaults).await?;
      download_phase(&papers, download, &download_dir).await?;
      Ok(())
    },

    Commands::Search {
      title,
      limit,
      authors,
      author_logic,
      download,
      download_dir,
      summarize,
      accept_defaults,
    } => {
      println!(
        "{} Searching for papers matching: {}",
        style(LOOKING_GLASS).cyan(),
        style(&title).yellow()
      );

      let logic = AuthorLogic::parse_or_default(&author_logic);
      let papers = ArxivClient::new().search_by_title(&title, limit, &authors, logic).await?;
      debug!("found {} papers", papers.len());

      present_papers(&papers);
      summarize_phase(&papers, summarize, accept_defaults).await?;
      download_phase(&papers, download, &download_dir).await?;
      Ok(())
    },

    Commands::Download { links, download_dir } => {
      println!(
        "{} Downloading {} papers to {}",
        style(SAVE).cyan(),
        style(links.len()).yellow(),
        style(download_dir.display()).yellow()
      );

      let saved = download::download_from_links(&links, &download_dir).await?;
      report_downloads(saved.len(), links.len(), &download_dir);
      Ok(())
    },
  }
}

/// Prints the numbered metadata listing for a retrieved paper list.
fn present_papers(papers: &[Paper]) {
  if papers.is_empty() {
    println!("{} No papers found", style(WARNING).yellow());
    return;
  }

  println!("\n{} Retrieved {} papers:", style(SUCCESS).green(), style(papers.len()).yellow());
  for (i, paper) in papers.iter().enumerate() {
    println!("\n{}. {}", style(i + 1).yellow(), style(&paper.title).white().bold());

    let author_display = if paper.authors.is_empty() {
      style("No authors listed").red().italic().to_string()
    } else {
      style(paper.authors.join(", ")).white().to_string()
    };
    println!("    {} {}", style("Authors:").green(), author_display);
    println!("    {} {}", style("Published:").green(), style(&paper.published).white());
    println!(
      "    {} {}",
      style("Link to Abstract:").green(),
      style(&paper.abstract_link).blue().underlined()
    );
    if let Some(pdf_link) = &paper.pdf_link {
      println!("    {} {}", style("Link to PDF:").green(), style(pdf_link).blue().underlined());
    }

    if !paper.summary.is_empty() {
      let preview = paper.summary.chars().take(100).collect::<String>();
      let preview =
        if paper.summary.chars().count() > 100 { format!("{}...", preview) } else { preview };
      println!("    {} {}", style("Summary:").green(), style(preview).white().italic());
    }
  }
}

/// The optional summarization step of the fetched → summarized? → downloaded?
/// workflow. `--summarize` answers yes up front, `--accept-defaults` answers
/// no; otherwise the user is asked. Summarizer failures are reported and do
/// not fail the command.
async fn summarize_phase(
  papers: &[Paper],
  summarize: bool,
  accept_defaults: bool,
) -> Result<(), RetrieverdError> {
  if papers.is_empty() {
    return Ok(());
  }

  let confirmed = if summarize {
    true
  } else if accept_defaults {
    false
  } else {
    dialoguer::Confirm::new()
      .with_prompt("\nWould you like to extract essential information from these papers?")
      .default(false)
      .interact()?
  };
  if !confirmed {
    return Ok(());
  }

  let model = match AnthropicClient::from_env() {
    Ok(model) => model,
    Err(e) => {
      println!("{} Cannot summarize: {}", style(WARNING).yellow(), style(e).yellow());
      return Ok(());
    },
  };

  println!("{} Extracting essential information...", style(LOOKING_GLASS).cyan());
  for summary in summarize::summarize_papers(&model, papers).await {
    println!("\n{} {}", style(PAPER).green(), style(&summary.title).white().bold());
    match summary.extracted {
      Ok(text) => println!("{}", style(text).white()),
      Err(e) => println!("{} {}", style(WARNING).yellow(), style(e).yellow()),
    }
  }
  Ok(())
}

/// The optional download step; runs when `--download` was passed.
async fn download_phase(
  papers: &[Paper],
  download: bool,
  download_dir: &Path,
) -> Result<(), RetrieverdError> {
  if !download || papers.is_empty() {
    return Ok(());
  }
  let saved = download::download_papers(papers, download_dir).await?;
  report_downloads(saved.len(), papers.len(), download_dir);
  Ok(())
}

/// Prints the outcome of a download batch, flagging partial failures.
fn report_downloads(saved: usize, attempted: usize, dir: &Path) {
  if saved == attempted {
    println!(
      "{} Download complete. Papers saved to {}",
      style(SAVE).green(),
      style(dir.display()).yellow()
    );
  } else {
    println!(
      "{} Saved {} of {} papers to {}",
      style(WARNING).yellow(),
      style(saved).yellow(),
      style(attempted).yellow(),
      style(dir.display()).yellow()
    );
  }
}
