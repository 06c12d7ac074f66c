use aggregator::{AggregatorConfig, RecipeAggregator};
use anyhow::{Context, Result};
use browser::{BrowserSession, Intent, Presenter, Rendered, TerminalPresenter};
use catalog_client::{CatalogConfig, CatalogService, HttpCatalogClient, InMemoryCatalog};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

/// Recipe Browser - recipes from around the world
#[derive(Parser)]
#[command(name = "recipe-browser")]
#[command(about = "Browse recipes by cuisine, category and ingredient", long_about = None)]
struct Cli {
    /// Catalog base URL (defaults to RECIPE_CATALOG_URL, then TheMealDB)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Seed for shuffling, for reproducible pages
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Serve recipes from a local JSON file instead of the network
    #[arg(long, global = true)]
    fixture: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// Mixed recipes from several cuisines
    All,

    /// Recipes from one cuisine
    Cuisine {
        /// Cuisine name, e.g. Indian
        name: String,
    },

    /// Recipes in one category
    Category {
        /// Category name, e.g. Seafood
        name: String,
    },

    /// Recipes using an ingredient
    Search {
        /// Ingredient, e.g. chicken
        ingredient: String,
    },

    /// Recipes from one cuisine using an ingredient
    SearchIn {
        /// Cuisine name, e.g. Indian
        cuisine: String,

        /// Ingredient, e.g. chicken
        ingredient: String,
    },

    /// One random recipe
    Random,

    /// Full details for one recipe
    Show {
        /// Recipe id, e.g. 52772
        id: String,
    },

    /// Interactive session reading commands from stdin
    Browse,
}

impl Commands {
    /// The intent a one-shot command maps to; `None` for `browse`.
    fn into_intent(self) -> Option<Intent> {
        match self {
            Commands::All => Some(Intent::LoadAll),
            Commands::Cuisine { name } => Some(Intent::PickCuisine(name)),
            Commands::Category { name } => Some(Intent::PickCategory(name)),
            Commands::Search { ingredient } => Some(Intent::SearchIngredient(ingredient)),
            Commands::SearchIn {
                cuisine,
                ingredient,
            } => Some(Intent::SearchCuisineIngredient {
                origin: cuisine,
                term: ingredient,
            }),
            Commands::Random => Some(Intent::PickRandom),
            Commands::Show { id } => Some(Intent::SelectRecipe(id)),
            Commands::Browse => None,
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let catalog = build_catalog(&cli)?;
    let mut config = AggregatorConfig::default();
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    let aggregator = RecipeAggregator::with_config(catalog, config);
    let mut session = BrowserSession::new(aggregator, TerminalPresenter::stdout());

    match cli.command.into_intent() {
        Some(intent) => match session.dispatch(intent).await {
            Rendered::Error => Ok(ExitCode::FAILURE),
            _ => Ok(ExitCode::SUCCESS),
        },
        None => {
            handle_browse(&mut session).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Pick the catalog backend: a local fixture when given, otherwise HTTP
fn build_catalog(cli: &Cli) -> Result<Arc<dyn CatalogService>> {
    if let Some(path) = &cli.fixture {
        let catalog = InMemoryCatalog::load_fixture(path)
            .with_context(|| format!("Failed to load fixture {}", path.display()))?;
        info!("Serving {} recipes from {}", catalog.len(), path.display());
        return Ok(Arc::new(catalog));
    }

    let mut config = CatalogConfig::from_env();
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url.clone());
    }
    if let Some(timeout_secs) = cli.timeout_secs {
        config = config.with_timeout_secs(timeout_secs);
    }

    let client = HttpCatalogClient::new(config).context("Failed to create catalog client")?;
    info!("Using catalog at {}", client.base_url());
    Ok(Arc::new(client))
}

/// Handle the 'browse' command
///
/// Shows the landing page, then runs one intent per input line until EOF
/// or `quit`. Lines are handled one at a time, so the screen always shows
/// the answer to the latest command.
async fn handle_browse<P: Presenter>(session: &mut BrowserSession<P>) -> Result<()> {
    print_help();
    session.dispatch(Intent::LoadAll).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", ">".green().bold());
        std::io::stdout().flush().context("Failed to flush stdout")?;

        let Some(line) = lines.next_line().await.context("Failed to read stdin")? else {
            break;
        };

        match line.trim() {
            "" => continue,
            "quit" | "exit" => break,
            "help" => print_help(),
            command => match command.parse::<Intent>() {
                Ok(intent) => {
                    session.dispatch(intent).await;
                }
                Err(e) => println!("{} {} (type {} for commands)", "✗".red(), e, "help".green()),
            },
        }
    }

    Ok(())
}

fn print_help() {
    println!("{}", "Recipe Browser commands:".bold().blue());
    println!("  all                         mixed recipes from around the world");
    println!("  cuisine <name>              e.g. cuisine Indian");
    println!("  category <name>             e.g. category Seafood");
    println!("  search <ingredient>         e.g. search chicken");
    println!("  search-in <cuisine> <term>  e.g. search-in Indian chicken");
    println!("  random                      one random recipe");
    println!("  show <id>                   full recipe, e.g. show 52772");
    println!("  help | quit");
}
