use anyhow::{Context, Result};
use catalog::{FilterMode, OrderedCatalog, TraversalOrder};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use data_loader::{DataIndex, Entry, Genre, Popularity, Runtime};
use pipeline::{
    FilterCriteria, FilterOutcome, FilterPipeline, FilterStage, pick_from_catalog, pick_from_index,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use std::hint::black_box;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::info;

/// Film Finder - more time watching, less time searching
#[derive(Parser)]
#[command(name = "film-finder")]
#[command(about = "Browse a movie catalog by genre, runtime and popularity", long_about = None)]
struct Cli {
    /// Path to the comma-delimited movie metadata file
    #[arg(short, long, default_value = "movies_metadata.csv", global = true)]
    data_file: PathBuf,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find movies using genre, runtime and popularity filters
    Find {
        /// Genre menu number (1-21) or genre name
        #[arg(long, value_parser = parse_genre)]
        genre: Genre,

        /// Longest acceptable runtime in minutes
        #[arg(long, allow_negative_numbers = true)]
        max_runtime: Runtime,

        /// Minimum popularity score (5 - 20+; blockbusters sit around 20)
        #[arg(long, allow_negative_numbers = true)]
        min_popularity: Popularity,

        /// Keep scanning past matches that fail the runtime/popularity test
        #[arg(long)]
        exhaustive: bool,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Pick a random movie
    Surprise {
        /// Seed for a reproducible pick
        #[arg(long)]
        seed: Option<u64>,

        /// Pick from this genre's catalog instead of the whole index
        #[arg(long, value_parser = parse_genre)]
        genre: Option<Genre>,

        /// Walk order used to resolve the random rank in a genre catalog
        #[arg(long, value_enum, default_value_t = Order::DepthFirst)]
        order: Order,
    },

    /// Print every movie in the title index
    List {
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the numbered genre menu
    Genres,
}

#[derive(Clone, Copy, ValueEnum)]
enum Order {
    DepthFirst,
    BreadthFirst,
}

impl From<Order> for TraversalOrder {
    fn from(order: Order) -> Self {
        match order {
            Order::DepthFirst => TraversalOrder::DepthFirst,
            Order::BreadthFirst => TraversalOrder::BreadthFirst,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; stdout is reserved for results
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Find {
            genre,
            max_runtime,
            min_popularity,
            exhaustive,
            json,
        } => {
            let data_index = load_index(&cli.data_file)?;
            let criteria = FilterCriteria::new(genre.name(), max_runtime, min_popularity);
            handle_find(&data_index, criteria, exhaustive, json)?
        }
        Commands::Surprise { seed, genre, order } => {
            let data_index = load_index(&cli.data_file)?;
            handle_surprise(&data_index, seed, genre, order.into())
        }
        Commands::List { json } => {
            let data_index = load_index(&cli.data_file)?;
            handle_list(&data_index, json)?
        }
        Commands::Genres => print_genres(),
    }

    Ok(())
}

fn load_index(path: &Path) -> Result<DataIndex> {
    let start = Instant::now();
    let index = DataIndex::load_from_file(path)
        .with_context(|| format!("Failed to load movie metadata from {}", path.display()))?;
    info!("Loaded dataset in {:?}", start.elapsed());
    Ok(index)
}

fn parse_genre(s: &str) -> std::result::Result<Genre, String> {
    s.parse::<Genre>()
        .map_err(|e| format!("{e} (expected 1-21 or a name from `film-finder genres`)"))
}

/// Wall-clock cost of full walks over one or more catalogs
#[derive(Debug, Default, Clone, Copy)]
struct TraversalTimings {
    depth_first: Duration,
    breadth_first: Duration,
    nodes: usize,
}

impl TraversalTimings {
    /// Time a depth-first and a breadth-first walk of each catalog and sum them
    fn measure(catalogs: &[&OrderedCatalog]) -> Self {
        let mut timings = Self::default();
        for catalog in catalogs {
            let start = Instant::now();
            let visited = black_box(catalog.traverse_depth_first());
            timings.depth_first += start.elapsed();

            let start = Instant::now();
            black_box(catalog.traverse_breadth_first());
            timings.breadth_first += start.elapsed();

            timings.nodes += visited;
        }
        timings
    }
}

#[derive(Serialize)]
struct FindReport<'a> {
    stage: FilterStage,
    criteria: &'a FilterCriteria,
    results: &'a [Entry],
    dfs_micros: u128,
    bfs_micros: u128,
}

/// Handle the 'find' command
fn handle_find(
    data_index: &DataIndex,
    criteria: FilterCriteria,
    exhaustive: bool,
    json: bool,
) -> Result<()> {
    let mode = if exhaustive {
        FilterMode::Exhaustive
    } else {
        FilterMode::PruneOnMismatch
    };
    let pipeline = FilterPipeline::new().with_mode(mode);

    let source = FilterPipeline::build_catalog(data_index.entries_for_genre(&criteria.genre));
    let outcome = pipeline.apply(&source, &criteria);

    let timings = TraversalTimings::measure(&[&source, &outcome.filtered]);
    info!(
        "Timed traversals over {} nodes (source height {})",
        timings.nodes,
        source.height()
    );

    if json {
        let report = FindReport {
            stage: outcome.stage,
            criteria: &outcome.criteria,
            results: &outcome.entries,
            dfs_micros: timings.depth_first.as_micros(),
            bfs_micros: timings.breadth_first.as_micros(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_outcome(&outcome);
    println!(
        "\nTotal DFS traversal time: {} microseconds",
        timings.depth_first.as_micros()
    );
    println!(
        "Total BFS traversal time: {} microseconds",
        timings.breadth_first.as_micros()
    );
    Ok(())
}

fn print_outcome(outcome: &FilterOutcome) {
    if outcome.was_relaxed() {
        println!("{}", "No movies found with the specified filters.".yellow());
        println!(
            "Suggesting an alternative movie by relaxing the filters (max runtime {}, min popularity {})...",
            outcome.criteria.max_runtime, outcome.criteria.min_popularity
        );
        if outcome.is_empty() {
            println!("{}", "Still nothing, even with relaxed filters.".red());
        }
    }

    for entry in &outcome.entries {
        println!("{}", entry);
    }
}

/// Handle the 'surprise' command
fn handle_surprise(
    data_index: &DataIndex,
    seed: Option<u64>,
    genre: Option<Genre>,
    order: TraversalOrder,
) {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    match genre {
        Some(genre) => {
            let source = FilterPipeline::build_catalog(data_index.entries_for_genre(genre.name()));
            match pick_from_catalog(&source, order, &mut rng) {
                Some(entry) => print_entry_card(entry),
                None => println!("No {} movies to choose from.", genre),
            }
        }
        None => match pick_from_index(data_index, &mut rng) {
            Some(entry) => print_entry_card(entry),
            None => println!("No movies to choose from."),
        },
    }
}

/// Handle the 'list' command
fn handle_list(data_index: &DataIndex, json: bool) -> Result<()> {
    if json {
        let entries: Vec<&Entry> = data_index.entries().collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for entry in data_index.entries() {
        print_entry_card(entry);
    }
    Ok(())
}

fn print_entry_card(entry: &Entry) {
    println!("{}Title: {}", "• ".green(), entry.title.bold());
    println!("{}Genre: {}", "• ".green(), entry.genre_tag);
    println!("{}Runtime: {}", "• ".cyan(), entry.runtime);
    println!("{}Popularity: {}", "• ".cyan(), entry.popularity);
    println!();
}

fn print_genres() {
    println!("{}", "Genres:".bold().blue());
    for genre in Genre::ALL {
        println!("Enter {} for {}", genre.menu_number().to_string().green(), genre);
    }
}
