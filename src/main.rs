use clap::{Parser as ClapParser, Subcommand};
use cql_template::ParserOptions;
use cql_template::cli::{
    self, BindOptions, CheckOptions, CliError, CountOptions, TreeOptions,
};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "cqlt")]
#[command(about = "cqlt - Parse Cassandra-style queries and fill their placeholders")]
#[command(version)]
struct Cli {
    /// Log parser and rewrite decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Maximum nesting depth accepted by the parser
    #[arg(long, global = true, default_value_t = ParserOptions::default().max_depth)]
    max_depth: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a statement
    Check {
        /// The statement (reads from stdin if not provided)
        query: Option<String>,
    },

    /// Print the parse tree as JSON
    Tree {
        /// The statement (reads from stdin if not provided)
        query: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Count the nodes of a category
    Count {
        /// Category name, e.g. placeholder-inject
        category: String,

        /// The statement (reads from stdin if not provided)
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Bind values to the placeholders, left to right
    Bind {
        /// The statement
        query: String,

        /// One value per placeholder
        values: Vec<String>,

        /// Bind every value as text
        #[arg(long)]
        text: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let parser = ParserOptions {
        max_depth: cli.max_depth,
    };

    let result = match cli.command {
        Commands::Check { query } => run_check(query, parser),
        Commands::Tree { query, pretty } => run_tree(query, pretty, parser),
        Commands::Count { category, query } => run_count(query, category, parser),
        Commands::Bind {
            query,
            values,
            text,
        } => run_bind(query, values, text, parser),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_query(query: Option<String>) -> Result<String, CliError> {
    match query {
        Some(q) => Ok(q),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer.trim_end_matches(['\n', '\r']).to_string())
        }
        None => Err(CliError::NoQuery),
    }
}

fn run_check(query: Option<String>, parser: ParserOptions) -> Result<(), CliError> {
    let options = CheckOptions {
        query: read_query(query)?,
        parser,
    };
    let placeholders = cli::execute_check(&options)?;
    println!("Syntax is valid ({} placeholder(s))", placeholders);
    Ok(())
}

fn run_tree(query: Option<String>, pretty: bool, parser: ParserOptions) -> Result<(), CliError> {
    let options = TreeOptions {
        query: read_query(query)?,
        pretty,
        parser,
    };
    println!("{}", cli::execute_tree(&options)?);
    Ok(())
}

fn run_count(
    query: Option<String>,
    category: String,
    parser: ParserOptions,
) -> Result<(), CliError> {
    let options = CountOptions {
        query: read_query(query)?,
        category,
        parser,
    };
    println!("{}", cli::execute_count(&options)?);
    Ok(())
}

fn run_bind(
    query: String,
    values: Vec<String>,
    text: bool,
    parser: ParserOptions,
) -> Result<(), CliError> {
    let options = BindOptions {
        query,
        values,
        text,
        parser,
    };
    println!("{}", cli::execute_bind(&options)?);
    Ok(())
}
