//! cqlfixture - generate, load and validate CSV fixtures against a CQL table

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use cqlfixture::codec::csv;
use cqlfixture::config::{
    Config, GenerateOptions, OutputFormat, ValueRange, BAD_CONTENTS_FILE, DEFAULT_ROW_COUNT,
};
use cqlfixture::output::{render_empty_to_stdout, render_same_to_stdout, EmptyReport, SameReport};
use cqlfixture::store::CqlStore;
use cqlfixture::workflow::{self, Status, ERROR_EXIT_CODE};
use cqlfixture::TableRef;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Terminal,
    Json,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> Self {
        match f {
            CliOutputFormat::Terminal => OutputFormat::Terminal,
            CliOutputFormat::Json => OutputFormat::Json,
        }
    }
}

/// Generate, load and validate synthetic CSV fixtures against a CQL table
#[derive(Parser, Debug)]
#[command(name = "cqlfixture")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct ConnectionArgs {
    /// Contact points, host:port (comma-separated)
    #[arg(long, global = true, env = "CQLFIXTURE_HOSTS", value_delimiter = ',')]
    hosts: Vec<String>,

    /// Username for password authentication
    #[arg(long, global = true, env = "CQLFIXTURE_USERNAME", requires = "password")]
    username: Option<String>,

    /// Password for password authentication
    #[arg(
        long,
        global = true,
        env = "CQLFIXTURE_PASSWORD",
        hide_env_values = true,
        requires = "username"
    )]
    password: Option<String>,

    /// Replication factor used when creating the keyspace
    #[arg(long, global = true, default_value_t = 1)]
    replication_factor: u32,
}

#[derive(Args, Debug)]
struct TableArgs {
    /// Keyspace holding the fixture table
    #[arg(long = "keyspace-name", value_name = "KS")]
    keyspace_name: String,

    /// Fixture table name
    #[arg(long = "table-name", value_name = "TABLE")]
    table_name: String,
}

impl From<TableArgs> for TableRef {
    fn from(args: TableArgs) -> Self {
        TableRef::new(args.keyspace_name, args.table_name)
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the keyspace and table, then write random rows as CSV
    Generate {
        /// Output file (stdout if omitted)
        #[arg(short = 'o', long = "output-file", value_name = "OUTPUT")]
        output_file: Option<PathBuf>,

        /// Number of rows to generate
        #[arg(short = 'n', long = "rows", value_name = "ROWS", default_value_t = DEFAULT_ROW_COUNT)]
        rows: usize,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Smallest generated value
        #[arg(long, default_value_t = -1000, allow_negative_numbers = true)]
        min_value: i32,

        /// Largest generated value
        #[arg(long, default_value_t = 1000, allow_negative_numbers = true)]
        max_value: i32,

        #[command(flatten)]
        table: TableArgs,
    },

    /// Insert every row of a CSV file into the table
    Load {
        /// CSV file produced by `generate`
        datafile: PathBuf,

        #[command(flatten)]
        table: TableArgs,
    },

    /// Check that the table holds exactly the rows of a CSV file
    #[command(name = "validate_same", alias = "validate-same", alias = "validate")]
    ValidateSame {
        /// CSV file to compare against
        datafile: PathBuf,

        /// Report format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: CliOutputFormat,

        #[command(flatten)]
        table: TableArgs,
    },

    /// Check that the table has no rows
    #[command(name = "validate_empty", alias = "validate-empty")]
    ValidateEmpty {
        /// Report format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: CliOutputFormat,

        #[command(flatten)]
        table: TableArgs,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(status) => ExitCode::from(status.exit_code()),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(ERROR_EXIT_CODE)
        }
    }
}

async fn run() -> Result<Status> {
    let cli = Cli::parse();

    let mut config = Config::default()
        .with_hosts(cli.connection.hosts)
        .with_replication_factor(cli.connection.replication_factor);
    if let (Some(username), Some(password)) = (cli.connection.username, cli.connection.password) {
        config = config.with_credentials(username, password);
    }

    // Local inputs are checked before connecting so bad files fail fast
    match cli.command {
        Command::Generate {
            output_file,
            rows,
            seed,
            min_value,
            max_value,
            table,
        } => {
            let options = GenerateOptions::default()
                .with_output(output_file.into())
                .with_row_count(rows)
                .with_range(ValueRange::new(min_value, max_value)?)
                .with_seed(seed);
            let table = TableRef::from(table);

            let store = CqlStore::connect(&config).await?;
            workflow::generate(&store, &table, &options).await?;
            Ok(Status::Success)
        }
        Command::Load { datafile, table } => {
            let dataset = csv::read_path(&datafile)?;
            let table = TableRef::from(table);

            let store = CqlStore::connect(&config).await?;
            workflow::load(&store, &dataset, &table).await?;
            Ok(Status::Success)
        }
        Command::ValidateSame {
            datafile,
            format,
            table,
        } => {
            let expected = csv::read_path(&datafile)?;
            let table = TableRef::from(table);

            let store = CqlStore::connect(&config).await?;
            let outcome =
                workflow::validate_same(&store, &expected, &table, Path::new(BAD_CONTENTS_FILE))
                    .await?;

            let report = SameReport {
                table: &table,
                source: &datafile,
                outcome: &outcome,
            };
            render_same_to_stdout(&report, format.into())?;

            Ok(Status::from(&outcome))
        }
        Command::ValidateEmpty { format, table } => {
            let table = TableRef::from(table);

            let store = CqlStore::connect(&config).await?;
            let check = workflow::validate_empty_report(&store, &table).await?;

            let report = EmptyReport {
                table: &table,
                rows: check.rows,
            };
            render_empty_to_stdout(&report, format.into())?;
            Ok(check.status)
        }
    }
}
