//! Configuration handling for cqlfixture

use std::path::PathBuf;

use crate::error::FixtureError;

/// Default contact point of a local node
pub const DEFAULT_HOST: &str = "127.0.0.1:9042";

/// Rows produced by `generate` unless told otherwise
pub const DEFAULT_ROW_COUNT: usize = 50_000;

/// File the database-side contents are dumped to on a validation mismatch
pub const BAD_CONTENTS_FILE: &str = "bad_contents.csv";

/// Output format for validation reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "terminal" => Ok(OutputFormat::Terminal),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Inclusive range generated values are drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueRange {
    pub min: i32,
    pub max: i32,
}

impl Default for ValueRange {
    fn default() -> Self {
        Self {
            min: -1000,
            max: 1000,
        }
    }
}

impl ValueRange {
    /// Create a range, rejecting `min > max`
    pub fn new(min: i32, max: i32) -> Result<Self, FixtureError> {
        if min > max {
            return Err(FixtureError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn contains(&self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Connection settings for the data store
#[derive(Debug, Clone)]
pub struct Config {
    /// Contact points, `host:port`
    pub hosts: Vec<String>,
    /// Username for password authentication
    pub username: Option<String>,
    /// Password for password authentication
    pub password: Option<String>,
    /// Replication factor for `CREATE KEYSPACE`
    pub replication_factor: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hosts: vec![DEFAULT_HOST.to_string()],
            username: None,
            password: None,
            replication_factor: 1,
        }
    }
}

impl Config {
    /// Set contact points; an empty list keeps the default
    pub fn with_hosts(mut self, hosts: Vec<String>) -> Self {
        if !hosts.is_empty() {
            self.hosts = hosts;
        }
        self
    }

    /// Set credentials
    pub fn with_credentials(mut self, username: String, password: String) -> Self {
        self.username = Some(username);
        self.password = Some(password);
        self
    }

    /// Set keyspace replication factor
    pub fn with_replication_factor(mut self, factor: u32) -> Self {
        self.replication_factor = factor;
        self
    }
}

/// Where `generate` writes its CSV
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputTarget {
    #[default]
    Stdout,
    File(PathBuf),
}

impl From<Option<PathBuf>> for OutputTarget {
    fn from(path: Option<PathBuf>) -> Self {
        path.map_or(OutputTarget::Stdout, OutputTarget::File)
    }
}

/// Options for the `generate` workflow
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub output: OutputTarget,
    pub row_count: usize,
    pub range: ValueRange,
    /// Fixed RNG seed for reproducible datasets
    pub seed: Option<u64>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            output: OutputTarget::Stdout,
            row_count: DEFAULT_ROW_COUNT,
            range: ValueRange::default(),
            seed: None,
        }
    }
}

impl GenerateOptions {
    pub fn with_output(mut self, output: OutputTarget) -> Self {
        self.output = output;
        self
    }

    pub fn with_row_count(mut self, row_count: usize) -> Self {
        self.row_count = row_count;
        self
    }

    pub fn with_range(mut self, range: ValueRange) -> Self {
        self.range = range;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}
