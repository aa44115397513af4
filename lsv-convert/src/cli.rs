use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "lsv-convert")]
#[command(about = "Migrate Logstash pipeline configurations to Vector")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Migrate every .conf file in a directory to Vector TOML.
    Migrate(MigrateArgs),
    /// Migrate a single .conf file.
    Convert(ConvertArgs),
    /// Validate Vector TOML files with `vector validate`.
    Validate(ValidateArgs),
    /// Show how Logstash plugins map onto the components of a Vector file.
    Diff(DiffArgs),
}

impl Command {
    /// `(verbose, quiet)` flags of the selected subcommand.
    pub fn verbosity(&self) -> (bool, bool) {
        match self {
            Command::Migrate(args) => (args.verbose, args.quiet),
            Command::Convert(args) => (args.verbose, args.quiet),
            Command::Validate(args) => (args.verbose, args.quiet),
            Command::Diff(args) => (args.verbose, false),
        }
    }
}

#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Directory containing Logstash .conf files (searched recursively).
    pub dir: PathBuf,
    /// Preview the migration without writing any file.
    #[arg(short = 'n', long)]
    pub dry_run: bool,
    /// Write generated files here instead of next to each source.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
    /// Path of the combined Markdown report.
    #[arg(short, long)]
    pub report: Option<PathBuf>,
    /// Validate generated files with the Vector CLI (default).
    #[arg(long, overrides_with = "no_validate")]
    pub validate: bool,
    /// Skip validation of generated files.
    #[arg(long, overrides_with = "validate")]
    pub no_validate: bool,
    /// Replace existing output files.
    #[arg(short = 'f', long)]
    pub overwrite: bool,
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,
    #[arg(short, long)]
    pub quiet: bool,
    /// Guidance TOML file for unsupported plugins.
    #[arg(long)]
    pub guidance_file: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    #[command(flatten)]
    pub validator: ValidatorArgs,
}

#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// Logstash .conf file.
    pub file: PathBuf,
    /// Write the generated TOML here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Replace an existing output file.
    #[arg(short = 'f', long)]
    pub overwrite: bool,
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,
    #[arg(short, long)]
    pub quiet: bool,
    /// Guidance TOML file for unsupported plugins.
    #[arg(long)]
    pub guidance_file: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Files to validate. Defaults to *.toml in the current directory.
    pub files: Vec<PathBuf>,
    /// Print validator diagnostics for invalid files.
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,
    #[arg(short, long)]
    pub quiet: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    #[command(flatten)]
    pub validator: ValidatorArgs,
}

#[derive(Parser, Debug)]
pub struct DiffArgs {
    /// Logstash .conf file.
    pub conf: PathBuf,
    /// Generated Vector TOML file.
    pub toml: PathBuf,
    /// Also print each plugin's settings.
    #[arg(short, long)]
    pub verbose: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(clap::Args, Debug)]
pub struct ValidatorArgs {
    /// Seconds to wait for `vector validate` before giving up.
    #[arg(long, default_value_t = 30)]
    pub validator_timeout: u64,
    /// Let `vector validate` run its environment checks (connectivity,
    /// file permissions).
    #[arg(long)]
    pub check_environment: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
