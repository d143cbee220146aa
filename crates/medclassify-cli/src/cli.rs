//! CLI command definitions and argument parsing.

use clap::{ArgAction, Args, Parser, Subcommand};
use medclassify_domain::MetadataInput;
use medclassify_pipeline::ExportFormat;
use std::path::PathBuf;

/// MedClassify - Classify medical abstracts into clinical domains.
#[derive(Debug, Parser)]
#[command(name = "medclassify")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "MEDCLASSIFY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (primary domain or level only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Classify a title and abstract
    Classify(ClassifyArgs),

    /// Assess source reliability from metadata alone
    Reliability(MetadataArgs),

    /// Ingest an uploaded file (.csv, .pdf, .txt, .docx)
    Upload(UploadArgs),

    /// Ingest an article from a URL
    Fetch(FetchArgs),

    /// Summarize text or a URL
    Summarize(SummarizeArgs),

    /// Classify every article of a CSV (title, abstract, optional group)
    Predict(PredictArgs),

    /// Score predictions against the group column of a labelled CSV
    Eval(EvalArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Bibliographic metadata flags.
#[derive(Debug, Clone, Default, Args)]
pub struct MetadataArgs {
    /// Journal name
    #[arg(long)]
    pub journal: Option<String>,

    /// Authors, comma or semicolon separated
    #[arg(long)]
    pub authors: Option<String>,

    /// Institution
    #[arg(long)]
    pub institution: Option<String>,

    /// Publication year
    #[arg(long)]
    pub year: Option<String>,

    /// Digital Object Identifier
    #[arg(long)]
    pub doi: Option<String>,
}

impl From<MetadataArgs> for MetadataInput {
    fn from(args: MetadataArgs) -> Self {
        MetadataInput {
            journal: args.journal.unwrap_or_default(),
            authors: args.authors.unwrap_or_default(),
            institution: args.institution.unwrap_or_default(),
            publication_year: args.year.unwrap_or_default(),
            doi: args.doi.unwrap_or_default(),
        }
    }
}

/// Flags shared by commands that run the simulated pipeline.
#[derive(Debug, Clone, Default, Args)]
pub struct RunArgs {
    /// Seed for the randomized fields
    #[arg(long)]
    pub seed: Option<u64>,

    /// Skip the simulated processing delays
    #[arg(long)]
    pub instant: bool,

    /// Load the domain lexicon from a TOML file
    #[arg(long, env = "MEDCLASSIFY_LEXICON")]
    pub lexicon: Option<PathBuf>,
}

/// Arguments for the classify command.
#[derive(Debug, Parser)]
pub struct ClassifyArgs {
    /// Article title
    pub title: String,

    /// Article abstract
    #[arg(short, long, required_unless_present = "abstract_file")]
    pub r#abstract: Option<String>,

    /// Read the abstract from a file
    #[arg(long, conflicts_with = "abstract")]
    pub abstract_file: Option<PathBuf>,

    #[command(flatten)]
    pub metadata: MetadataArgs,

    #[command(flatten)]
    pub run: RunArgs,

    /// Export the result
    #[arg(short, long, value_enum)]
    pub export: Option<ExportArg>,

    /// Export destination (defaults to a timestamped file name)
    #[arg(short, long, requires = "export")]
    pub output: Option<PathBuf>,
}

/// Arguments for the upload command.
#[derive(Debug, Parser)]
pub struct UploadArgs {
    /// File to ingest
    pub file: PathBuf,

    #[command(flatten)]
    pub metadata: MetadataArgs,

    #[command(flatten)]
    pub run: RunArgs,

    /// Write the extracted article and its scores as CSV
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the fetch command.
#[derive(Debug, Parser)]
pub struct FetchArgs {
    /// Article URL
    pub url: String,

    #[command(flatten)]
    pub metadata: MetadataArgs,

    #[command(flatten)]
    pub run: RunArgs,

    /// Write the extracted article and its scores as CSV
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the summarize command.
#[derive(Debug, Parser)]
#[command(group(clap::ArgGroup::new("input").required(true).args(["text", "url"])))]
pub struct SummarizeArgs {
    /// Text to summarize
    #[arg(short, long)]
    pub text: Option<String>,

    /// URL to summarize
    #[arg(short, long)]
    pub url: Option<String>,

    /// Skip the simulated processing delay
    #[arg(long)]
    pub instant: bool,
}

/// Arguments for the predict command.
#[derive(Debug, Parser)]
pub struct PredictArgs {
    /// Article CSV
    pub input: PathBuf,

    #[command(flatten)]
    pub run: RunArgs,

    /// Write predicted labels and per-domain scores as CSV
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the eval command.
#[derive(Debug, Parser)]
pub struct EvalArgs {
    /// Labelled article CSV
    pub data: PathBuf,

    #[command(flatten)]
    pub run: RunArgs,

    /// Write the metrics as JSON
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the configuration file path
    Path,
}

/// Export format argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ExportArg {
    /// Comma-separated values
    Csv,
    /// JSON document
    Json,
    /// HTML report
    Html,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<ExportArg> for ExportFormat {
    fn from(arg: ExportArg) -> Self {
        match arg {
            ExportArg::Csv => ExportFormat::Csv,
            ExportArg::Json => ExportFormat::Json,
            ExportArg::Html => ExportFormat::Html,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_command() {
        let cli = Cli::parse_from([
            "medclassify",
            "classify",
            "Heart failure",
            "--abstract",
            "Cardiac outcomes",
            "--journal",
            "Nature",
            "--seed",
            "7",
            "--export",
            "json",
        ]);
        match cli.command {
            Command::Classify(args) => {
                assert_eq!(args.title, "Heart failure");
                assert_eq!(args.r#abstract.as_deref(), Some("Cardiac outcomes"));
                assert_eq!(args.metadata.journal.as_deref(), Some("Nature"));
                assert_eq!(args.run.seed, Some(7));
                assert!(matches!(args.export, Some(ExportArg::Json)));
            }
            _ => panic!("Expected Classify command"),
        }
    }

    #[test]
    fn test_abstract_is_required() {
        assert!(Cli::try_parse_from(["medclassify", "classify", "Title"]).is_err());
        assert!(Cli::try_parse_from([
            "medclassify",
            "classify",
            "Title",
            "--abstract-file",
            "abstract.txt",
        ])
        .is_ok());
    }

    #[test]
    fn test_summarize_needs_one_input() {
        assert!(Cli::try_parse_from(["medclassify", "summarize"]).is_err());
        assert!(Cli::try_parse_from(["medclassify", "summarize", "--text", "a", "--url", "b"]).is_err());
        assert!(Cli::try_parse_from(["medclassify", "summarize", "--url", "https://x.org"]).is_ok());
    }

    #[test]
    fn test_predict_and_eval_commands() {
        let cli = Cli::parse_from([
            "medclassify",
            "predict",
            "articles.csv",
            "-o",
            "predictions.csv",
            "--lexicon",
            "lexicon.toml",
        ]);
        match cli.command {
            Command::Predict(args) => {
                assert_eq!(args.input, PathBuf::from("articles.csv"));
                assert_eq!(args.output, Some(PathBuf::from("predictions.csv")));
                assert_eq!(args.run.lexicon, Some(PathBuf::from("lexicon.toml")));
            }
            _ => panic!("Expected Predict command"),
        }

        let cli = Cli::parse_from(["medclassify", "eval", "labelled.csv", "--seed", "3"]);
        assert!(matches!(cli.command, Command::Eval(ref args) if args.run.seed == Some(3)));
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["medclassify", "config", "show", "-vv", "--format", "json"]);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
    }

    #[test]
    fn test_metadata_conversion() {
        let args = MetadataArgs {
            year: Some("2021".to_string()),
            ..Default::default()
        };
        let metadata: MetadataInput = args.into();
        assert_eq!(metadata.publication_year, "2021");
        assert!(metadata.journal.is_empty());
    }
}
