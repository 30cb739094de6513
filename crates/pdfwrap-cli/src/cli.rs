use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use pdfwrap::BackendKind;

/// Join, split, and reorder PDFs and edit their bookmarks and metadata
/// through pdftk or pdfcpu.
#[derive(Debug, Parser)]
#[command(name = "pdfwrap", about, version)]
pub struct Cli {
    #[command(flatten)]
    pub backend: BackendArgs,

    /// Log every tool invocation (debug level)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Which external tool to run, and how.
#[derive(Debug, Clone, Args)]
pub struct BackendArgs {
    /// PDF tool to drive
    #[arg(
        long,
        value_enum,
        env = "PDFWRAP_BACKEND",
        default_value_t = BackendArg::Pdftk,
        global = true
    )]
    pub backend: BackendArg,

    /// Path to the tool binary. Default: the tool's usual install location
    #[arg(long, value_name = "PATH", env = "PDFWRAP_BINARY", global = true)]
    pub binary: Option<PathBuf>,

    /// Seconds each tool invocation may run
    #[arg(
        long,
        value_name = "SECONDS",
        env = "PDFWRAP_TIMEOUT",
        default_value_t = 300,
        global = true
    )]
    pub timeout: u64,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Concatenate PDFs in the given order
    Join {
        /// Input PDFs
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /// Output PDF
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Concatenate every PDF below a folder whose name matches a pattern
    JoinPattern {
        /// Folder to search, including subfolders
        #[arg(value_name = "FOLDER")]
        folder: PathBuf,

        /// File name pattern (e.g. '*.pdf'), joined in natural order
        #[arg(value_name = "PATTERN")]
        pattern: String,

        /// Output PDF
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Write page sets of a PDF into separate files
    Split {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output file and its pages (e.g. 'intro.pdf=1-3,5'). Repeatable
        #[arg(long = "part", value_name = "NAME=PAGES", required = true)]
        parts: Vec<String>,

        /// Folder the parts are written to
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },

    /// Reorder the pages of a PDF, using every page exactly once
    Reorder {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// New page order (e.g. '3,1,2' or '4-1')
        #[arg(value_name = "ORDER")]
        order: String,

        /// Output PDF. Default: rewrite FILE in place
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show page sizes and rotation
    Pages {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show the document outline
    Bookmarks {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format. JSON output can be fed back to set-bookmarks
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Replace the document outline with bookmarks from a JSON file
    SetBookmarks {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// JSON array of {"title", "page_number", "level"} entries
        #[arg(value_name = "JSON")]
        bookmarks: PathBuf,

        /// Output PDF. Default: rewrite FILE in place
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show document information entries
    Metadata {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Set document information entries
    SetMetadata {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Entries to set (e.g. 'Title=Annual report')
        #[arg(value_name = "KEY=VALUE", required = true)]
        entries: Vec<String>,

        /// Output PDF. Default: rewrite FILE in place
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Supported PDF tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendArg {
    /// pdftk (flat text dumps)
    Pdftk,
    /// pdfcpu (JSON reports)
    Pdfcpu,
}

impl From<BackendArg> for BackendKind {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Pdftk => BackendKind::Pdftk,
            BackendArg::Pdfcpu => BackendKind::Pdfcpu,
        }
    }
}

/// Output format for listing subcommands.
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Plain text (tab-separated)
    Text,
    /// JSON output
    Json,
}
