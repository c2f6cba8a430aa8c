//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - list/search/show: browse the tool dictionary
//! - toolbox: show selected tools per PDCA phase
//! - plan: show the assembled project plan
//! - export: write the plan as CSV, TXT, XLSX and/or PDF
//! - formats: report which export formats are available

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use toolshed::{ExportFormat, Phase};

/// Toolshed - pick PDCA tools and export a project plan
#[derive(Parser, Debug)]
#[command(name = "toolshed")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Tool catalog CSV (overrides the configured primary path)
    #[arg(long, global = true, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the tool dictionary
    List {
        /// Only tools of this phase (plan, do, check, act)
        #[arg(short, long)]
        phase: Option<Phase>,

        /// Only tools without a recognized phase
        #[arg(long, conflicts_with = "phase")]
        unclassified: bool,

        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search tool names and descriptions
    Search {
        /// Case-insensitive text to look for; empty lists everything
        #[arg(default_value = "")]
        query: String,

        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one tool with its links and videos
    Show {
        /// Exact tool name
        name: String,
    },

    /// Show the selected tools in per-phase toolboxes
    Toolbox {
        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Show the project plan assembled from the selections
    Plan {
        #[command(flatten)]
        project: ProjectArgs,

        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Export the project plan to files
    Export {
        #[command(flatten)]
        project: ProjectArgs,

        #[command(flatten)]
        selection: SelectionArgs,

        /// Output format (repeatable, default all)
        #[arg(short, long = "format", value_enum)]
        formats: Vec<FormatArg>,

        /// Directory to write into (default from config)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },

    /// Show which export formats are available
    Formats,
}

/// Tools chosen for each phase
#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// Tool for the Plan phase (repeatable)
    #[arg(long = "plan", value_name = "TOOL")]
    pub plan: Vec<String>,

    /// Tool for the Do phase (repeatable)
    #[arg(long = "do", value_name = "TOOL")]
    pub do_tools: Vec<String>,

    /// Tool for the Check phase (repeatable)
    #[arg(long = "check", value_name = "TOOL")]
    pub check: Vec<String>,

    /// Tool for the Act phase (repeatable)
    #[arg(long = "act", value_name = "TOOL")]
    pub act: Vec<String>,

    /// Allow the same tool more than once within a phase
    #[arg(long)]
    pub allow_duplicates: bool,
}

impl SelectionArgs {
    /// Tool names given for a phase, in argument order
    pub fn for_phase(&self, phase: Phase) -> &[String] {
        match phase {
            Phase::Plan => &self.plan,
            Phase::Do => &self.do_tools,
            Phase::Check => &self.check,
            Phase::Act => &self.act,
        }
    }
}

/// Project details for the plan title block
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// Project name
    #[arg(short, long, default_value = "")]
    pub name: String,

    /// Project owner
    #[arg(long, default_value = "")]
    pub owner: String,
}

/// Export format choice on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    Csv,
    Txt,
    Xlsx,
    Pdf,
    All,
}

impl FormatArg {
    /// Resolve requested formats; none or `all` means every format. Order is kept, repeats dropped.
    pub fn resolve(args: &[FormatArg]) -> Vec<ExportFormat> {
        if args.is_empty() || args.contains(&FormatArg::All) {
            return ExportFormat::ALL.to_vec();
        }
        let mut formats = Vec::new();
        for arg in args {
            let format = match arg {
                FormatArg::Csv => ExportFormat::Csv,
                FormatArg::Txt => ExportFormat::Txt,
                FormatArg::Xlsx => ExportFormat::Xlsx,
                FormatArg::Pdf => ExportFormat::Pdf,
                FormatArg::All => continue,
            };
            if !formats.contains(&format) {
                formats.push(format);
            }
        }
        formats
    }
}
