use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::model::item::{Priority, Status};
use crate::model::query::{SortDirection, SortField};

#[derive(Parser)]
#[command(name = "ib", about = concat!("insightboard v", env!("CARGO_PKG_VERSION"), " - meeting transcripts in, action items out"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Analysis service base URL (overrides config and INSIGHTBOARD_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Use a different config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List action items
    List(ListArgs),
    /// Show one action item
    Show(IdArg),
    /// Analyze a meeting transcript and store the extracted action items
    Analyze(AnalyzeArgs),
    /// Toggle an action item between pending and completed
    Toggle(IdArg),
    /// Set an action item's priority
    Priority(PriorityArgs),
    /// Delete an action item
    Delete(IdArg),
    /// Show completion progress and priority distribution
    Stats,
    /// Check that the analysis service is reachable
    Health,
    /// Print the resolved configuration
    Config,
}

// ---------------------------------------------------------------------------
// Value enums
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum StatusArg {
    Pending,
    Completed,
}

impl From<StatusArg> for Status {
    fn from(s: StatusArg) -> Status {
        match s {
            StatusArg::Pending => Status::Pending,
            StatusArg::Completed => Status::Completed,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PriorityArg {
    High,
    Medium,
    Low,
}

impl From<PriorityArg> for Priority {
    fn from(p: PriorityArg) -> Priority {
        match p {
            PriorityArg::High => Priority::High,
            PriorityArg::Medium => Priority::Medium,
            PriorityArg::Low => Priority::Low,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum SortArg {
    #[default]
    Created,
    Priority,
    Status,
}

impl From<SortArg> for SortField {
    fn from(s: SortArg) -> SortField {
        match s {
            SortArg::Created => SortField::CreatedAt,
            SortArg::Priority => SortField::Priority,
            SortArg::Status => SortField::Status,
        }
    }
}

// ---------------------------------------------------------------------------
// Command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ListArgs {
    /// Only items with this status
    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,
    /// Only items with this priority
    #[arg(long, value_enum)]
    pub priority: Option<PriorityArg>,
    /// Only items whose text contains this (case-insensitive)
    #[arg(long)]
    pub search: Option<String>,
    /// Sort field
    #[arg(long, value_enum, default_value = "created")]
    pub sort: SortArg,
    /// Sort ascending (default is descending)
    #[arg(long, conflicts_with = "desc")]
    pub asc: bool,
    /// Sort descending
    #[arg(long)]
    pub desc: bool,
}

impl ListArgs {
    pub fn direction(&self) -> SortDirection {
        if self.asc {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        }
    }
}

#[derive(Args)]
pub struct IdArg {
    /// Action item ID (any unique prefix)
    pub id: String,
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// File containing the transcript; reads stdin when omitted or `-`
    pub file: Option<String>,
}

#[derive(Args)]
pub struct PriorityArgs {
    /// Action item ID (any unique prefix)
    pub id: String,
    /// New priority
    #[arg(value_enum)]
    pub priority: PriorityArg,
}
