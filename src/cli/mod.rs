//! CLI definitions and entry point.

use clap::{Args, Parser, Subcommand};

pub mod commands;
pub mod table;

/// File-per-record issue tracker
#[derive(Parser, Debug)]
#[command(name = "ishu", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no log output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize an ishu directory
    Init,

    /// View and edit settings
    #[command(alias = "cfg")]
    Conf(ConfArgs),

    /// Manage command aliases
    Alias(AliasArgs),

    /// Show info about an issue
    #[command(alias = "s")]
    Show(ShowArgs),

    /// Open a new issue
    #[command(alias = "o")]
    Open(OpenArgs),

    /// Reopen a closed issue
    #[command(alias = "r")]
    Reopen(ReopenArgs),

    /// Edit an issue
    #[command(alias = "e")]
    Edit(EditArgs),

    /// Close an issue and mark it as fixed
    #[command(alias = "f")]
    Fixed(CloseArgs),

    /// Close an issue and mark it as not going to be fixed
    #[command(alias = "w")]
    Wontfix(CloseArgs),

    /// Mark an issue as blocked by another issue
    #[command(alias = "b")]
    Blocked(EdgeArgs),

    /// Mark an issue as no longer blocked by another issue
    #[command(alias = "ub")]
    Unblock(EdgeArgs),

    /// Add a comment to an issue
    #[command(alias = "c")]
    Comment(CommentArgs),

    /// List all issues or ones matching certain filters
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show the change log of an issue
    #[command(alias = "l")]
    Log(LogArgs),

    /// Handle registered tags in this ishu project
    #[command(alias = "t")]
    Tag(TagArgs),
}

#[derive(Args, Debug, Default)]
pub struct ConfArgs {
    /// List settings
    #[arg(short, long)]
    pub list: bool,

    /// Show the value of a setting
    #[arg(short, long, value_name = "KEY")]
    pub get: Option<String>,

    /// Set the value of a setting
    #[arg(short, long, num_args = 2, value_names = ["KEY", "VALUE"])]
    pub set: Option<Vec<String>>,
}

#[derive(Args, Debug, Default)]
pub struct AliasArgs {
    /// Define an alias
    #[arg(short, long, num_args = 2, value_names = ["NAME", "EXPANSION"])]
    pub set: Option<Vec<String>>,

    /// Remove an alias
    #[arg(short, long, value_name = "NAME")]
    pub unset: Option<String>,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Issue reference (number with optional user prefix)
    pub id: String,
}

#[derive(Args, Debug)]
pub struct OpenArgs {
    /// Issue description
    pub description: String,

    /// Add tags to the issue
    #[arg(short, long, num_args = 1..)]
    pub tags: Vec<String>,

    /// Mark the new issue as blocked by other issues
    #[arg(short, long = "blocked-by", num_args = 1.., value_name = "ID")]
    pub blocked_by: Vec<String>,
}

#[derive(Args, Debug)]
pub struct ReopenArgs {
    /// Issue reference
    pub id: String,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Issue reference
    pub id: String,

    /// Set the description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Add tags to the issue
    #[arg(short = 't', long = "add-tags", num_args = 1.., value_name = "TAG")]
    pub add_tags: Vec<String>,

    /// Remove tags from the issue
    #[arg(short = 'T', long = "remove-tags", num_args = 1.., value_name = "TAG")]
    pub remove_tags: Vec<String>,
}

#[derive(Args, Debug)]
pub struct CloseArgs {
    /// Issue reference
    pub id: String,

    /// Attach a comment in the same operation
    pub comment: Option<String>,
}

#[derive(Args, Debug)]
pub struct EdgeArgs {
    /// The issue being blocked (must be your own; number only)
    pub blocked_id: String,

    /// The issue doing the blocking
    pub blocking_id: String,
}

#[derive(Args, Debug)]
pub struct CommentArgs {
    /// Issue reference
    pub id: String,

    /// Comment message
    pub message: String,
}

#[derive(Args, Debug, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct ListArgs {
    /// Only show issues with this status (open, closed, fixed, wontfix)
    #[arg(short, long)]
    pub status: Option<String>,

    /// Only show issues with these tags
    #[arg(short, long, num_args = 1..)]
    pub tags: Vec<String>,

    /// Only show issues without these tags
    #[arg(short = 'T', long = "without-tags", num_args = 1.., value_name = "TAG")]
    pub without_tags: Vec<String>,

    /// Only show issues blocked by other issues
    #[arg(short, long)]
    pub blocked: bool,

    /// Only show issues blocking another issue
    #[arg(short = 'B', long)]
    pub blocking: bool,

    /// Don't show blocked or blocking issues
    #[arg(short = 'n', long = "no-blocks")]
    pub no_blocks: bool,
}

#[derive(Args, Debug)]
pub struct LogArgs {
    /// Issue reference
    pub id: String,
}

#[derive(Args, Debug, Default)]
pub struct TagArgs {
    /// List registered tags
    #[arg(short, long)]
    pub list: bool,

    /// Sort tag list by usage
    #[arg(short, long)]
    pub usage: bool,

    /// Register new tags
    #[arg(short, long, num_args = 1.., value_name = "TAG")]
    pub add: Vec<String>,

    /// Unregister tags and remove them from all issues
    #[arg(short, long, num_args = 1.., value_name = "TAG")]
    pub remove: Vec<String>,

    /// Rename a tag in the registry and in all issues using it
    #[arg(short, long, num_args = 2, value_names = ["OLD", "NEW"])]
    pub edit: Option<Vec<String>>,

    /// Answer yes to every confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}
