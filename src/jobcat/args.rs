use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "jobcat", version)]
#[command(about = "Local job catalog: provider feeds plus admin-curated listings", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to $JOBCAT_HOME, then the platform data dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List jobs, optionally searched and filtered
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one job in full
    #[command(alias = "v")]
    View { id: String },

    /// Add a job (admin)
    #[command(alias = "n")]
    Add(JobArgs),

    /// Update fields of a job (admin)
    #[command(alias = "e")]
    Update {
        id: String,

        #[command(flatten)]
        fields: JobArgs,
    },

    /// Delete one or more jobs (admin)
    #[command(alias = "rm")]
    Delete {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Delete every job, local and external (admin)
    Purge {
        /// Skip the confirmation requirement
        #[arg(short, long)]
        yes: bool,
    },

    /// Replace external jobs with the contents of a provider feed
    Sync {
        /// JSON feed to read (defaults to the configured provider-path)
        #[arg(long, value_name = "FILE")]
        from: Option<PathBuf>,
    },

    /// Show catalog statistics
    Stats,

    /// Start an admin session
    Login { passcode: String },

    /// End the admin session
    Logout,

    /// Show whether an admin session is active
    Status,

    /// Get or set configuration
    Config {
        /// Configuration key (e.g., provider-path)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Free-text search term
    #[arg(short, long)]
    pub query: Option<String>,

    /// Search title, company, description and skills only (not location)
    #[arg(long)]
    pub narrow: bool,

    /// Location contains
    #[arg(long)]
    pub location: Option<String>,

    /// Employment type, exact (e.g. full-time)
    #[arg(long = "type", value_name = "TYPE")]
    pub job_type: Option<String>,

    /// Experience level contains
    #[arg(long)]
    pub experience: Option<String>,

    /// Only remote jobs
    #[arg(long, conflicts_with = "on_site")]
    pub remote: bool,

    /// Only on-site jobs
    #[arg(long)]
    pub on_site: bool,

    /// Wanted skill (repeatable; any match passes)
    #[arg(long = "skill", value_name = "SKILL")]
    pub skills: Vec<String>,

    /// Fetch the configured provider feed before listing
    #[arg(long)]
    pub refresh: bool,
}

#[derive(Args, Debug, Default)]
pub struct JobArgs {
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub company: Option<String>,

    #[arg(long)]
    pub location: Option<String>,

    #[arg(long = "type", value_name = "TYPE")]
    pub job_type: Option<String>,

    #[arg(long)]
    pub experience: Option<String>,

    #[arg(long)]
    pub salary: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Comma-separated requirements
    #[arg(long)]
    pub requirements: Option<String>,

    /// Comma-separated skills
    #[arg(long)]
    pub skills: Option<String>,

    #[arg(long)]
    pub apply_url: Option<String>,

    #[arg(long)]
    pub logo: Option<String>,

    /// Remote job (true/false)
    #[arg(long, value_name = "BOOL")]
    pub remote: Option<bool>,
}
