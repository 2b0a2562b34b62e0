//! Command-line argument parsing.

use clap::{Parser, Subcommand};
use storage::http::{API_URL_ENV, DEFAULT_API_URL};

/// Track progress through the DSA curriculum
#[derive(Parser, Debug)]
#[command(name = "dsa-tracker", version, about, long_about = None)]
pub struct Cli {
    /// Base url of the tracker API
    #[arg(long, global = true, env = API_URL_ENV, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Bearer token issued at login
    #[arg(long, global = true, env = "TRACKER_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List topics with their completion status
    Topics,
    /// Show solved counts per difficulty
    Progress,
    /// Mark a problem complete, or incomplete if it already is
    Toggle {
        /// Problem id as shown by the remote service
        problem_id: String,
    },
    /// Show the signed-in user
    Profile,
}
