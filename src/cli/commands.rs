// src/cli/commands.rs
use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Generate a password from a base string or at random, and store it
    Generate {
        /// Base string to derive the password from
        #[arg(long, short)]
        base: Option<String>,

        /// Length of a random password (used only without a base)
        #[arg(long, short, allow_negative_numbers = true)]
        length: Option<i64>,

        /// Optional name for the stored entry
        #[arg(long)]
        label: Option<String>,

        /// Print the password without storing it
        #[arg(long)]
        no_save: bool,
    },

    /// List stored passwords
    List,

    /// Show one stored password
    Show {
        /// Record ID
        #[arg(required = true)]
        id: i64,
    },

    /// Delete a stored password
    Delete {
        /// Record ID
        #[arg(required = true)]
        id: i64,
    },

    /// Delete all stored passwords (within the owner scope)
    DeleteAll {
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// Print the active substitution table
    Table,
}
