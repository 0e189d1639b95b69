// src/cli/mod.rs
use clap::Parser;

pub mod commands;
pub mod handlers;
pub mod menu;

pub use commands::CliCommand;

#[derive(Parser, Debug)]
#[command(author, version, about = "Derive or generate passwords and keep a history of them", long_about = None)]
pub struct Args {
    /// Use JSON for output
    #[arg(long, global = true)]
    pub json: bool,

    /// Store location (sqlite:<path>, a bare path, sqlite::memory: or memory:)
    #[arg(long, short, global = true)]
    pub db: Option<String>,

    /// Scope records to this owner
    #[arg(long, short, global = true)]
    pub owner: Option<String>,

    /// Command to execute; without one the interactive menu starts
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn args_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_generate_with_negative_length() {
        let args = Args::parse_from(["passgen", "generate", "--length", "-4"]);
        match args.command {
            Some(CliCommand::Generate { length, base, .. }) => {
                assert_eq!(length, Some(-4));
                assert_eq!(base, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let args = Args::parse_from(["passgen", "list", "--json", "--owner", "user1"]);
        assert!(args.json);
        assert_eq!(args.owner.as_deref(), Some("user1"));
        assert!(matches!(args.command, Some(CliCommand::List)));
    }

    #[test]
    fn db_location_is_accepted_after_subcommand() {
        let args = Args::parse_from(["passgen", "list", "--db", "memory:"]);
        assert_eq!(args.db.as_deref(), Some("memory:"));

        let args = Args::parse_from(["passgen", "-d", "senhas.db", "show", "3"]);
        assert_eq!(args.db.as_deref(), Some("senhas.db"));
        assert!(matches!(args.command, Some(CliCommand::Show { id: 3 })));
    }
}
