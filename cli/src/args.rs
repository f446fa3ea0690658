use clap::{Parser, Subcommand};
use todo_sync::{config::BASE_URL_ENV, TodoId};

/// Command-line client for a remote todo list
///
/// Every command loads the current list from the server first, applies its
/// change through the sync store and prints the resulting list.
#[derive(Debug, Parser)]
#[command(version, about, name = "todo")]
pub struct Args {
    /// Server origin hosting the /api/todos resource
    #[arg(long, global = true, env = BASE_URL_ENV, default_value = todo_sync::config::DEFAULT_BASE_URL)]
    pub url: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Commands {
    /// Show all todos
    #[command(alias = "ls")]
    List,
    /// Create a todo
    Add {
        /// Title of the new todo
        title: String,
        /// Optional longer description
        #[arg(long, short)]
        description: Option<String>,
    },
    /// Flip the completed flag of a todo
    Toggle { id: TodoId },
    /// Delete a todo
    #[command(alias = "rm")]
    Remove { id: TodoId },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_add_with_description() {
        let args = Args::try_parse_from(["todo", "add", "Buy milk", "-d", "2 liters"]).unwrap();
        assert_eq!(
            args.command,
            Some(Commands::Add {
                title: "Buy milk".to_string(),
                description: Some("2 liters".to_string()),
            })
        );
    }

    #[test]
    fn parses_aliases_and_ids() {
        let args = Args::try_parse_from(["todo", "rm", "4"]).unwrap();
        assert_eq!(args.command, Some(Commands::Remove { id: 4 }));

        let args = Args::try_parse_from(["todo", "--url", "http://example.com", "toggle", "2"]).unwrap();
        assert_eq!(args.url, "http://example.com");
        assert_eq!(args.command, Some(Commands::Toggle { id: 2 }));
    }

    #[test]
    fn rejects_non_numeric_id() {
        assert!(Args::try_parse_from(["todo", "toggle", "abc"]).is_err());
    }

    #[test]
    fn command_is_optional() {
        let args = Args::try_parse_from(["todo"]).unwrap();
        assert!(args.command.is_none());
    }
}
