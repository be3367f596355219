//! CLI command definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pocketnote")]
#[command(about = "Personal notes with folders and categories", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory holding the store database and logs
    /// (default: ./.pocketnote)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check core linkage and print the core version
    Ping,

    /// Create, edit and list notes
    #[command(subcommand)]
    Notes(NoteCommand),

    /// Create, rename, recolor and list folders
    #[command(subcommand)]
    Folders(FolderCommand),

    /// Move a note into a folder, or unfile it when no folder is given
    Move {
        /// Note id
        note: String,

        /// Target folder id
        folder: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum NoteCommand {
    /// List notes
    List(NoteListArgs),

    /// Create a note
    Add {
        /// Note body (may contain HTML markup)
        text: String,

        /// Category (personal, work, ideas, tasks)
        #[arg(short, long, default_value = "personal")]
        category: String,
    },

    /// Replace a note's body
    Edit {
        /// Note id
        id: String,

        /// New note body
        text: String,
    },

    /// Delete a note
    Rm {
        /// Note id
        id: String,
    },

    /// Change a note's category
    Category {
        /// Note id
        id: String,

        /// Category (personal, work, ideas, tasks)
        category: String,
    },
}

#[derive(Args, Debug)]
pub struct NoteListArgs {
    /// Case-insensitive text search over plain note text
    #[arg(short, long)]
    pub search: Option<String>,

    /// Folder id, `unfiled`, or `all`
    #[arg(short, long, default_value = "all")]
    pub folder: String,

    /// Category name or `all`
    #[arg(short, long, default_value = "all")]
    pub category: String,

    /// Sort order (newest, oldest, title)
    #[arg(long, default_value = "newest")]
    pub sort: String,
}

#[derive(Subcommand, Debug)]
pub enum FolderCommand {
    /// List folders with their note counts
    List {
        /// Sort order (name, date)
        #[arg(long, default_value = "name")]
        sort: String,
    },

    /// Create a folder
    Add {
        /// Folder name
        name: String,
    },

    /// Rename a folder
    Rename {
        /// Folder id
        id: String,

        /// New name
        name: String,
    },

    /// Change a folder's colour
    Color {
        /// Folder id
        id: String,

        /// Palette name or hex code (blue, orange, pink, purple, green)
        color: String,
    },

    /// Delete a folder; its notes become unfiled
    Rm {
        /// Folder id
        id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definitions_are_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn move_without_folder_means_unfile() {
        let cli = Cli::try_parse_from(["pocketnote", "move", "n1"]).unwrap();
        match cli.command {
            Commands::Move { note, folder } => {
                assert_eq!(note, "n1");
                assert_eq!(folder, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn global_options_follow_subcommands() {
        let cli = Cli::try_parse_from([
            "pocketnote",
            "notes",
            "list",
            "--folder",
            "unfiled",
            "--log-level",
            "warn",
        ])
        .unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("warn"));
        match cli.command {
            Commands::Notes(NoteCommand::List(args)) => {
                assert_eq!(args.folder, "unfiled");
                assert_eq!(args.sort, "newest");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
