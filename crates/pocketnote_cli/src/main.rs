//! PocketNote command-line front end.
//!
//! # Responsibility
//! - Map subcommands onto `pocketnote_core` organizer operations.
//! - Open one store session per invocation and print plain-text results.

mod commands;
mod output;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use commands::{Cli, Commands, FolderCommand, NoteCommand, NoteListArgs};
use log::info;
use output::{format_folder_list, format_note_list, UNFILED_SELECTION};
use pocketnote_core::{
    filter_notes, open_store, search_notes, sort_notes, CategoryScope, CoreConfig,
    FolderColor, FolderRepository, FolderScope, FolderSortKey, KeyValueStore, Note, NoteCategory,
    NoteRepository, NoteSortKey, Organizer, SqliteKvStore,
};
use std::path::PathBuf;

const DEFAULT_DATA_DIR: &str = ".pocketnote";

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Commands::Ping = cli.command {
        println!("pocketnote_core ping={}", pocketnote_core::ping());
        println!("pocketnote_core version={}", pocketnote_core::core_version());
        return Ok(());
    }

    let config = resolve_config(cli.data_dir, cli.log_level)?;
    let conn = open_store(&config).context("failed to open the note store")?;
    let store = SqliteKvStore::try_new(&conn)?;
    let mut organizer = Organizer::new(NoteRepository::new(&store), FolderRepository::new(&store));
    organizer.load();

    match cli.command {
        Commands::Ping => Ok(()),
        Commands::Notes(command) => run_notes(&mut organizer, command),
        Commands::Folders(command) => run_folders(&mut organizer, command),
        Commands::Move { note, folder } => {
            if organizer.notes().get(&note).is_none() {
                bail!("note `{note}` not found");
            }
            if let Some(folder) = folder.as_deref() {
                if !organizer.folders().contains(folder) {
                    bail!("folder `{folder}` not found");
                }
            }
            organizer.move_note(&note, folder.as_deref())?;
            println!(
                "Moved {note} to {}",
                folder.as_deref().unwrap_or(UNFILED_SELECTION)
            );
            Ok(())
        }
    }
}

fn resolve_config(data_dir: Option<PathBuf>, log_level: Option<String>) -> Result<CoreConfig> {
    let data_dir = data_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
    let data_dir = if data_dir.is_absolute() {
        data_dir
    } else {
        std::env::current_dir()
            .context("failed to resolve the current directory")?
            .join(data_dir)
    };

    let config = match log_level {
        Some(level) => CoreConfig::new(data_dir).with_log_level(level),
        None => CoreConfig::new(data_dir),
    };
    config.validate()?;
    Ok(config)
}

fn run_notes<S: KeyValueStore>(organizer: &mut Organizer<S>, command: NoteCommand) -> Result<()> {
    match command {
        NoteCommand::List(args) => {
            let notes = list_notes(organizer, &args)?;
            print!("{}", format_note_list(&notes, organizer.folders().folders()));
        }
        NoteCommand::Add { text, category } => {
            let note = organizer.create_note_in_category(text, parse_category(&category)?)?;
            info!("event=cli_note_add module=cli status=ok note_id={}", note.id);
            println!("{}", note.id);
        }
        NoteCommand::Edit { id, text } => {
            organizer
                .update_note(&id, text)?
                .ok_or_else(|| anyhow!("note `{id}` not found"))?;
            println!("Updated {id}");
        }
        NoteCommand::Rm { id } => {
            if organizer.notes().get(&id).is_none() {
                bail!("note `{id}` not found");
            }
            organizer.delete_note(&id)?;
            println!("Deleted {id}");
        }
        NoteCommand::Category { id, category } => {
            let category = parse_category(&category)?;
            organizer
                .set_note_category(&id, category)?
                .ok_or_else(|| anyhow!("note `{id}` not found"))?;
            println!("Set {id} category = {category}");
        }
    }
    Ok(())
}

fn list_notes<S: KeyValueStore>(
    organizer: &Organizer<S>,
    args: &NoteListArgs,
) -> Result<Vec<Note>> {
    let folder = if args.folder.eq_ignore_ascii_case(UNFILED_SELECTION) {
        FolderScope::Unfiled
    } else {
        FolderScope::from_selection(&args.folder)
    };
    let category = CategoryScope::from_selection(&args.category)
        .ok_or_else(|| anyhow!("unknown category `{}`", args.category))?;
    let sort = NoteSortKey::parse(&args.sort)
        .ok_or_else(|| anyhow!("unknown sort order `{}`; expected newest|oldest|title", args.sort))?;

    let matched = search_notes(organizer.notes().notes(), args.search.as_deref().unwrap_or(""));
    let filtered = filter_notes(&matched, &folder, category);
    Ok(sort_notes(&filtered, sort))
}

fn run_folders<S: KeyValueStore>(
    organizer: &mut Organizer<S>,
    command: FolderCommand,
) -> Result<()> {
    match command {
        FolderCommand::List { sort } => {
            let key = FolderSortKey::parse(&sort)
                .ok_or_else(|| anyhow!("unknown sort order `{sort}`; expected name|date"))?;
            organizer.set_folder_sort_key(key);
            print!("{}", format_folder_list(&organizer.folders().sorted()));
        }
        FolderCommand::Add { name } => {
            let folder = organizer
                .create_folder(&name)?
                .ok_or_else(|| anyhow!("folder name cannot be blank"))?;
            println!("{}", folder.id);
        }
        FolderCommand::Rename { id, name } => {
            organizer
                .rename_folder(&id, &name)?
                .ok_or_else(|| anyhow!("folder `{id}` not found"))?;
            println!("Renamed {id}");
        }
        FolderCommand::Color { id, color } => {
            let color = FolderColor::parse(&color).ok_or_else(|| {
                anyhow!("unknown colour `{color}`; expected blue|orange|pink|purple|green")
            })?;
            organizer
                .recolor_folder(&id, color)?
                .ok_or_else(|| anyhow!("folder `{id}` not found"))?;
            println!("Set {id} colour = {}", color.name());
        }
        FolderCommand::Rm { id } => {
            if !organizer.folders().contains(&id) {
                bail!("folder `{id}` not found");
            }
            organizer.delete_folder(&id)?;
            println!("Deleted {id}");
        }
    }
    Ok(())
}

fn parse_category(value: &str) -> Result<NoteCategory> {
    NoteCategory::parse(value).ok_or_else(|| {
        anyhow!("unknown category `{value}`; expected personal|work|ideas|tasks")
    })
}
