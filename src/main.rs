use anyhow::Result;
use clap::{Parser, Subcommand};

use memoroa::cli::{handle_backup_command, handle_note_command, BackupCommands, NoteCommands};
use memoroa::config::{paths::MemoroaPaths, settings::Settings};
use memoroa::storage::Storage;

#[derive(Parser)]
#[command(
    name = "memoroa",
    author = "Kaylee Beyene",
    version,
    about = "Terminal note-taking application with encrypted backups",
    long_about = "Memoroa keeps your notes in a local JSON store and can pack \
                  them into a single passphrase-encrypted backup file. Without \
                  the passphrase a backup is just noise: there is no recovery \
                  mechanism."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Note management commands
    #[command(subcommand)]
    Note(NoteCommands),

    /// Backup management commands
    #[command(subcommand)]
    Backup(BackupCommands),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = MemoroaPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(&paths)?;
    storage.load_all()?;

    let result = match cli.command {
        Some(Commands::Note(cmd)) => handle_note_command(&mut storage, cmd),
        Some(Commands::Backup(cmd)) => handle_backup_command(&paths, &settings, &mut storage, cmd),
        Some(Commands::Config) => {
            println!("Memoroa Configuration");
            println!("=====================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Notes file:       {}", paths.notes_file().display());
            println!("Backup directory: {}", paths.backup_dir().display());
            println!();
            println!("Settings:");
            println!("  Backup filename stem: {}", settings.backup_filename_stem);
            Ok(())
        }
        None => {
            println!("Memoroa - Terminal note-taking with encrypted backups");
            println!();
            println!("Run 'memoroa --help' for usage information.");
            Ok(())
        }
    };

    match result {
        Ok(()) => Ok(()),
        // A cancelled prompt or picker aborts silently; it is not a failure
        Err(e) if e.is_cancelled() => Ok(()),
        Err(e) => Err(e.into()),
    }
}
