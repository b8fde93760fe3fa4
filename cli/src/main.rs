//! Command-line client for the reading notes service.
//!
//! Commands:
//! - books list | add | delete
//! - notes add | import | search | delete
//!
//! Configuration via environment:
//! - READNOTES_URL: Base URL of the server (default: http://localhost:3000)

mod commands;

use clap::{Parser, Subcommand};

use commands::{books::BooksArgs, notes::NotesArgs};

/// Reading notes CLI
///
/// Manage books and the quotes noted from them. Prints JSON by default;
/// pass --human for formatted output.
#[derive(Parser)]
#[command(name = "readnotes")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Output human-readable formatted text instead of JSON
    #[arg(long, global = true)]
    human: bool,

    /// Server URL
    #[arg(
        long,
        env = "READNOTES_URL",
        default_value = "http://localhost:3000",
        global = true
    )]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List, add and delete books
    Books(BooksArgs),

    /// Add, import, search and delete notes
    Notes(NotesArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let client = match commands::build_client() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let base_url = cli.url.trim_end_matches('/');

    let result = match cli.command {
        Commands::Books(args) => commands::books::execute(&client, base_url, cli.human, args).await,
        Commands::Notes(args) => commands::notes::execute(&client, base_url, cli.human, args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
