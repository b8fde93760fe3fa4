//! NOTES commands - add, import, search and delete notes.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    Deleted, HumanReadable, format_timestamp, make_empty_request, make_request, output, truncate,
};

/// Largest batch the server accepts in one import.
const MAX_IMPORT_NOTES: usize = 20;

/// Arguments for the notes command.
#[derive(Args)]
pub struct NotesArgs {
    #[command(subcommand)]
    pub command: NotesCommand,
}

#[derive(Subcommand)]
pub enum NotesCommand {
    /// Add a note to a book
    Add {
        /// Book ID
        book_id: i64,

        /// Page the quote is from
        #[arg(long)]
        page: i64,

        /// Quoted text
        #[arg(long)]
        quote: String,

        /// Personal memo
        #[arg(long)]
        memo: Option<String>,
    },

    /// Create several notes at once from a JSON file (all or nothing)
    Import {
        /// Book ID
        book_id: i64,

        /// JSON file holding an array of {page, quote, memo} objects
        file: PathBuf,
    },

    /// Search the notes of a book
    Search(SearchArgs),

    /// Delete a note
    Delete {
        /// Note ID
        note_id: i64,
    },
}

/// Arguments for notes search.
#[derive(Args, Debug, Serialize)]
pub struct SearchArgs {
    /// Book ID
    #[serde(skip)]
    pub book_id: i64,

    /// Keywords; every one must appear in the quote or memo
    #[arg(short = 'q', long = "query")]
    #[serde(rename = "q", skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    /// Lowest page to include
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_from: Option<u32>,

    /// Highest page to include
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_to: Option<u32>,

    /// Result page (1-based)
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Results per page (max 200)
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// A note as returned by the server.
#[derive(Debug, Deserialize, Serialize)]
pub struct Note {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_id: Option<i64>,
    pub page: i32,
    pub quote: String,
    pub memo: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SearchMeta {
    pub total_count: i64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: i64,
}

/// Response from a notes search.
#[derive(Debug, Deserialize, Serialize)]
pub struct SearchResponse {
    pub notes: Vec<Note>,
    pub meta: SearchMeta,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct BulkMeta {
    pub created_count: usize,
}

/// Response from a bulk import.
#[derive(Debug, Deserialize, Serialize)]
pub struct BulkResponse {
    pub notes: Vec<Note>,
    pub meta: BulkMeta,
}

#[derive(Debug, Serialize)]
struct CreateNoteRequest<'a> {
    note: NewNote<'a>,
}

#[derive(Debug, Serialize)]
struct NewNote<'a> {
    page: i64,
    quote: &'a str,
    memo: Option<&'a str>,
}

fn print_note(note: &Note) {
    println!(
        "  {} {}  {}",
        format!("p.{}", note.page).yellow(),
        format!("#{}", note.id).dimmed(),
        truncate(&note.quote, 70)
    );
    if let Some(memo) = &note.memo {
        println!("      {} {}", "memo:".cyan(), truncate(memo, 66));
    }
    println!("      {}", format_timestamp(&note.created_at).dimmed());
}

impl HumanReadable for Note {
    fn print_human(&self) {
        println!("{}", "Note saved".green().bold());
        println!();
        print_note(self);
    }
}

impl HumanReadable for SearchResponse {
    fn print_human(&self) {
        println!(
            "{} {}",
            "Notes".green().bold(),
            format!(
                "(page {} of {}, {} matches)",
                self.meta.page, self.meta.total_pages, self.meta.total_count
            )
            .dimmed()
        );
        println!("{}", "=".repeat(80));

        if self.notes.is_empty() {
            println!("  {}", "(No matching notes)".dimmed());
            return;
        }

        for note in &self.notes {
            print_note(note);
        }
    }
}

impl HumanReadable for BulkResponse {
    fn print_human(&self) {
        println!(
            "{}",
            format!("Imported {} notes", self.meta.created_count)
                .green()
                .bold()
        );
        println!();
        for note in &self.notes {
            print_note(note);
        }
    }
}

/// Read an import file.
///
/// Accepts either a bare array or an object with a `notes` array. The
/// items are sent untouched; the server validates them.
fn read_import_file(path: &Path) -> Result<Vec<Value>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let json: Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;

    let notes = match json {
        Value::Array(items) => items,
        Value::Object(mut obj) => match obj.remove("notes") {
            Some(Value::Array(items)) => items,
            _ => bail!("{} must hold an array of notes", path.display()),
        },
        _ => bail!("{} must hold an array of notes", path.display()),
    };

    if notes.is_empty() {
        bail!("{} holds no notes", path.display());
    }
    if notes.len() > MAX_IMPORT_NOTES {
        bail!(
            "{} holds {} notes; at most {} can be imported at once",
            path.display(),
            notes.len(),
            MAX_IMPORT_NOTES
        );
    }

    Ok(notes)
}

/// Execute a notes command.
pub async fn execute(
    client: &reqwest::Client,
    base_url: &str,
    human: bool,
    args: NotesArgs,
) -> Result<()> {
    match args.command {
        NotesCommand::Add {
            book_id,
            page,
            quote,
            memo,
        } => {
            let url = format!("{}/api/books/{}/notes", base_url, book_id);
            let body = CreateNoteRequest {
                note: NewNote {
                    page,
                    quote: &quote,
                    memo: memo.as_deref(),
                },
            };
            let note: Note = make_request(client.post(&url).json(&body)).await?;
            output(&note, human)
        }
        NotesCommand::Import { book_id, file } => {
            let notes = read_import_file(&file)?;
            let url = format!("{}/api/books/{}/notes/bulk", base_url, book_id);
            let body = serde_json::json!({ "notes": notes });
            let response: BulkResponse = make_request(client.post(&url).json(&body)).await?;
            output(&response, human)
        }
        NotesCommand::Search(search) => {
            let url = format!("{}/api/books/{}/notes", base_url, search.book_id);
            let response: SearchResponse = make_request(client.get(&url).query(&search)).await?;
            output(&response, human)
        }
        NotesCommand::Delete { note_id } => {
            let url = format!("{}/api/notes/{}", base_url, note_id);
            make_empty_request(client.delete(&url)).await?;
            output(
                &Deleted {
                    kind: "note",
                    id: note_id,
                    deleted: true,
                },
                human,
            )
        }
    }
}
