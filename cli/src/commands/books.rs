//! BOOKS commands - list, add and delete books.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use serde::{Deserialize, Serialize};

use super::{Deleted, HumanReadable, make_empty_request, make_request, output};

/// Arguments for the books command.
#[derive(Args)]
pub struct BooksArgs {
    #[command(subcommand)]
    pub command: BooksCommand,
}

#[derive(Subcommand)]
pub enum BooksCommand {
    /// List books, newest first
    List,

    /// Add a book
    Add {
        /// Book title
        #[arg(long)]
        title: String,

        /// Book author
        #[arg(long)]
        author: Option<String>,
    },

    /// Delete a book (its notes are kept but hidden)
    Delete {
        /// Book ID
        book_id: i64,
    },
}

/// A book as returned by the server.
#[derive(Debug, Deserialize, Serialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(transparent)]
pub struct BookList(pub Vec<Book>);

/// Request body for creating a book.
#[derive(Debug, Serialize)]
struct CreateBookRequest<'a> {
    book: NewBook<'a>,
}

#[derive(Debug, Serialize)]
struct NewBook<'a> {
    title: &'a str,
    author: Option<&'a str>,
}

impl HumanReadable for Book {
    fn print_human(&self) {
        println!("{}", "Book saved".green().bold());
        println!();
        println!("  {} {}", "ID:".cyan(), self.id);
        println!("  {} {}", "Title:".cyan(), self.title);
        if let Some(author) = &self.author {
            println!("  {} {}", "Author:".cyan(), author);
        }
    }
}

impl HumanReadable for BookList {
    fn print_human(&self) {
        println!("{}", "Books".green().bold());
        println!("{}", "=".repeat(60));

        if self.0.is_empty() {
            println!("  {}", "(No books)".dimmed());
            return;
        }

        for book in &self.0 {
            let author = book.author.as_deref().unwrap_or("unknown author");
            println!(
                "  {:>6}  {} {}",
                book.id.to_string().cyan(),
                book.title.bold(),
                format!("({})", author).dimmed()
            );
        }

        println!();
        println!("  {} {}", "Total:".cyan(), self.0.len());
    }
}

/// Execute a books command.
pub async fn execute(
    client: &reqwest::Client,
    base_url: &str,
    human: bool,
    args: BooksArgs,
) -> Result<()> {
    match args.command {
        BooksCommand::List => {
            let url = format!("{}/api/books", base_url);
            let books: BookList = make_request(client.get(&url)).await?;
            output(&books, human)
        }
        BooksCommand::Add { title, author } => {
            let url = format!("{}/api/books", base_url);
            let body = CreateBookRequest {
                book: NewBook {
                    title: &title,
                    author: author.as_deref(),
                },
            };
            let book: Book = make_request(client.post(&url).json(&body)).await?;
            output(&book, human)
        }
        BooksCommand::Delete { book_id } => {
            let url = format!("{}/api/books/{}", base_url, book_id);
            make_empty_request(client.delete(&url)).await?;
            output(
                &Deleted {
                    kind: "book",
                    id: book_id,
                    deleted: true,
                },
                human,
            )
        }
    }
}
