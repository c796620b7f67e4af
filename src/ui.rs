// UI layer: a numbered text menu driven through a small `Console` trait.
// The terminal implementation uses `dialoguer` for line input and
// `crossterm` for colouring, or plain stdin/stdout when input is piped.

use crate::book::{parse_read_answer, parse_year, NewBook};
use crate::catalog::{Library, SearchField};
use crate::error::CatalogError;
use anyhow::{bail, Result};
use console::Term;
use crossterm::style::{style, Stylize};
use dialoguer::Input;
use std::io::{self, BufRead, StdinLock, Stdout, Write};
use tracing::warn;

/// Line-oriented console used by the menu. `read_line` blocks until the
/// user submits a line; an error means no more input is coming.
pub trait Console {
    fn read_line(&mut self, prompt: &str) -> Result<String>;

    fn say(&mut self, line: &str);

    fn success(&mut self, line: &str) {
        self.say(line);
    }

    fn error(&mut self, line: &str) {
        self.say(line);
    }
}

/// Console over any line reader and writer. Used when nobody is sitting
/// at a terminal (piped or redirected input), where `dialoguer` would
/// return empty answers without reading anything.
pub struct StreamConsole<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> StreamConsole<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        StreamConsole { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<R: BufRead, W: Write> Console for StreamConsole<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        write!(self.writer, "{}: ", prompt)?;
        self.writer.flush()?;
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            bail!("input closed");
        }
        Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
    }

    fn say(&mut self, line: &str) {
        if let Err(e) = writeln!(self.writer, "{}", line) {
            warn!(error = %e, "could not write to output");
        }
    }
}

/// Console backed by the process terminal. Falls back to plain line
/// reading from stdin when the terminal is not attended.
pub enum TerminalConsole {
    Interactive,
    Piped(StreamConsole<StdinLock<'static>, Stdout>),
}

impl TerminalConsole {
    pub fn new() -> Self {
        // dialoguer prompts on stderr, so that is the handle that must be a tty.
        if Term::stderr().features().is_attended() {
            TerminalConsole::Interactive
        } else {
            TerminalConsole::Piped(StreamConsole::new(io::stdin().lock(), io::stdout()))
        }
    }
}

impl Default for TerminalConsole {
    fn default() -> Self {
        TerminalConsole::new()
    }
}

impl Console for TerminalConsole {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        match self {
            TerminalConsole::Interactive => {
                // `allow_empty` so an empty answer reaches the caller instead of
                // re-prompting (e.g. an empty year must be reported as invalid).
                let line: String = Input::new()
                    .with_prompt(prompt)
                    .allow_empty(true)
                    .interact_text()?;
                Ok(line)
            }
            TerminalConsole::Piped(stream) => stream.read_line(prompt),
        }
    }

    fn say(&mut self, line: &str) {
        match self {
            TerminalConsole::Interactive => println!("{}", line),
            TerminalConsole::Piped(stream) => stream.say(line),
        }
    }

    fn success(&mut self, line: &str) {
        match self {
            TerminalConsole::Interactive => println!("{}", style(line).green()),
            TerminalConsole::Piped(stream) => stream.say(line),
        }
    }

    fn error(&mut self, line: &str) {
        match self {
            TerminalConsole::Interactive => println!("{}", style(line).red()),
            TerminalConsole::Piped(stream) => stream.say(line),
        }
    }
}

/// The six menu entries, numbered 1-6 on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    Remove,
    Search,
    List,
    Statistics,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::Add),
            "2" => Some(MenuChoice::Remove),
            "3" => Some(MenuChoice::Search),
            "4" => Some(MenuChoice::List),
            "5" => Some(MenuChoice::Statistics),
            "6" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

fn print_menu(console: &mut impl Console) {
    console.say("");
    console.say("📚 Personal Library Manager");
    console.say("1. Add a book");
    console.say("2. Remove a book");
    console.say("3. Search for a book");
    console.say("4. Display all books");
    console.say("5. Display statistics");
    console.say("6. Exit");
}

/// Main interactive menu. Runs until the user picks "Exit" or input runs
/// out, then saves the library one last time.
pub fn main_menu(mut library: Library, console: &mut impl Console) -> Result<()> {
    loop {
        print_menu(console);
        let choice = match console.read_line("Enter your choice") {
            Ok(choice) => choice,
            Err(e) => {
                warn!(error = %e, "input closed, leaving menu");
                break;
            }
        };
        let outcome = match MenuChoice::parse(&choice) {
            Some(MenuChoice::Exit) => break,
            Some(MenuChoice::Add) => handle_add(&mut library, console),
            Some(MenuChoice::Remove) => handle_remove(&mut library, console),
            Some(MenuChoice::Search) => handle_search(&library, console),
            Some(MenuChoice::List) => {
                show_books(&library, console);
                Ok(())
            }
            Some(MenuChoice::Statistics) => {
                show_statistics(&library, console);
                Ok(())
            }
            None => {
                console.error("Invalid choice. Please try again.");
                Ok(())
            }
        };
        if let Err(e) = outcome {
            warn!(error = %e, "input closed mid-operation, leaving menu");
            break;
        }
    }

    match library.save() {
        Ok(()) => console.success("💾 Library saved to file. Goodbye!"),
        Err(e) => console.error(&format!("Could not save library: {}", e)),
    }
    Ok(())
}

/// Collect the fields of a new book in order and add it.
fn handle_add(library: &mut Library, console: &mut impl Console) -> Result<()> {
    let title = console.read_line("Enter the book title")?;
    let author = console.read_line("Enter the author")?;
    let year = console.read_line("Enter the publication year")?;
    if parse_year(&year).is_err() {
        console.error("Invalid year format. Please enter a valid number.");
        return Ok(());
    }
    let genre = console.read_line("Enter the genre")?;
    let read = console.read_line("Have you read this book? (yes/no)")?;

    let draft = NewBook {
        title: title.trim().to_string(),
        author: author.trim().to_string(),
        year,
        genre: genre.trim().to_string(),
        read: parse_read_answer(&read),
    };

    match library.add(draft) {
        Ok(_) => console.success("✅ Book added successfully!"),
        Err(CatalogError::InvalidYear { .. }) => {
            console.error("Invalid year format. Please enter a valid number.")
        }
        Err(e) => console.error(&format!("Could not save library: {}", e)),
    }
    Ok(())
}

fn handle_remove(library: &mut Library, console: &mut impl Console) -> Result<()> {
    let title = console.read_line("Enter the title of the book to remove")?;
    match library.remove(title.trim()) {
        Ok(0) => console.error("❌ Book not found."),
        Ok(1) => console.success("✅ Book removed successfully!"),
        Ok(n) => console.success(&format!("✅ Removed {} books titled \"{}\".", n, title.trim())),
        Err(e) => console.error(&format!("Could not save library: {}", e)),
    }
    Ok(())
}

fn handle_search(library: &Library, console: &mut impl Console) -> Result<()> {
    console.say("Search by:");
    console.say("1. Title");
    console.say("2. Author");
    let option = console.read_line("Enter your choice")?;
    let keyword = console.read_line("Enter the search term")?;
    let field = match option.trim() {
        "1" => SearchField::Title,
        "2" => SearchField::Author,
        _ => {
            console.error("Invalid search option. Please choose 1 or 2.");
            return Ok(());
        }
    };

    let results = library.search(field, keyword.trim());
    if results.is_empty() {
        console.error("❌ No matching books found.");
        return Ok(());
    }
    console.say("");
    console.say("🔍 Matching Books:");
    for book in results {
        console.say(&format!("- {}", book));
    }
    Ok(())
}

fn show_books(library: &Library, console: &mut impl Console) {
    if library.is_empty() {
        console.say("📚 Your library is empty.");
        return;
    }
    console.say("");
    console.say("📚 Your Library Collection:");
    for (i, book) in library.list().iter().enumerate() {
        console.say(&format!("{}. {}", i + 1, book));
    }
}

fn show_statistics(library: &Library, console: &mut impl Console) {
    let Some(stats) = library.statistics() else {
        console.say("📉 No books in the library.");
        return;
    };
    console.say("");
    console.say("📊 Library Statistics:");
    console.say(&format!("Total books: {}", stats.total));
    console.say(&format!("Read books: {}", stats.read));
    console.say(&format!("Unread books: {}", stats.unread));
    console.say(&format!("Percentage read: {:.2}%", stats.percent_read));
}
