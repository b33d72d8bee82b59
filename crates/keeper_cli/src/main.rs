//! Interactive prompt for keeper.
//!
//! # Responsibility
//! - Own the terminal: prompt, parse, dispatch, render in color.
//! - Load both snapshots at startup and save the touched one after every
//!   successful mutating command.
//!
//! # Invariants
//! - Both aggregates live here and are passed by reference; there is no
//!   process-global state.
//! - A missing snapshot means "start empty"; a corrupt one aborts before
//!   anything could overwrite it.

mod command;
mod handlers;
mod note_handlers;

use crate::command::{parse_line, Command, Mutation, ParsedLine};
use crate::handlers::{CliError, CliResult};
use chrono::{Local, NaiveDate};
use keeper_core::{
    default_log_level, init_logging, load_address_book, load_notebook, save_address_book,
    save_notebook, AddressBook, BirthdayPolicy, Notebook, NotebookError, StoreError,
};
use log::{info, warn};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const BLUE: &str = "\x1b[94m";
const GREEN: &str = "\x1b[92m";
const RED: &str = "\x1b[91m";
const YELLOW: &str = "\x1b[93m";
const RESET: &str = "\x1b[0m";

const CONTACTS_FILE: &str = "contacts.json";
const NOTES_FILE: &str = "notes.json";

fn main() -> ExitCode {
    let data_dir =
        PathBuf::from(std::env::var("KEEPER_DATA_DIR").unwrap_or_else(|_| ".".to_string()));
    setup_logging(&data_dir);

    let policy = if std::env::var("KEEPER_REJECT_FUTURE_BIRTHDAYS").as_deref() == Ok("1") {
        BirthdayPolicy::RejectFuture
    } else {
        BirthdayPolicy::AllowFuture
    };

    println!("{YELLOW}Welcome back, agent.\nGlad to see you alive.{RESET}\n");

    let contacts_path = data_dir.join(CONTACTS_FILE);
    let notes_path = data_dir.join(NOTES_FILE);

    let mut started_empty = false;
    let mut book = match load_address_book(&contacts_path) {
        Ok(book) => book,
        Err(StoreError::Missing(_)) => {
            started_empty = true;
            AddressBook::new()
        }
        Err(err) => {
            eprintln!("{RED}Cannot load {}: {err}{RESET}", contacts_path.display());
            return ExitCode::FAILURE;
        }
    };
    let mut notebook = match load_notebook(&notes_path) {
        Ok(notebook) => notebook,
        Err(StoreError::Missing(_)) => {
            started_empty = true;
            Notebook::new()
        }
        Err(err) => {
            eprintln!("{RED}Cannot load {}: {err}{RESET}", notes_path.display());
            return ExitCode::FAILURE;
        }
    };
    if started_empty {
        println!("{BLUE}DB is empty. Starting with an empty DB.{RESET}");
    }
    info!(
        "event=db_loaded module=cli status=ok contacts={} notes={}",
        book.len(),
        notebook.len()
    );

    loop {
        let Some(line) = prompt(&format!("{BLUE}Enter a command: {RESET}")) else {
            break;
        };
        let (cmd, args) = match parse_line(&line) {
            ParsedLine::Empty => {
                println!("{RED}No command.{RESET}");
                continue;
            }
            ParsedLine::Unknown(token) => {
                println!("{RED}Invalid command `{token}`.{RESET}");
                continue;
            }
            ParsedLine::Command(cmd, args) => (cmd, args),
        };

        if cmd == Command::Close {
            break;
        }
        if cmd == Command::Help {
            print_help();
            continue;
        }

        let today = Local::now().date_naive();
        let outcome = run_command(cmd, &args, &mut book, &mut notebook, today, policy);
        match &outcome {
            Ok(status) => println!("{GREEN}{status}{RESET}"),
            Err(err) => println!("{RED}{err}{RESET}"),
        }

        if outcome.is_ok() {
            match cmd.mutation() {
                Mutation::Contacts => {
                    persist(&contacts_path, || save_address_book(&contacts_path, &book))
                }
                Mutation::Notes => persist(&notes_path, || save_notebook(&notes_path, &notebook)),
                Mutation::None => {}
            }
        }
    }

    println!("{YELLOW}Bye! Hope to see you alive next time.{RESET}");
    info!("event=session_end module=cli status=ok");
    ExitCode::SUCCESS
}

/// Dispatches one parsed command. The `nadd`/`nedit` arms prompt for the
/// extra input lines the note workflow collects interactively.
fn run_command(
    cmd: Command,
    args: &[String],
    book: &mut AddressBook,
    notebook: &mut Notebook,
    today: NaiveDate,
    policy: BirthdayPolicy,
) -> CliResult<String> {
    match cmd {
        Command::AddContact => handlers::add_contact(args, book),
        Command::ChangePhone => handlers::change_phone(args, book),
        Command::ShowPhone => handlers::show_phone(args, book),
        Command::ShowContacts => handlers::show_contacts(book),
        Command::AddBirthday => handlers::add_birthday(args, book, today, policy),
        Command::ShowBirthday => handlers::show_birthday(args, book),
        Command::NextBirthdays => handlers::next_birthdays(args, book, today),
        Command::AddAddress => handlers::add_address(args, book),
        Command::ChangeAddress => handlers::change_address(args, book),
        Command::ShowAddress => handlers::show_address(args, book),
        Command::DeleteAddress => handlers::delete_address(args, book),
        Command::AddEmail => handlers::add_email(args, book),
        Command::ChangeEmail => handlers::change_email(args, book),
        Command::ShowEmail => handlers::show_email(args, book),
        Command::DeleteEmail => handlers::delete_email(args, book),
        Command::Search => handlers::search(args, book),
        Command::Delete => handlers::delete_contact(args, book),
        Command::NoteAdd => {
            let text = args.join(" ");
            if text.trim().is_empty() {
                return Err(CliError::Notebook(NotebookError::EmptyText));
            }
            let tags = prompt_tags();
            note_handlers::add_note(notebook, &text, &tags)
        }
        Command::NoteFind => note_handlers::find_notes(notebook, args),
        Command::NoteEdit => {
            let id_token = args.first().cloned().unwrap_or_default();
            // Validate the id before prompting for replacement input.
            note_handlers::ensure_note(notebook, &id_token)?;
            let new_text =
                prompt(&format!("{BLUE}Enter new text for the note: {RESET}")).unwrap_or_default();
            let new_tags = prompt_tags();
            note_handlers::edit_note(notebook, &id_token, &new_text, &new_tags)
        }
        Command::NoteDelete => {
            let id_token = args.first().cloned().unwrap_or_default();
            note_handlers::delete_note(notebook, &id_token)
        }
        Command::NoteShow => {
            let id_token = args.first().cloned().unwrap_or_default();
            note_handlers::show_note(notebook, &id_token)
        }
        // Handled by the loop before dispatch.
        Command::Help | Command::Close => Ok(String::new()),
    }
}

fn prompt_tags() -> Vec<String> {
    let line = prompt(&format!(
        "{BLUE}Enter tags separated by commas (optional): {RESET}"
    ))
    .unwrap_or_default();
    note_handlers::split_tag_line(&line)
}

/// Prints `label` and reads one input line. `None` on EOF ends the
/// session.
fn prompt(label: &str) -> Option<String> {
    print!("{label}");
    let _ = io::stdout().flush();
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim_end_matches(['\n', '\r']).to_string()),
    }
}

fn print_help() {
    println!("Available commands:");
    for cmd in Command::ALL {
        println!(
            "{GREEN}{:<16}{RESET}{}",
            format!("{}:", cmd.name()),
            cmd.description()
        );
    }
}

fn persist(path: &Path, save: impl FnOnce() -> Result<(), StoreError>) {
    if let Err(err) = save() {
        println!("{RED}Could not save {}: {err}{RESET}", path.display());
        warn!("event=snapshot_save module=cli status=error err={err}");
    }
}

fn setup_logging(data_dir: &Path) {
    let log_dir = std::env::var("KEEPER_LOG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| data_dir.join("logs"));
    // Core logging insists on an absolute directory.
    let log_dir = if log_dir.is_absolute() {
        log_dir
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(log_dir),
            Err(_) => return,
        }
    };
    let Some(log_dir) = log_dir.to_str() else {
        return;
    };
    if let Err(err) = init_logging(default_log_level(), log_dir) {
        eprintln!("{YELLOW}Logging disabled: {err}{RESET}");
    }
}
