//! Command parsing for the interactive prompt.
//!
//! # Responsibility
//! - Map the first input token onto the closed set of known commands.
//! - Keep the command table statically enumerable for `help` and tests.
//!
//! # Invariants
//! - Dispatch is an explicit match; there is no string-keyed handler
//!   lookup anywhere.
//! - Command matching is case-insensitive; arguments keep their case.

/// Which aggregate a command mutates, if any. The loop saves the touched
/// snapshot after each successful mutating command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    None,
    Contacts,
    Notes,
}

/// The closed set of user commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    AddContact,
    ChangePhone,
    ShowPhone,
    ShowContacts,
    AddBirthday,
    ShowBirthday,
    NextBirthdays,
    AddAddress,
    ChangeAddress,
    ShowAddress,
    DeleteAddress,
    AddEmail,
    ChangeEmail,
    ShowEmail,
    DeleteEmail,
    Search,
    Delete,
    NoteAdd,
    NoteFind,
    NoteEdit,
    NoteDelete,
    NoteShow,
    Help,
    Close,
}

impl Command {
    /// Every command, in `help` display order.
    pub const ALL: [Command; 24] = [
        Command::AddContact,
        Command::ChangePhone,
        Command::ShowPhone,
        Command::ShowContacts,
        Command::AddBirthday,
        Command::ShowBirthday,
        Command::NextBirthdays,
        Command::AddAddress,
        Command::ChangeAddress,
        Command::ShowAddress,
        Command::DeleteAddress,
        Command::AddEmail,
        Command::ChangeEmail,
        Command::ShowEmail,
        Command::DeleteEmail,
        Command::Search,
        Command::Delete,
        Command::NoteAdd,
        Command::NoteFind,
        Command::NoteEdit,
        Command::NoteDelete,
        Command::NoteShow,
        Command::Help,
        Command::Close,
    ];

    /// The token that invokes this command.
    pub fn name(self) -> &'static str {
        match self {
            Self::AddContact => "add-contact",
            Self::ChangePhone => "change-phone",
            Self::ShowPhone => "show-phone",
            Self::ShowContacts => "show-contacts",
            Self::AddBirthday => "add-birthday",
            Self::ShowBirthday => "show-birthday",
            Self::NextBirthdays => "next-birthdays",
            Self::AddAddress => "add-address",
            Self::ChangeAddress => "change-address",
            Self::ShowAddress => "show-address",
            Self::DeleteAddress => "delete-address",
            Self::AddEmail => "add-email",
            Self::ChangeEmail => "change-email",
            Self::ShowEmail => "show-email",
            Self::DeleteEmail => "delete-email",
            Self::Search => "search",
            Self::Delete => "delete",
            Self::NoteAdd => "nadd",
            Self::NoteFind => "nfind",
            Self::NoteEdit => "nedit",
            Self::NoteDelete => "ndel",
            Self::NoteShow => "note",
            Self::Help => "help",
            Self::Close => "close",
        }
    }

    /// One-line description shown by `help`.
    pub fn description(self) -> &'static str {
        match self {
            Self::AddContact => "Add a new contact.",
            Self::ChangePhone => "Change a phone number for a contact.",
            Self::ShowPhone => "Show phone numbers for a contact.",
            Self::ShowContacts => "Show all contacts.",
            Self::AddBirthday => "Add a birthday for a contact.",
            Self::ShowBirthday => "Show the birthday of a contact.",
            Self::NextBirthdays => "Show upcoming birthdays.",
            Self::AddAddress => "Add an address for a contact.",
            Self::ChangeAddress => "Change the address of a contact.",
            Self::ShowAddress => "Show the address of a contact.",
            Self::DeleteAddress => "Delete the address of a contact.",
            Self::AddEmail => "Add an email for a contact.",
            Self::ChangeEmail => "Change the email of a contact.",
            Self::ShowEmail => "Show the email of a contact.",
            Self::DeleteEmail => "Delete the email of a contact.",
            Self::Search => "Search contacts by name.",
            Self::Delete => "Delete a contact.",
            Self::NoteAdd => "Add a new note.",
            Self::NoteFind => "Find notes by #tags and text.",
            Self::NoteEdit => "Edit an existing note.",
            Self::NoteDelete => "Delete a note by id.",
            Self::NoteShow => "Show a note by id.",
            Self::Help => "Show available commands.",
            Self::Close => "Save and close the program.",
        }
    }

    /// Which snapshot to write after this command succeeds.
    pub fn mutation(self) -> Mutation {
        match self {
            Self::AddContact
            | Self::ChangePhone
            | Self::AddBirthday
            | Self::AddAddress
            | Self::ChangeAddress
            | Self::DeleteAddress
            | Self::AddEmail
            | Self::ChangeEmail
            | Self::DeleteEmail
            | Self::Delete => Mutation::Contacts,
            Self::NoteAdd | Self::NoteEdit | Self::NoteDelete => Mutation::Notes,
            _ => Mutation::None,
        }
    }

    /// Resolves a lowercased command token.
    pub fn parse(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "add-contact" => Some(Self::AddContact),
            "change-phone" => Some(Self::ChangePhone),
            "show-phone" => Some(Self::ShowPhone),
            "show-contacts" => Some(Self::ShowContacts),
            "add-birthday" => Some(Self::AddBirthday),
            "show-birthday" => Some(Self::ShowBirthday),
            // The underscore form is the historical spelling; keep it working.
            "next-birthdays" | "next_birthdays" => Some(Self::NextBirthdays),
            "add-address" => Some(Self::AddAddress),
            "change-address" => Some(Self::ChangeAddress),
            "show-address" => Some(Self::ShowAddress),
            "delete-address" => Some(Self::DeleteAddress),
            "add-email" => Some(Self::AddEmail),
            "change-email" => Some(Self::ChangeEmail),
            "show-email" => Some(Self::ShowEmail),
            "delete-email" => Some(Self::DeleteEmail),
            "search" => Some(Self::Search),
            "delete" => Some(Self::Delete),
            "nadd" => Some(Self::NoteAdd),
            "nfind" => Some(Self::NoteFind),
            "nedit" => Some(Self::NoteEdit),
            "ndel" => Some(Self::NoteDelete),
            "note" => Some(Self::NoteShow),
            "help" => Some(Self::Help),
            "close" => Some(Self::Close),
            _ => None,
        }
    }
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    /// Nothing but whitespace.
    Empty,
    /// First token is not a known command.
    Unknown(String),
    /// A known command plus its argument tokens.
    Command(Command, Vec<String>),
}

/// Splits an input line into a command and argument tokens.
pub fn parse_line(input: &str) -> ParsedLine {
    let mut tokens = input.split_whitespace();
    let Some(first) = tokens.next() else {
        return ParsedLine::Empty;
    };
    match Command::parse(first) {
        Some(command) => ParsedLine::Command(command, tokens.map(str::to_string).collect()),
        None => ParsedLine::Unknown(first.to_string()),
    }
}
