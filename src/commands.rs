//! Built-in command words the assistant handles before anything reaches the model.
//!
//! Matching trims surrounding whitespace and ignores case. Commands come in
//! two kinds: [`CommandType::Direct`] commands run immediately and the user
//! is prompted again, [`CommandType::Convert`] commands are rewritten into a
//! prompt and forwarded to the agent. Any other input is passed through.
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How an input line is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    /// Executed immediately; the user is prompted again afterwards.
    Direct,
    /// Rewritten into a natural-language prompt for the agent.
    Convert,
    /// Not a built-in command.
    None,
}

/// Returned by [`BuiltinCommand::from_str`] for unrecognized input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown built-in command: '{0}'")]
pub struct UnknownCommand(pub String);

/// The fixed set of built-in commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinCommand {
    /// `exit`, `quit` or `q`.
    Exit,
    Help,
    Version,
    Clear,
    Time,
    Date,
    Weather,
}

impl BuiltinCommand {
    /// Every built-in command, direct commands first.
    pub const ALL: [BuiltinCommand; 7] = [
        BuiltinCommand::Exit,
        BuiltinCommand::Help,
        BuiltinCommand::Version,
        BuiltinCommand::Clear,
        BuiltinCommand::Time,
        BuiltinCommand::Date,
        BuiltinCommand::Weather,
    ];

    /// The words that select this command.
    pub fn names(self) -> &'static [&'static str] {
        match self {
            BuiltinCommand::Exit => &["exit", "quit", "q"],
            BuiltinCommand::Help => &["help"],
            BuiltinCommand::Version => &["version"],
            BuiltinCommand::Clear => &["clear"],
            BuiltinCommand::Time => &["time"],
            BuiltinCommand::Date => &["date"],
            BuiltinCommand::Weather => &["weather"],
        }
    }

    pub fn command_type(self) -> CommandType {
        match self {
            BuiltinCommand::Exit
            | BuiltinCommand::Help
            | BuiltinCommand::Version
            | BuiltinCommand::Clear => CommandType::Direct,
            BuiltinCommand::Time | BuiltinCommand::Date | BuiltinCommand::Weather => {
                CommandType::Convert
            }
        }
    }

    /// The prompt a convert command is rewritten into.
    pub fn prompt(self) -> Option<&'static str> {
        match self {
            BuiltinCommand::Time => Some("Please tell me the current time."),
            BuiltinCommand::Date => Some("Please tell me today's date."),
            BuiltinCommand::Weather => Some(
                "Please tell me today's weather and give me some advice on what to wear.",
            ),
            _ => None,
        }
    }

    fn description(self) -> &'static str {
        match self {
            BuiltinCommand::Exit => "Exit the program",
            BuiltinCommand::Help => "Show this help message",
            BuiltinCommand::Version => "Show version information",
            BuiltinCommand::Clear => "Clear the screen",
            BuiltinCommand::Time => "Ask for the current time",
            BuiltinCommand::Date => "Ask for today's date",
            BuiltinCommand::Weather => "Ask for the weather and what to wear",
        }
    }
}

impl FromStr for BuiltinCommand {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let word = s.trim().to_lowercase();
        BuiltinCommand::ALL
            .into_iter()
            .find(|command| command.names().contains(&word.as_str()))
            .ok_or_else(|| UnknownCommand(s.to_string()))
    }
}

impl fmt::Display for BuiltinCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.names()[0])
    }
}

/// What the caller should do with an input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Leave the input loop.
    Exit,
    /// Print the text and prompt again.
    Display(String),
    /// Clear the terminal and prompt again.
    ClearScreen,
    /// Send this prompt to the agent in place of the input.
    Forward(String),
    /// Not a built-in command; send the input unchanged.
    PassThrough(String),
}

/// Returns how `input` would be handled, without running anything.
pub fn get_command_type(input: &str) -> CommandType {
    input
        .parse::<BuiltinCommand>()
        .map_or(CommandType::None, BuiltinCommand::command_type)
}

/// Checks whether `input` names a built-in command.
pub fn is_builtin_command(input: &str) -> bool {
    get_command_type(input) != CommandType::None
}

/// Resolves an input line to the action the caller should take.
///
/// No side effects happen here: exiting and clearing the screen are left to
/// the caller.
///
/// # Example
///
/// ```
/// # use codepatch::{process_builtin_command, CommandOutcome};
/// assert_eq!(process_builtin_command("  QUIT "), CommandOutcome::Exit);
/// assert_eq!(
///     process_builtin_command("time"),
///     CommandOutcome::Forward("Please tell me the current time.".to_string())
/// );
/// assert_eq!(
///     process_builtin_command("fix my code"),
///     CommandOutcome::PassThrough("fix my code".to_string())
/// );
/// ```
pub fn process_builtin_command(input: &str) -> CommandOutcome {
    let Ok(command) = input.parse::<BuiltinCommand>() else {
        return CommandOutcome::PassThrough(input.to_string());
    };
    match command {
        BuiltinCommand::Exit => CommandOutcome::Exit,
        BuiltinCommand::Help => CommandOutcome::Display(help_text()),
        BuiltinCommand::Version => CommandOutcome::Display(format!(
            "{} v{}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        )),
        BuiltinCommand::Clear => CommandOutcome::ClearScreen,
        BuiltinCommand::Time | BuiltinCommand::Date | BuiltinCommand::Weather => {
            CommandOutcome::Forward(command.prompt().unwrap_or_default().to_string())
        }
    }
}

/// The text shown by the `help` command.
pub fn help_text() -> String {
    let mut text = String::from("Available commands:\n");
    for (heading, kind) in [
        ("Run immediately:", CommandType::Direct),
        ("Sent to the assistant:", CommandType::Convert),
    ] {
        text.push('\n');
        text.push_str(heading);
        text.push('\n');
        for command in BuiltinCommand::ALL
            .into_iter()
            .filter(|c| c.command_type() == kind)
        {
            text.push_str(&format!(
                "  {:<13}- {}\n",
                command.names().join("/"),
                command.description()
            ));
        }
    }
    text.trim_end().to_string()
}
