//! Parsing of the slash commands typed at either screen.

/// Commands accepted on the auth screen.
pub const AUTH_COMMANDS: &[&str] = &["/login", "/register", "/help", "/quit"];

/// Commands accepted on the chat screen.
pub const CHAT_COMMANDS: &[&str] = &[
    "/edit", "/prev", "/history", "/clear", "/logout", "/help", "/quit",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthCommand {
    /// Anything that is not a command: the email to sign in with.
    Email(String),
    Login,
    Register,
    Help,
    Quit,
    Unknown(String),
}

impl AuthCommand {
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        if !line.starts_with('/') {
            return Some(Self::Email(line.to_string()));
        }
        Some(match line {
            "/login" => Self::Login,
            "/register" => Self::Register,
            "/help" => Self::Help,
            "/quit" | "/exit" => Self::Quit,
            other => Self::Unknown(other.to_string()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    Send(String),
    /// Edit the prompt of turn `n` (1-based).
    Edit(usize),
    /// Toggle the superseded reply of turn `n` (1-based).
    Prev(usize),
    History,
    Clear,
    Logout,
    Help,
    Quit,
    Invalid(String),
}

impl ChatCommand {
    /// Parses one input line. Blank lines yield `None`.
    ///
    /// A line starting with `//` sends the rest with one slash removed, so
    /// prompts can begin with a slash.
    pub fn parse(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Some(escaped) = trimmed.strip_prefix("//") {
            return Some(Self::Send(format!("/{escaped}")));
        }
        if !trimmed.starts_with('/') {
            return Some(Self::Send(line.to_string()));
        }

        let mut parts = trimmed.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let arg = parts.next();
        Some(match name {
            "/edit" => Self::turn_number(name, arg).map_or_else(Self::Invalid, Self::Edit),
            "/prev" => Self::turn_number(name, arg).map_or_else(Self::Invalid, Self::Prev),
            "/history" => Self::History,
            "/clear" => Self::Clear,
            "/logout" => Self::Logout,
            "/help" => Self::Help,
            "/quit" | "/exit" => Self::Quit,
            other => Self::Invalid(format!("Unknown command: {other}")),
        })
    }

    fn turn_number(name: &str, arg: Option<&str>) -> Result<usize, String> {
        match arg.map(str::parse::<usize>) {
            Some(Ok(n)) if n > 0 => Ok(n),
            Some(_) => Err(format!("{name} expects a turn number starting at 1")),
            None => Err(format!("Usage: {name} <turn>")),
        }
    }
}
