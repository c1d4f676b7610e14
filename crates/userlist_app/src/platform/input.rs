/// What the user asked for on one input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Pull-to-refresh or "Try Again".
    Refresh,
    /// Open the detail screen for a 1-based row number.
    Open(usize),
    Help,
    Quit,
    Unknown,
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    match line.to_ascii_lowercase().as_str() {
        "" | "h" | "help" | "?" => Command::Help,
        "r" | "refresh" | "retry" => Command::Refresh,
        "q" | "quit" | "exit" => Command::Quit,
        other => match other.parse::<usize>() {
            Ok(row) if row > 0 => Command::Open(row),
            _ => Command::Unknown,
        },
    }
}
