use std::fmt;

#[derive(Debug, Clone)]
pub enum PihostError {
    CommandFailed(String),
    ProcessSpawn(String),
    ProcessWait(String),
    ProcessIo(String),
    Validation(String),
    SignalOperation(String),
    FileOperation(String),
    NotFound(String),
}

impl PihostError {
    /// Stable error code, used in log lines and crash reports
    pub fn code(&self) -> &'static str {
        match self {
            PihostError::CommandFailed(_) => "E001",
            PihostError::ProcessSpawn(_) => "E002",
            PihostError::ProcessWait(_) => "E003",
            PihostError::ProcessIo(_) => "E004",
            PihostError::Validation(_) => "E005",
            PihostError::SignalOperation(_) => "E006",
            PihostError::FileOperation(_) => "E007",
            PihostError::NotFound(_) => "E008",
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            PihostError::CommandFailed(_) => "Command Failed",
            PihostError::ProcessSpawn(_) => "Process Spawn Error",
            PihostError::ProcessWait(_) => "Process Wait Error",
            PihostError::ProcessIo(_) => "Process I/O Error",
            PihostError::Validation(_) => "Validation Error",
            PihostError::SignalOperation(_) => "Signal Operation Error",
            PihostError::FileOperation(_) => "File Operation Error",
            PihostError::NotFound(_) => "Resource Not Found",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            PihostError::CommandFailed(msg) => msg,
            PihostError::ProcessSpawn(msg) => msg,
            PihostError::ProcessWait(msg) => msg,
            PihostError::ProcessIo(msg) => msg,
            PihostError::Validation(msg) => msg,
            PihostError::SignalOperation(msg) => msg,
            PihostError::FileOperation(msg) => msg,
            PihostError::NotFound(msg) => msg,
        }
    }

    /// Colored one-liner for interactive consoles
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for PihostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for PihostError {}

impl PihostError {
    pub fn command_failed<T: Into<String>>(msg: T) -> Self {
        PihostError::CommandFailed(msg.into())
    }

    pub fn process_spawn<T: Into<String>>(msg: T) -> Self {
        PihostError::ProcessSpawn(msg.into())
    }

    pub fn process_wait<T: Into<String>>(msg: T) -> Self {
        PihostError::ProcessWait(msg.into())
    }

    pub fn process_io<T: Into<String>>(msg: T) -> Self {
        PihostError::ProcessIo(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        PihostError::Validation(msg.into())
    }

    pub fn signal_operation<T: Into<String>>(msg: T) -> Self {
        PihostError::SignalOperation(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        PihostError::FileOperation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        PihostError::NotFound(msg.into())
    }
}

impl From<std::io::Error> for PihostError {
    fn from(err: std::io::Error) -> Self {
        PihostError::FileOperation(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PihostError>;
