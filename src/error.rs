use {
    crate::{registry::MonitorIndex, script::ScriptErrors},
    ddc::FeatureCode,
    std::{
        fmt::{self, Display, Formatter},
        io,
        path::PathBuf,
    },
    thiserror::Error,
};

/// A failure reported by the operating system's display API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OsError {
    code: i32,
    message: String,
}

impl OsError {
    /// Wrap a platform error code and its message.
    pub fn new<S: Into<String>>(code: i32, message: S) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// The raw platform error code (an `HRESULT` on Windows).
    pub const fn code(&self) -> i32 {
        self.code
    }

    /// The platform's description of the failure.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for OsError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self.message.is_empty() {
            true => write!(f, "OS error 0x{:08x}", self.code),
            false => write!(f, "{} (0x{:08x})", self.message, self.code),
        }
    }
}

impl std::error::Error for OsError {}

#[cfg(windows)]
impl From<windows::core::Error> for OsError {
    fn from(error: windows::core::Error) -> Self {
        Self::new(error.code().0, error.message().to_string())
    }
}

/// An invalid monitor index, command or parameter token.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ArgumentError {
    /// The monitor index is not a decimal integer
    #[error("monitor index {0:?} must be a decimal integer")]
    Index(String),
    /// The command is not a hex byte
    #[error("command {0:?} must be a hex code between 0x00 and 0xff")]
    Code(String),
    /// The parameter is not a 32-bit hex value
    #[error("parameter {0:?} must be a 32-bit hex value")]
    Parameter(String),
}

/// An error that can occur while enumerating or controlling monitors
#[derive(Error, Debug)]
pub enum Error {
    /// The OS failed to enumerate logical displays
    #[error("display enumeration failed: {0}")]
    Enumeration(#[source] OsError),
    /// The OS failed to report the physical monitors of a logical display
    #[error("failed to query physical monitors of {output}: {source}")]
    Query {
        /// The logical display being queried
        output: String,
        /// The OS failure
        #[source]
        source: OsError,
    },
    /// A physical monitor handle could not be released
    #[error("failed to release physical monitor {index} ({description}): {source}")]
    Release {
        /// Index of the released monitor
        index: MonitorIndex,
        /// Description of the released monitor
        description: String,
        /// The OS failure
        #[source]
        source: OsError,
    },
    /// A VCP "set feature" transaction failed
    #[error("setting VCP feature 0x{code:02x} to 0x{value:x} on monitor {index} failed: {source}")]
    Command {
        /// Index of the addressed monitor
        index: MonitorIndex,
        /// The VCP feature code
        code: FeatureCode,
        /// The requested value
        value: u32,
        /// The OS failure
        #[source]
        source: OsError,
    },
    /// No physical monitor has the requested index
    #[error("no monitor with index {0}")]
    MonitorNotFound(MonitorIndex),
    /// An invalid command argument
    #[error(transparent)]
    Argument(#[from] ArgumentError),
    /// A script contained malformed lines, nothing was executed
    #[error(transparent)]
    Script(#[from] ScriptErrors),
    /// A script file could not be read
    #[error("failed to read script {}: {source}", .path.display())]
    ScriptRead {
        /// Path of the script
        path: PathBuf,
        /// The I/O failure
        #[source]
        source: io::Error,
    },
    /// The operator's confirmation could not be read
    #[error("failed to read confirmation: {0}")]
    Confirmation(#[source] io::Error),
    /// A script command failed after `completed` earlier commands were sent
    #[error("script line {line} failed after {completed} command(s) were sent: {source}")]
    ScriptCommand {
        /// Line number (1-based) of the failing command
        line: usize,
        /// Number of commands sent successfully before the failure
        completed: usize,
        /// The command failure
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Whether this error means the monitor index space can no longer be trusted.
    pub fn is_fatal(&self) -> bool {
        match self {
            Error::Enumeration(..) | Error::Query { .. } => true,
            Error::ScriptCommand { source, .. } => source.is_fatal(),
            _ => false,
        }
    }
}
