//! Batch scripts: one command per line.
//!
//! ```text
//! # switch the second monitor first, indices can shift after a switch
//! 1 0x60 0x11
//! 0 0x60 0x0F
//! ```
//!
//! A script is parsed completely before anything is sent. If any line is
//! malformed, every bad line is reported and no command runs.

use {
    crate::{
        api::DisplayApi,
        context::MonitorContext,
        error::{ArgumentError, Error},
        executor::CommandTriple,
    },
    log::{debug, info},
    std::{
        fmt::{self, Display, Formatter},
        fs,
        path::Path,
        str::FromStr,
    },
};

/// A parsed command and the line it came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScriptCommand {
    /// 1-based line number in the script source
    pub line: usize,
    /// The decoded command
    pub command: CommandTriple,
}

/// An ordered list of commands, ready to run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Script {
    commands: Vec<ScriptCommand>,
}

/// What is wrong with a script line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LineErrorKind {
    /// The line doesn't have exactly three tokens
    TokenCount(usize),
    /// A token couldn't be decoded
    Decode(ArgumentError),
}

/// A malformed script line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineError {
    /// 1-based line number
    pub line: usize,
    /// The line as written
    pub text: String,
    /// The problem
    pub kind: LineErrorKind,
}

impl Display for LineError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "line {}: ", self.line)?;
        match &self.kind {
            LineErrorKind::TokenCount(count) => write!(f, "expected 3 tokens, found {count}")?,
            LineErrorKind::Decode(e) => write!(f, "{e}")?,
        }
        write!(f, "\n    {}", self.text)
    }
}

/// Every malformed line of a script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptErrors {
    errors: Vec<LineError>,
}

impl ScriptErrors {
    /// The malformed lines, in file order.
    pub fn errors(&self) -> &[LineError] {
        &self.errors
    }
}

impl Display for ScriptErrors {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "script has {} invalid line(s), nothing was executed", self.errors.len())?;
        for error in &self.errors {
            write!(f, "\n{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ScriptErrors {}

impl Script {
    /// Parse a script, collecting every malformed line.
    pub fn parse(source: &str) -> Result<Self, ScriptErrors> {
        let mut commands = Vec::new();
        let mut errors = Vec::new();

        for (line, text) in (1..).zip(source.lines()) {
            let trimmed = text.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue
            }

            let tokens: Vec<&str> = trimmed.split_whitespace().collect();
            let parsed = match tokens[..] {
                [index, code, value] => CommandTriple::parse(index, code, value).map_err(LineErrorKind::Decode),
                _ => Err(LineErrorKind::TokenCount(tokens.len())),
            };
            match parsed {
                Ok(command) => commands.push(ScriptCommand { line, command }),
                Err(kind) => errors.push(LineError {
                    line,
                    text: text.to_owned(),
                    kind,
                }),
            }
        }

        match errors.is_empty() {
            true => Ok(Self { commands }),
            false => Err(ScriptErrors { errors }),
        }
    }

    /// Read and parse a script file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| Error::ScriptRead {
            path: path.to_owned(),
            source,
        })?;
        Ok(Self::parse(&source)?)
    }

    /// The commands, in file order.
    pub fn commands(&self) -> &[ScriptCommand] {
        &self.commands
    }

    /// The number of commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the script contains no commands.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl FromStr for Script {
    type Err = ScriptErrors;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        Self::parse(source)
    }
}

/// The outcome of a completed script run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ScriptReport {
    /// Number of commands sent
    pub executed: usize,
}

impl<A: DisplayApi> MonitorContext<A> {
    /// Run every command of a script, in order.
    ///
    /// Stops at the first failing command. Commands sent before it stay applied.
    pub fn run_script(&self, script: &Script) -> Result<ScriptReport, Error> {
        debug!("running script with {} command(s)", script.len());
        for (completed, command) in script.commands().iter().enumerate() {
            self.execute(&command.command).map_err(|e| Error::ScriptCommand {
                line: command.line,
                completed,
                source: Box::new(e),
            })?;
        }
        info!("script finished, {} command(s) sent", script.len());
        Ok(ScriptReport {
            executed: script.len(),
        })
    }

    /// Parse the script at `path`, then run it.
    ///
    /// Nothing is sent unless the whole file parses.
    pub fn run_script_file<P: AsRef<Path>>(&self, path: P) -> Result<ScriptReport, Error> {
        let script = Script::from_path(path)?;
        self.run_script(&script)
    }
}
