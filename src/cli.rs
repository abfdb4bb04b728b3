use {
    clap::{ArgAction, Parser},
    mccs_script::{ArgumentError, CommandTriple, IndexPolicy},
    std::path::PathBuf,
    thiserror::Error,
};

/// Set monitor settings over DDC/CI using MCCS commands.
///
/// With no arguments, lists attached monitors and their indices. With one
/// argument, runs every command in a script file (`#` lines are comments).
/// With three arguments, sends command <CODE> with parameter <VALUE> to the
/// monitor at <INDEX>. Codes and values are hex.
///
/// Switching inputs can renumber monitors. Order scripts so that the monitor
/// with the highest index is switched first.
#[derive(Parser, Debug)]
#[command(version, about, long_about)]
pub struct Args {
    /// Number monitors individually instead of once per display output
    #[arg(long)]
    pub index_per_monitor: bool,

    /// Switch each monitor off, wait for Enter, then switch it back on
    #[arg(long, conflicts_with = "args")]
    pub cycle_power: bool,

    /// Increase log verbosity
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// <SCRIPT> or <INDEX> <CODE> <VALUE>
    #[arg(value_name = "ARGS")]
    pub args: Vec<String>,
}

/// What the tool was asked to do.
#[derive(Debug, PartialEq, Eq)]
pub enum Invocation {
    List,
    RunScript(PathBuf),
    Command(CommandTriple),
    CyclePower,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum UsageError {
    #[error("Wrong parameters: expected 0, 1 or 3 arguments, got {0}")]
    ArgumentCount(usize),
    #[error(transparent)]
    Argument(#[from] ArgumentError),
}

impl Args {
    pub fn index_policy(&self) -> IndexPolicy {
        match self.index_per_monitor {
            true => IndexPolicy::PerMonitor,
            false => IndexPolicy::PerOutput,
        }
    }

    pub fn invocation(&self) -> Result<Invocation, UsageError> {
        if self.cycle_power {
            return Ok(Invocation::CyclePower)
        }
        Invocation::from_args(&self.args)
    }
}

impl Invocation {
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self, UsageError> {
        match args {
            [] => Ok(Invocation::List),
            [script] => Ok(Invocation::RunScript(PathBuf::from(script.as_ref()))),
            [index, code, value] => Ok(Invocation::Command(CommandTriple::parse(
                index.as_ref(),
                code.as_ref(),
                value.as_ref(),
            )?)),
            args => Err(UsageError::ArgumentCount(args.len())),
        }
    }
}
