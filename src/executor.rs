use {
    crate::{
        api::DisplayApi,
        context::MonitorContext,
        error::{ArgumentError, Error},
        mccs,
        monitor::Monitor,
        registry::MonitorIndex,
    },
    ddc::FeatureCode,
    log::{info, warn},
    std::fmt::{self, Display, Formatter},
};

/// One command: set VCP feature `code` to `value` on monitor `index`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CommandTriple {
    /// The addressed monitor
    pub index: MonitorIndex,
    /// The VCP feature code
    pub code: FeatureCode,
    /// The new feature value
    pub value: u32,
}

impl CommandTriple {
    /// Create a new command.
    pub const fn new(index: MonitorIndex, code: FeatureCode, value: u32) -> Self {
        Self { index, code, value }
    }

    /// Decode a command from its textual form: a decimal monitor index,
    /// then a hex command code and a hex parameter (`0x` prefix optional).
    pub fn parse(index: &str, code: &str, value: &str) -> Result<Self, ArgumentError> {
        Ok(Self {
            index: parse_index(index)?,
            code: parse_hex(code)
                .and_then(|code| FeatureCode::try_from(code).ok())
                .ok_or_else(|| ArgumentError::Code(code.into()))?,
            value: parse_hex(value).ok_or_else(|| ArgumentError::Parameter(value.into()))?,
        })
    }
}

impl Display for CommandTriple {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{} 0x{:02X} 0x{:02X}", self.index, self.code, self.value)
    }
}

fn parse_index(token: &str) -> Result<MonitorIndex, ArgumentError> {
    match !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
        true => token.parse().map(MonitorIndex).map_err(|_| ArgumentError::Index(token.into())),
        false => Err(ArgumentError::Index(token.into())),
    }
}

fn parse_hex(token: &str) -> Option<u32> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);
    match !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        true => u32::from_str_radix(digits, 16).ok(),
        false => None,
    }
}

impl<A: DisplayApi> MonitorContext<A> {
    /// Find the physical monitor with the given index.
    ///
    /// This walks every logical display again, releasing every other handle
    /// on the way. Returns `None` if no monitor has that index.
    pub fn resolve(&self, index: MonitorIndex) -> Result<Option<Monitor<'_, A>>, Error> {
        for monitor in self.physical_monitors() {
            let monitor = monitor?;
            if monitor.index() == index {
                return Ok(Some(monitor))
            }
        }
        Ok(None)
    }

    /// Send one command to an already resolved monitor.
    pub fn send_command(&self, monitor: &Monitor<'_, A>, code: FeatureCode, value: u32) -> Result<(), Error> {
        monitor.set_vcp_feature(code, value)
    }

    /// Resolve the command's monitor and send the command to it.
    ///
    /// Once the transaction succeeds the command counts as sent; a failure to
    /// release the handle afterwards is only logged.
    pub fn execute(&self, command: &CommandTriple) -> Result<(), Error> {
        info!("Executing command on monitor {}", command.index);
        info!("Command: 0x{:02X}, Parameter: 0x{:02X}", command.code, command.value);

        let monitor = self
            .resolve(command.index)?
            .ok_or(Error::MonitorNotFound(command.index))?;
        self.send_command(&monitor, command.code, command.value)?;
        if let Err(e) = monitor.release() {
            warn!("{e}");
        }

        info!("Done");
        Ok(())
    }

    /// Switch every monitor to soft-off, call `wait`, then switch it back on.
    ///
    /// Monitors are cycled one at a time, in index order. If `wait` fails the
    /// monitor is still switched back on before the error is returned.
    pub fn cycle_power<F>(&self, mut wait: F) -> Result<(), Error>
    where
        F: FnMut(&Monitor<'_, A>) -> Result<(), Error>,
    {
        for monitor in self.physical_monitors() {
            let monitor = monitor?;
            info!("power cycling {monitor}");
            monitor.set_vcp_feature(mccs::POWER_MODE, mccs::power::SOFT_OFF)?;
            let waited = wait(&monitor);
            let restored = monitor.set_vcp_feature(mccs::POWER_MODE, mccs::power::ON);
            waited?;
            restored?;
            if let Err(e) = monitor.release() {
                warn!("{e}");
            }
        }
        Ok(())
    }
}
