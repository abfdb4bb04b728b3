use {
    crate::{
        api::{DisplayApi, PhysicalMonitorRecord},
        error::Error,
        monitor::Monitor,
    },
    log::{debug, warn},
    std::{
        fmt::{self, Display, Formatter},
        iter::Enumerate,
        slice, vec,
    },
};

/// A zero-based monitor ordinal, stable only for one enumeration.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonitorIndex(pub usize);

impl Display for MonitorIndex {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl From<usize> for MonitorIndex {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

/// How [`MonitorIndex`] values are assigned while walking physical monitors.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum IndexPolicy {
    /// The index advances once per logical display.
    ///
    /// Every physical monitor of a logical display shares that display's
    /// index, and resolving an index yields the display's first physical
    /// monitor. Logical displays without physical monitors still consume an
    /// index.
    #[default]
    PerOutput,
    /// The index advances once per physical monitor.
    PerMonitor,
}

/// Whether listed monitor handles are kept or released.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Retention {
    /// Release each handle once it has been listed.
    #[default]
    Release,
    /// Keep every handle; the owner releases them later.
    Retain,
}

/// Enumerate logical displays, in the order the OS reports them.
///
/// Any failure is fatal: a partial enumeration can't produce stable indices.
#[doc(alias = "EnumDisplayMonitors")]
pub fn enumerate<A: DisplayApi>(api: &A) -> Result<Vec<A::Output>, Error> {
    let outputs = api.enumerate_outputs().map_err(Error::Enumeration)?;
    debug!("enumerated {} logical display(s)", outputs.len());
    Ok(outputs)
}

/// Lazily walks the physical monitors of a list of logical displays.
///
/// Each item owns its handle, so a `for` loop that drops every monitor
/// before advancing releases handles in order, one at a time. Handles that
/// were fetched but never yielded are released when the walk is dropped.
///
/// A [`Error::Query`] ends the walk.
pub struct PhysicalMonitors<'a, A: DisplayApi> {
    api: &'a A,
    outputs: Enumerate<slice::Iter<'a, A::Output>>,
    pending: vec::IntoIter<PhysicalMonitorRecord<A::Handle>>,
    output_index: usize,
    monitor_index: usize,
    policy: IndexPolicy,
    failed: bool,
}

impl<'a, A: DisplayApi> PhysicalMonitors<'a, A> {
    /// Walk the physical monitors behind `outputs`.
    pub fn new(api: &'a A, outputs: &'a [A::Output], policy: IndexPolicy) -> Self {
        Self {
            api,
            outputs: outputs.iter().enumerate(),
            pending: Vec::new().into_iter(),
            output_index: 0,
            monitor_index: 0,
            policy,
            failed: false,
        }
    }

    /// The index policy in use.
    pub const fn policy(&self) -> IndexPolicy {
        self.policy
    }

    fn fetch(&self, output: A::Output) -> Result<Vec<PhysicalMonitorRecord<A::Handle>>, Error> {
        let query_error = |source| Error::Query {
            output: format!("{output:?}"),
            source,
        };
        let count = self.api.physical_monitor_count(output).map_err(query_error)?;
        debug!("{output:?} has {count} physical monitor(s)");
        if count == 0 {
            return Ok(Vec::new())
        }
        self.api.physical_monitors(output, count).map_err(query_error)
    }
}

impl<'a, A: DisplayApi> Iterator for PhysicalMonitors<'a, A> {
    type Item = Result<Monitor<'a, A>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None
        }

        loop {
            if let Some(record) = self.pending.next() {
                let index = match self.policy {
                    IndexPolicy::PerOutput => self.output_index,
                    IndexPolicy::PerMonitor => {
                        let index = self.monitor_index;
                        self.monitor_index += 1;
                        index
                    },
                };
                return Some(Ok(Monitor::new(self.api, index.into(), record)))
            }

            let (position, &output) = self.outputs.next()?;
            self.output_index = position;
            match self.fetch(output) {
                Ok(records) => self.pending = records.into_iter(),
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e))
                },
            }
        }
    }
}

impl<'a, A: DisplayApi> Drop for PhysicalMonitors<'a, A> {
    fn drop(&mut self) {
        for record in self.pending.by_ref() {
            debug!("releasing unvisited physical monitor {:?}", record.handle);
            if let Err(e) = self.api.destroy_physical_monitor(&record.handle) {
                warn!("failed to release physical monitor {}: {e}", record.description);
            }
        }
    }
}
