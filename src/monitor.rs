use {
    crate::{
        api::{DisplayApi, PhysicalMonitorRecord},
        error::Error,
        registry::MonitorIndex,
    },
    ddc::FeatureCode,
    log::{debug, warn},
    std::fmt::{self, Debug, Display, Formatter},
};

/// An owned physical monitor handle that allows the use of DDC/CI operations.
///
/// The handle is released back to the OS exactly once: either through
/// [`release`](Self::release), or when the monitor is dropped. Use
/// [`into_raw`](Self::into_raw) to keep the handle beyond this value.
pub struct Monitor<'a, A: DisplayApi> {
    api: &'a A,
    index: MonitorIndex,
    handle: Option<A::Handle>,
    description: String,
}

/// A physical monitor whose handle is not released automatically.
///
/// Obtained from [`Monitor::into_raw`]; whoever holds it is responsible for
/// handing it back with [`Monitor::from_raw`] so it can be released.
#[derive(Debug, PartialEq, Eq)]
pub struct RawMonitor<H> {
    /// Index assigned during enumeration
    pub index: MonitorIndex,
    /// The OS handle
    pub handle: H,
    /// Physical monitor description string
    pub description: String,
}

impl<'a, A: DisplayApi> Monitor<'a, A> {
    pub(crate) fn new(api: &'a A, index: MonitorIndex, record: PhysicalMonitorRecord<A::Handle>) -> Self {
        Self {
            api,
            index,
            handle: Some(record.handle),
            description: record.description,
        }
    }

    /// Take ownership of a raw monitor again.
    pub fn from_raw(api: &'a A, raw: RawMonitor<A::Handle>) -> Self {
        Self {
            api,
            index: raw.index,
            handle: Some(raw.handle),
            description: raw.description,
        }
    }

    /// The index this monitor was assigned during enumeration.
    pub const fn index(&self) -> MonitorIndex {
        self.index
    }

    /// Physical monitor description string.
    #[doc(alias = "szPhysicalMonitorDescription")]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The underlying OS handle.
    pub fn handle(&self) -> &A::Handle {
        // only `release` and `into_raw` take the handle, and both consume `self`
        match &self.handle {
            Some(handle) => handle,
            None => unreachable!("monitor handle already released"),
        }
    }

    /// Sets the value of a Virtual Control Panel (VCP) code for this monitor.
    ///
    /// This is a single DDC/CI transaction. Failures are not retried.
    #[doc(alias = "SetVCPFeature")]
    pub fn set_vcp_feature(&self, code: FeatureCode, value: u32) -> Result<(), Error> {
        self.api
            .set_vcp_feature(self.handle(), code, value)
            .map_err(|source| Error::Command {
                index: self.index,
                code,
                value,
                source,
            })
    }

    /// Release the handle back to the OS.
    #[doc(alias = "DestroyPhysicalMonitor")]
    pub fn release(mut self) -> Result<(), Error> {
        self.release_()
    }

    /// Give up ownership of the handle without releasing it.
    pub fn into_raw(mut self) -> RawMonitor<A::Handle> {
        let handle = match self.handle.take() {
            Some(handle) => handle,
            None => unreachable!("monitor handle already released"),
        };
        RawMonitor {
            index: self.index,
            handle,
            description: std::mem::take(&mut self.description),
        }
    }

    fn release_(&mut self) -> Result<(), Error> {
        match self.handle.take() {
            Some(handle) => {
                debug!("releasing physical monitor {} ({:?})", self.index, handle);
                self.api
                    .destroy_physical_monitor(&handle)
                    .map_err(|source| Error::Release {
                        index: self.index,
                        description: self.description.clone(),
                        source,
                    })
            },
            None => Ok(()),
        }
    }
}

impl<'a, A: DisplayApi> Drop for Monitor<'a, A> {
    fn drop(&mut self) {
        if let Err(e) = self.release_() {
            warn!("{e}");
        }
    }
}

impl<'a, A: DisplayApi> Debug for Monitor<'a, A> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("Monitor")
            .field("index", &self.index)
            .field("handle", &self.handle)
            .field("description", &self.description)
            .finish()
    }
}

impl<'a, A: DisplayApi> Display for Monitor<'a, A> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "Monitor {}: {}", self.index, self.description)
    }
}
