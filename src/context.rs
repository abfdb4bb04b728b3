use {
    crate::{
        api::DisplayApi,
        error::Error,
        monitor::{Monitor, RawMonitor},
        registry::{self, IndexPolicy, MonitorIndex, PhysicalMonitors, Retention},
    },
    log::{debug, warn},
    std::mem,
};

/// One line of a monitor listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonitorListing {
    /// The index used to address this monitor
    pub index: MonitorIndex,
    /// Physical monitor description string
    pub description: String,
}

/// The logical displays discovered at startup, plus any retained monitor handles.
///
/// Displays are enumerated once, when the context is created, and shared by
/// listing and index resolution. Retained handles are released by
/// [`close`](Self::close), or on drop.
pub struct MonitorContext<A: DisplayApi> {
    api: A,
    outputs: Vec<A::Output>,
    policy: IndexPolicy,
    retained: Vec<RawMonitor<A::Handle>>,
}

impl<A: DisplayApi> MonitorContext<A> {
    /// Enumerate logical displays and build a context around them.
    pub fn new(api: A, policy: IndexPolicy) -> Result<Self, Error> {
        let outputs = registry::enumerate(&api)?;
        Ok(Self {
            api,
            outputs,
            policy,
            retained: Vec::new(),
        })
    }

    /// The display API backing this context.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Logical displays in enumeration order.
    pub fn outputs(&self) -> &[A::Output] {
        &self.outputs
    }

    /// How monitor indices are assigned.
    pub const fn policy(&self) -> IndexPolicy {
        self.policy
    }

    /// Monitors whose handles are currently retained by this context.
    pub fn retained(&self) -> &[RawMonitor<A::Handle>] {
        &self.retained
    }

    /// Walk every physical monitor, in index order.
    pub fn physical_monitors(&self) -> PhysicalMonitors<'_, A> {
        PhysicalMonitors::new(&self.api, &self.outputs, self.policy)
    }

    /// List every physical monitor.
    ///
    /// With [`Retention::Retain`] the handles are kept by this context until it is closed.
    pub fn list(&mut self, retention: Retention) -> Result<Vec<MonitorListing>, Error> {
        let mut listing = Vec::new();
        let mut kept = Vec::new();
        for monitor in PhysicalMonitors::new(&self.api, &self.outputs, self.policy) {
            let monitor = monitor?;
            listing.push(MonitorListing {
                index: monitor.index(),
                description: monitor.description().to_owned(),
            });
            match retention {
                Retention::Retain => kept.push(monitor),
                Retention::Release => monitor.release()?,
            }
        }
        self.retained.extend(kept.into_iter().map(Monitor::into_raw));
        Ok(listing)
    }

    /// Release every retained handle.
    ///
    /// All handles are released even if some fail; the first failure is returned.
    pub fn close(mut self) -> Result<(), Error> {
        self.release_retained()
    }

    fn release_retained(&mut self) -> Result<(), Error> {
        let retained = mem::take(&mut self.retained);
        debug!("releasing {} retained monitor(s)", retained.len());
        retained
            .into_iter()
            .map(|raw| Monitor::from_raw(&self.api, raw).release())
            .fold(Ok(()), |res, release| res.and(release))
    }
}

impl<A: DisplayApi> Drop for MonitorContext<A> {
    fn drop(&mut self) {
        if let Err(e) = self.release_retained() {
            warn!("{e}");
        }
    }
}
