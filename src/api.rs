use {
    crate::error::OsError,
    ddc::FeatureCode,
    std::fmt::Debug,
};

/// A physical monitor record as reported by the OS: its handle and description.
#[derive(Debug)]
pub struct PhysicalMonitorRecord<H> {
    /// The opaque handle, owned by whoever holds this record
    pub handle: H,
    /// Human-readable monitor description
    pub description: String,
}

/// The operating system's display and DDC/CI transport.
///
/// Every call blocks until the OS (and, for VCP transactions, the monitor)
/// responds. Implementations do not retry.
pub trait DisplayApi {
    /// A logical display output, valid for the current enumeration pass.
    type Output: Copy + Debug;

    /// A physical monitor handle.
    ///
    /// Handles must be passed to [`destroy_physical_monitor`](Self::destroy_physical_monitor)
    /// exactly once; [`Monitor`](crate::Monitor) takes care of that.
    type Handle: Debug;

    /// Enumerate logical displays in OS-determined order.
    #[doc(alias = "EnumDisplayMonitors")]
    fn enumerate_outputs(&self) -> Result<Vec<Self::Output>, OsError>;

    /// The number of physical monitors backing a logical display.
    #[doc(alias = "GetNumberOfPhysicalMonitorsFromHMONITOR")]
    fn physical_monitor_count(&self, output: Self::Output) -> Result<u32, OsError>;

    /// Fetch `count` physical monitor records for a logical display.
    #[doc(alias = "GetPhysicalMonitorsFromHMONITOR")]
    fn physical_monitors(
        &self,
        output: Self::Output,
        count: u32,
    ) -> Result<Vec<PhysicalMonitorRecord<Self::Handle>>, OsError>;

    /// Release a physical monitor handle back to the OS.
    #[doc(alias = "DestroyPhysicalMonitor")]
    fn destroy_physical_monitor(&self, handle: &Self::Handle) -> Result<(), OsError>;

    /// Perform one DDC/CI "set VCP feature" transaction.
    #[doc(alias = "SetVCPFeature")]
    fn set_vcp_feature(&self, handle: &Self::Handle, code: FeatureCode, value: u32) -> Result<(), OsError>;
}

impl<'a, A: DisplayApi + ?Sized> DisplayApi for &'a A {
    type Output = A::Output;
    type Handle = A::Handle;

    fn enumerate_outputs(&self) -> Result<Vec<Self::Output>, OsError> {
        (**self).enumerate_outputs()
    }

    fn physical_monitor_count(&self, output: Self::Output) -> Result<u32, OsError> {
        (**self).physical_monitor_count(output)
    }

    fn physical_monitors(
        &self,
        output: Self::Output,
        count: u32,
    ) -> Result<Vec<PhysicalMonitorRecord<Self::Handle>>, OsError> {
        (**self).physical_monitors(output, count)
    }

    fn destroy_physical_monitor(&self, handle: &Self::Handle) -> Result<(), OsError> {
        (**self).destroy_physical_monitor(handle)
    }

    fn set_vcp_feature(&self, handle: &Self::Handle, code: FeatureCode, value: u32) -> Result<(), OsError> {
        (**self).set_vcp_feature(handle, code, value)
    }
}
