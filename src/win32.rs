//! The Windows display backend, plus [`windows`] API re-exports.

#[allow(missing_docs)]
#[cfg_attr(feature = "doc", doc(cfg(feature = "win32")))]
#[cfg_attr(not(feature = "win32"), doc(hidden))]
#[doc(no_inline)]
pub use windows::{
    core::HRESULT,
    Win32::{
        Devices::Display::PHYSICAL_MONITOR,
        Foundation::HANDLE,
        Graphics::Gdi::HMONITOR,
    },
};
use {
    crate::{
        api::{DisplayApi, PhysicalMonitorRecord},
        error::OsError,
        Output,
    },
    ddc::FeatureCode,
    log::debug,
    widestring::{WideCStr, WideStr},
    windows::Win32::{
        Devices::Display::{DestroyPhysicalMonitor, SetVCPFeature},
        Foundation::BOOL,
    },
};

pub(crate) fn wide_str_from_slice_truncated(sz: &[u16]) -> &WideStr {
    match WideCStr::from_slice_truncate(sz) {
        Ok(str) => str.as_ref(),
        Err(_) => WideStr::from_slice(sz),
    }
}

/// DDC/CI over the Windows Monitor Configuration API (`dxva2`).
#[derive(Copy, Clone, Debug, Default)]
pub struct Win32Display;

impl Win32Display {
    /// The Windows display backend.
    pub const fn new() -> Self {
        Win32Display
    }
}

impl DisplayApi for Win32Display {
    type Output = Output;
    type Handle = HANDLE;

    fn enumerate_outputs(&self) -> Result<Vec<Output>, OsError> {
        Ok(Output::enumerate()?)
    }

    fn physical_monitor_count(&self, output: Output) -> Result<u32, OsError> {
        Ok(output.physical_monitor_count()?)
    }

    fn physical_monitors(&self, output: Output, count: u32) -> Result<Vec<PhysicalMonitorRecord<HANDLE>>, OsError> {
        let monitors = output.physical_monitors(count)?;
        Ok(monitors
            .into_iter()
            .map(|monitor| {
                // PHYSICAL_MONITOR is packed; copy fields out before borrowing them
                let handle = monitor.hPhysicalMonitor;
                let description = monitor.szPhysicalMonitorDescription;
                debug!("fetched physical monitor {:?} from {output:?}", handle);
                PhysicalMonitorRecord {
                    handle,
                    description: wide_str_from_slice_truncated(&description).to_string_lossy(),
                }
            })
            .collect())
    }

    fn destroy_physical_monitor(&self, handle: &HANDLE) -> Result<(), OsError> {
        BOOL(unsafe { DestroyPhysicalMonitor(*handle) }).ok()?;
        Ok(())
    }

    fn set_vcp_feature(&self, handle: &HANDLE, code: FeatureCode, value: u32) -> Result<(), OsError> {
        BOOL(unsafe { SetVCPFeature(*handle, code, value) }).ok()?;
        Ok(())
    }
}
