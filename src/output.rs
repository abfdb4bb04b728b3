#[cfg(doc)]
use windows::Win32;
use {
    std::{
        fmt::{self, Debug, Formatter},
        mem,
    },
    windows::{
        core::Result as WinResult,
        Win32::{
            Devices::Display::{
                GetNumberOfPhysicalMonitorsFromHMONITOR, GetPhysicalMonitorsFromHMONITOR, PHYSICAL_MONITOR,
            },
            Foundation::{BOOL, LPARAM, RECT},
            Graphics::Gdi::{EnumDisplayMonitors, HDC, HMONITOR},
        },
    },
};

/// A handle that represents a Windows desktop display
///
/// This is a wrapper around [`HMONITOR`][hmonitor]. It is only meaningful for
/// the enumeration pass that produced it.
///
/// See also: [`Win32::Graphics::Gdi::HMONITOR`]
///
/// [hmonitor]: https://learn.microsoft.com/en-us/windows/win32/gdi/hmonitor-and-the-device-context
#[derive(Copy, Clone, PartialEq, Eq)]
#[repr(transparent)]
#[doc(alias = "HMONITOR")]
pub struct Output {
    handle: HMONITOR,
}

impl Output {
    /// [Enumerates display monitors][enumdisplaymonitors], in callback order
    ///
    /// [enumdisplaymonitors]: https://learn.microsoft.com/en-us/windows/win32/api/winuser/nf-winuser-enumdisplaymonitors
    #[doc(alias = "EnumDisplayMonitors")]
    pub fn enumerate() -> WinResult<Vec<Self>> {
        Self::win32_enumerate().map(|m| m.into_iter().map(Self::from_win32).collect())
    }

    /// The number of physical monitors associated with this display.
    #[doc(alias = "GetNumberOfPhysicalMonitorsFromHMONITOR")]
    pub fn physical_monitor_count(&self) -> WinResult<u32> {
        let mut len = 0;
        BOOL(unsafe { GetNumberOfPhysicalMonitorsFromHMONITOR(self.handle, &mut len) }).ok()?;
        Ok(len)
    }

    /// Retrieves `count` physical monitors associated with this display.
    ///
    /// Each returned handle must eventually be passed to `DestroyPhysicalMonitor`.
    #[doc(alias = "GetPhysicalMonitorsFromHMONITOR")]
    pub fn physical_monitors(&self, count: u32) -> WinResult<Vec<PHYSICAL_MONITOR>> {
        let mut monitors = vec![PHYSICAL_MONITOR::default(); count as usize];
        BOOL(unsafe { GetPhysicalMonitorsFromHMONITOR(self.handle, &mut monitors) }).ok()?;
        Ok(monitors)
    }
}

#[allow(missing_docs)]
#[cfg_attr(feature = "doc", doc(cfg(feature = "win32")))]
#[cfg_attr(not(feature = "win32"), doc(hidden))]
impl Output {
    pub const fn win32_handle(&self) -> HMONITOR {
        self.handle
    }

    pub const fn from_win32(handle: HMONITOR) -> Self {
        Self { handle }
    }

    /// Enumerates all `HMONITOR`s using the `EnumDisplayMonitors` WinAPI call.
    #[doc(alias = "EnumDisplayMonitors")]
    pub fn win32_enumerate() -> WinResult<Vec<HMONITOR>> {
        unsafe extern "system" fn callback(
            handle: HMONITOR,
            _hdc_monitor: HDC,
            _lprc: *mut RECT,
            userdata: LPARAM,
        ) -> BOOL {
            let monitors: &mut Vec<HMONITOR> = mem::transmute(userdata);
            monitors.push(handle);
            BOOL::from(true)
        }

        let mut monitors = Vec::<HMONITOR>::new();
        let userdata = LPARAM(&mut monitors as *mut _ as _);
        unsafe { EnumDisplayMonitors(None, None, Some(callback), userdata) }.ok()?;
        Ok(monitors)
    }
}

impl Debug for Output {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_tuple("Output").field(&self.handle.0).finish()
    }
}

impl From<Output> for HMONITOR {
    fn from(output: Output) -> Self {
        output.win32_handle()
    }
}

impl From<HMONITOR> for Output {
    fn from(handle: HMONITOR) -> Self {
        Self::from_win32(handle)
    }
}
