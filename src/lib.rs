#![warn(missing_docs)]
#![cfg_attr(feature = "doc", feature(doc_cfg))]

//! Scriptable DDC/CI monitor control using MCCS commands.
//!
//! Logical displays are enumerated once into a [`MonitorContext`]. Each
//! physical monitor behind them is addressed by a [`MonitorIndex`] that is
//! stable for the lifetime of that context. Commands set a single VCP
//! feature, either one at a time or from a [`Script`].
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(windows)]
//! # fn main() -> Result<(), mccs_script::Error> {
//! use mccs_script::{mccs, win32::Win32Display, CommandTriple, IndexPolicy, MonitorContext, MonitorIndex};
//!
//! let context = MonitorContext::new(Win32Display::new(), IndexPolicy::default())?;
//! for monitor in context.physical_monitors() {
//!     println!("{}", monitor?);
//! }
//! context.execute(&CommandTriple::new(MonitorIndex(0), mccs::INPUT_SOURCE, mccs::input::HDMI_1))?;
//! context.close()
//! # }
//! # #[cfg(not(windows))]
//! # fn main() {}
//! ```

pub use self::{
    api::{DisplayApi, PhysicalMonitorRecord},
    context::{MonitorContext, MonitorListing},
    error::{ArgumentError, Error, OsError},
    executor::CommandTriple,
    monitor::{Monitor, RawMonitor},
    registry::{enumerate, IndexPolicy, MonitorIndex, PhysicalMonitors, Retention},
    script::{LineError, LineErrorKind, Script, ScriptCommand, ScriptErrors, ScriptReport},
};
#[cfg(windows)]
pub use self::output::Output;
#[doc(no_inline)]
pub use ddc::FeatureCode;

mod api;
mod context;
mod error;
mod executor;
pub mod mccs;
mod monitor;
#[cfg(windows)]
mod output;
mod registry;
pub mod script;
#[cfg(windows)]
pub mod win32;
