//! MCCS VCP codes used by this tool.
//!
//! The complete list is in the VESA Monitor Control Command Set standard.

use ddc::FeatureCode;

/// Input source select
pub const INPUT_SOURCE: FeatureCode = 0x60;

/// Display power mode
pub const POWER_MODE: FeatureCode = 0xd6;

/// Values of [`POWER_MODE`]
pub mod power {
    /// On
    pub const ON: u32 = 0x01;
    /// Off, the power button turns the monitor back on
    pub const SOFT_OFF: u32 = 0x04;
}

/// Common values of [`INPUT_SOURCE`]
///
/// Vendors don't always follow these.
pub mod input {
    /// DisplayPort 1
    pub const DISPLAY_PORT_1: u32 = 0x0f;
    /// HDMI 1
    pub const HDMI_1: u32 = 0x11;
}
