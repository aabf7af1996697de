//! FrameGrab Linux Platform Integration
//!
//! Platform-specific implementations for Linux:
//! - **X11 capture:** `GetImage` on the root window over a per-call
//!   connection, with mask-based pixel decoding
//! - **Display server detection:** Wayland/X11 environment probing
//! - **Permissions:** capability detection and user guidance
//!
//! Capture speaks the X protocol directly, so a Wayland session needs
//! XWayland for it to work; `permissions::check_capabilities` reports this.

pub mod display;
pub mod permissions;

#[cfg(target_os = "linux")]
mod x11;
#[cfg(target_os = "linux")]
pub use x11::{capture_primary_screen, primary_screen_dimensions};

#[cfg(not(target_os = "linux"))]
mod stub;
#[cfg(not(target_os = "linux"))]
pub use stub::{capture_primary_screen, primary_screen_dimensions};

pub use display::detect_display_server;
