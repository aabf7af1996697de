//! FrameGrab Windows Platform Integration
//!
//! Primary-display capture through classic GDI: `BitBlt` into a compatible
//! bitmap, then `GetDIBits` with a negative height to read top-down 24-bit
//! rows. The native B-G-R layout and row padding never leave this crate;
//! callers receive the normalized RGB8 contract.
//!
//! On non-Windows hosts the crate compiles to stubs that report
//! `Unsupported`, so cross-compile checks of the full workspace stay green.

#[cfg(target_os = "windows")]
mod gdi;
#[cfg(target_os = "windows")]
pub use gdi::{capture_primary_display, primary_display_dimensions};

#[cfg(not(target_os = "windows"))]
mod stub;
#[cfg(not(target_os = "windows"))]
pub use stub::{capture_primary_display, primary_display_dimensions};
