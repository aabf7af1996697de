//! FrameGrab macOS Platform Integration
//!
//! Primary-display capture through CoreGraphics: `CGDisplayCreateImage` on
//! the main display, then a copy of the image's data provider bytes. The
//! native 32-bit B-G-R-A layout and `bytes_per_row` stride never leave this
//! crate; callers receive the normalized RGB8 contract. CoreFoundation types
//! release themselves on drop, so the capture is leak-free on every path.
//!
//! On non-macOS hosts the crate compiles to stubs that report `Unsupported`.

#[cfg(target_os = "macos")]
mod quartz;
#[cfg(target_os = "macos")]
pub use quartz::{capture_primary_display, primary_display_dimensions};

#[cfg(not(target_os = "macos"))]
mod stub;
#[cfg(not(target_os = "macos"))]
pub use stub::{capture_primary_display, primary_display_dimensions};
