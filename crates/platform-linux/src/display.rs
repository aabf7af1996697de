//! Display server detection.

use framegrab_platform_core::DisplayServer;

/// Detect the current display server from the session environment.
///
/// A Wayland session with XWayland sets both variables; Wayland wins here
/// so callers can warn that X11 capture will go through XWayland.
pub fn detect_display_server() -> DisplayServer {
    if std::env::var("WAYLAND_DISPLAY").is_ok() {
        DisplayServer::Wayland
    } else if std::env::var("DISPLAY").is_ok() {
        DisplayServer::X11
    } else {
        DisplayServer::Unknown
    }
}

/// Whether an X server (native or XWayland) is advertised to this process.
pub fn x11_display_available() -> bool {
    std::env::var("DISPLAY").is_ok()
}
