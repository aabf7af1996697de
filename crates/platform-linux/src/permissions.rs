//! Capability detection and guidance for Linux.
//!
//! FrameGrab's Linux path talks the X protocol directly, so everything
//! hinges on an X server (or XWayland) being reachable.

use crate::display::{detect_display_server, x11_display_available};
use framegrab_platform_core::DisplayServer;

/// A system capability that FrameGrab may need.
#[derive(Debug, Clone)]
pub struct Capability {
    pub name: String,
    pub description: String,
    pub available: bool,
    pub required: bool,
    pub fix_instructions: Option<String>,
}

/// Check all capabilities and report status.
pub fn check_capabilities() -> Vec<Capability> {
    vec![
        check_graphical_session(),
        check_x11_display(),
        check_native_x11(),
    ]
}

/// Check that any graphical session is present at all.
fn check_graphical_session() -> Capability {
    let available = std::env::var("WAYLAND_DISPLAY").is_ok() || std::env::var("DISPLAY").is_ok();

    Capability {
        name: "Graphical Session".to_string(),
        description: "A running desktop session to capture from".to_string(),
        available,
        required: true,
        fix_instructions: if !available {
            Some(
                "Run inside a graphical desktop session (GNOME, KDE, etc.), not a bare TTY or SSH shell"
                    .to_string(),
            )
        } else {
            None
        },
    }
}

/// Check that an X server is reachable for capture.
fn check_x11_display() -> Capability {
    let available = x11_display_available();

    Capability {
        name: "X11 Display".to_string(),
        description: "X server connection used for GetImage capture".to_string(),
        available,
        required: true,
        fix_instructions: if !available {
            Some("Set DISPLAY, or enable XWayland on a Wayland session".to_string())
        } else {
            None
        },
    }
}

/// Informational: whether the session is native X11 rather than XWayland.
fn check_native_x11() -> Capability {
    let native = detect_display_server() == DisplayServer::X11;

    Capability {
        name: "Native X11 Session".to_string(),
        description: "Capture without an XWayland translation layer".to_string(),
        available: native,
        required: false,
        fix_instructions: if !native {
            Some(
                "Wayland session detected; captures will see XWayland clients only, not native Wayland surfaces"
                    .to_string(),
            )
        } else {
            None
        },
    }
}

/// Print a user-friendly capability report.
pub fn print_capability_report(capabilities: &[Capability]) {
    println!("FrameGrab System Capabilities:");
    println!("{}", "-".repeat(60));

    for cap in capabilities {
        let status = if cap.available {
            "[OK]"
        } else if cap.required {
            "[MISSING - REQUIRED]"
        } else {
            "[MISSING - OPTIONAL]"
        };

        println!("  {} {}: {}", status, cap.name, cap.description);

        if let Some(ref fix) = cap.fix_instructions {
            println!("    Fix: {fix}");
        }
    }
}
