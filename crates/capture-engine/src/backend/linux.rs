use framegrab_common::{FramegrabError, FramegrabResult};
use framegrab_platform_core::{DisplayServer, Frame, ScreenDimensions};
use framegrab_platform_linux::{
    capture_primary_screen, detect_display_server, display::x11_display_available,
    primary_screen_dimensions,
};

use crate::backend::CaptureBackend;

/// Linux backend: X protocol capture of the default screen's root window.
///
/// Works on native X11 sessions and on Wayland sessions through XWayland.
pub struct LinuxBackend;

impl LinuxBackend {
    pub fn new() -> Self {
        let server = detect_display_server();
        tracing::debug!(?server, "Linux capture backend created");
        Self
    }
}

impl Default for LinuxBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureBackend for LinuxBackend {
    fn query_dimensions(&self) -> FramegrabResult<ScreenDimensions> {
        if !x11_display_available() {
            return Err(FramegrabError::display_query(
                "no X server advertised (DISPLAY is unset); X11 capture needs X or XWayland",
            ));
        }
        primary_screen_dimensions()
    }

    fn capture_frame(&self, dimensions: ScreenDimensions) -> FramegrabResult<Frame> {
        capture_primary_screen(dimensions)
    }

    fn display_server(&self) -> DisplayServer {
        detect_display_server()
    }
}
