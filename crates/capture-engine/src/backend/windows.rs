use framegrab_common::FramegrabResult;
use framegrab_platform_core::{DisplayServer, Frame, ScreenDimensions};
use framegrab_platform_windows as platform_windows;

use crate::backend::CaptureBackend;

/// Windows backend: GDI BitBlt capture of the primary display.
pub struct WindowsBackend;

impl WindowsBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WindowsBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureBackend for WindowsBackend {
    fn query_dimensions(&self) -> FramegrabResult<ScreenDimensions> {
        platform_windows::primary_display_dimensions()
    }

    fn capture_frame(&self, dimensions: ScreenDimensions) -> FramegrabResult<Frame> {
        platform_windows::capture_primary_display(dimensions)
    }

    fn display_server(&self) -> DisplayServer {
        DisplayServer::Windows
    }
}
