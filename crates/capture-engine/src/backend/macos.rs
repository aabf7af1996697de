use framegrab_common::FramegrabResult;
use framegrab_platform_core::{DisplayServer, Frame, ScreenDimensions};
use framegrab_platform_macos as platform_macos;

use crate::backend::CaptureBackend;

/// macOS backend: CoreGraphics capture of the main display.
pub struct MacOSBackend;

impl MacOSBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MacOSBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureBackend for MacOSBackend {
    fn query_dimensions(&self) -> FramegrabResult<ScreenDimensions> {
        platform_macos::primary_display_dimensions()
    }

    fn capture_frame(&self, dimensions: ScreenDimensions) -> FramegrabResult<Frame> {
        platform_macos::capture_primary_display(dimensions)
    }

    fn display_server(&self) -> DisplayServer {
        DisplayServer::MacOS
    }
}
