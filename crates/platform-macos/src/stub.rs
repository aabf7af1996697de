//! No-op stubs for non-macOS hosts.

use framegrab_common::{FramegrabError, FramegrabResult};
use framegrab_platform_core::{Frame, ScreenDimensions};

pub fn primary_display_dimensions() -> FramegrabResult<ScreenDimensions> {
    Err(FramegrabError::unsupported(
        "CoreGraphics display query is only available on macOS",
    ))
}

pub fn capture_primary_display(_dimensions: ScreenDimensions) -> FramegrabResult<Frame> {
    Err(FramegrabError::unsupported(
        "CoreGraphics capture is only available on macOS",
    ))
}
