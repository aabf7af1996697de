//! No-op stubs for non-Windows hosts.

use framegrab_common::{FramegrabError, FramegrabResult};
use framegrab_platform_core::{Frame, ScreenDimensions};

pub fn primary_display_dimensions() -> FramegrabResult<ScreenDimensions> {
    Err(FramegrabError::unsupported(
        "GDI display query is only available on Windows",
    ))
}

pub fn capture_primary_display(_dimensions: ScreenDimensions) -> FramegrabResult<Frame> {
    Err(FramegrabError::unsupported(
        "GDI capture is only available on Windows",
    ))
}
