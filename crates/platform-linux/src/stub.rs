//! No-op stubs for non-Linux hosts.

use framegrab_common::{FramegrabError, FramegrabResult};
use framegrab_platform_core::{Frame, ScreenDimensions};

pub fn primary_screen_dimensions() -> FramegrabResult<ScreenDimensions> {
    Err(FramegrabError::unsupported(
        "X11 display query is only available on Linux",
    ))
}

pub fn capture_primary_screen(_dimensions: ScreenDimensions) -> FramegrabResult<Frame> {
    Err(FramegrabError::unsupported(
        "X11 capture is only available on Linux",
    ))
}
