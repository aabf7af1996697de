use framegrab_common::{FramegrabError, FramegrabResult};
use framegrab_platform_core::{DisplayServer, Frame, ScreenDimensions};

/// Abstract interface for platform-specific capture of the primary display.
///
/// Implementations must acquire and release every native handle within a
/// single call, on success and failure paths alike, and must hand frames
/// upward already normalized to the RGB8 contract.
pub trait CaptureBackend: Send + Sync {
    /// Query the primary display's current pixel dimensions.
    ///
    /// Re-queries the OS on every call so resolution changes between
    /// captures are picked up.
    fn query_dimensions(&self) -> FramegrabResult<ScreenDimensions>;

    /// Capture the current screen contents for the given dimensions.
    ///
    /// Blocks until the native API returns pixel data. The returned frame
    /// is tightly packed RGB8, top-down.
    fn capture_frame(&self, dimensions: ScreenDimensions) -> FramegrabResult<Frame>;

    /// The display server family backing this capture path.
    fn display_server(&self) -> DisplayServer;
}

pub mod linux;
pub mod macos;
pub mod windows;

pub use linux::LinuxBackend;
pub use macos::MacOSBackend;
pub use windows::WindowsBackend;

/// Get the capture backend for the build target.
pub fn platform_backend() -> Box<dyn CaptureBackend> {
    #[cfg(target_os = "linux")]
    {
        Box::new(LinuxBackend::new())
    }
    #[cfg(target_os = "windows")]
    {
        Box::new(WindowsBackend::new())
    }
    #[cfg(target_os = "macos")]
    {
        Box::new(MacOSBackend::new())
    }
    #[cfg(not(any(target_os = "linux", target_os = "windows", target_os = "macos")))]
    {
        Box::new(UnsupportedBackend)
    }
}

/// Fallback backend for targets without a native capture path.
pub struct UnsupportedBackend;

impl CaptureBackend for UnsupportedBackend {
    fn query_dimensions(&self) -> FramegrabResult<ScreenDimensions> {
        Err(FramegrabError::unsupported(
            "no display query path for this platform",
        ))
    }

    fn capture_frame(&self, _dimensions: ScreenDimensions) -> FramegrabResult<Frame> {
        Err(FramegrabError::unsupported(
            "no capture path for this platform",
        ))
    }

    fn display_server(&self) -> DisplayServer {
        DisplayServer::Unknown
    }
}
