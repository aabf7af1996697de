//! FrameGrab platform core contracts.
//!
//! This crate contains the cross-platform display/frame data structures used
//! by the capture engine and the OS backends without coupling to a concrete
//! native API, plus the pixel-normalization routines that convert each
//! backend's native layout into the single public frame format.

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod convert;

pub use convert::*;

/// Bytes per pixel in the normalized frame contract (R, G, B).
pub const BYTES_PER_PIXEL: usize = 3;

/// The primary display's current size in physical pixels.
///
/// Produced fresh on every query and never cached, so consecutive captures
/// track resolution changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenDimensions {
    pub width: u32,
    pub height: u32,
}

impl ScreenDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of pixels in the capture region.
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Byte length of a normalized frame for these dimensions.
    pub fn frame_len(&self) -> usize {
        self.width as usize * self.height as usize * BYTES_PER_PIXEL
    }
}

impl fmt::Display for ScreenDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A captured frame in the normalized format: top-down rows, 3 bytes per
/// pixel, R-G-B order, no row padding.
///
/// The buffer is exclusively owned by the caller that receives it; it is
/// never pooled or reused across captures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGB8 samples, `width * height * 3` bytes.
    pub data: Vec<u8>,
}

impl Frame {
    /// Wrap normalized pixel data, checking it matches the declared geometry.
    pub fn from_rgb(
        dimensions: ScreenDimensions,
        data: Vec<u8>,
    ) -> framegrab_common::FramegrabResult<Self> {
        if data.len() != dimensions.frame_len() {
            return Err(framegrab_common::FramegrabError::invalid_frame(format!(
                "expected {} bytes for {dimensions}, got {}",
                dimensions.frame_len(),
                data.len()
            )));
        }
        Ok(Self {
            width: dimensions.width,
            height: dimensions.height,
            data,
        })
    }

    pub fn dimensions(&self) -> ScreenDimensions {
        ScreenDimensions::new(self.width, self.height)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Frame({}x{}, {} bytes)",
            self.width,
            self.height,
            self.data.len()
        )
    }
}

/// Display server / platform family used for capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DisplayServer {
    Wayland,
    X11,
    Windows,
    MacOS,
    #[default]
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_len_matches_normalized_contract() {
        let dims = ScreenDimensions::new(1920, 1080);
        assert_eq!(dims.frame_len(), 6_220_800);
        assert_eq!(dims.pixel_count(), 2_073_600);
    }

    #[test]
    fn from_rgb_rejects_mismatched_buffer() {
        let dims = ScreenDimensions::new(2, 2);
        assert!(Frame::from_rgb(dims, vec![0; 12]).is_ok());
        assert!(Frame::from_rgb(dims, vec![0; 11]).is_err());
        assert!(Frame::from_rgb(dims, vec![0; 16]).is_err());
    }

    #[test]
    fn frame_display_includes_geometry() {
        let frame = Frame::from_rgb(ScreenDimensions::new(2, 1), vec![0; 6]).unwrap();
        assert_eq!(frame.to_string(), "Frame(2x1, 6 bytes)");
    }
}
