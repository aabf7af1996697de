//! Capture raw frames to disk.
//!
//! Frames are written exactly as the capture contract hands them over:
//! tightly packed RGB8, top-down. A JSON sidecar records the geometry so
//! the `.rgb` file can be interpreted later. No image encoding happens
//! here.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use framegrab_capture_engine::Recorder;
use framegrab_platform_core::Frame;
use serde::Serialize;

#[derive(Serialize)]
struct FrameMetadata<'a> {
    width: u32,
    height: u32,
    pixel_format: &'a str,
    bytes: usize,
    frame_index: u32,
    captured_at: String,
}

pub fn run(output: PathBuf, count: u32, timeout_ms: Option<u64>) -> anyhow::Result<()> {
    std::fs::create_dir_all(&output)?;

    let recorder = Arc::new(Recorder::system());
    tracing::info!(
        display_server = ?recorder.display_server(),
        "starting capture of {count} frame(s)"
    );

    for index in 0..count {
        let frame = match timeout_ms {
            Some(ms) => recorder
                .next_frame_timeout(Duration::from_millis(ms))
                .map_err(|e| anyhow::anyhow!("Capture {index} failed: {e}"))?,
            None => recorder
                .next_frame()
                .map_err(|e| anyhow::anyhow!("Capture {index} failed: {e}"))?,
        };

        let stem = format!("frame_{index:04}");
        write_frame(&output, &stem, index, &frame)?;
        println!("{stem}.rgb: {frame}");
    }

    println!(
        "Captured {} frame(s) into {}",
        recorder.frames_count(),
        output.display()
    );
    Ok(())
}

fn write_frame(dir: &Path, stem: &str, index: u32, frame: &Frame) -> anyhow::Result<()> {
    let raw_path = dir.join(format!("{stem}.rgb"));
    std::fs::write(&raw_path, &frame.data)?;

    let metadata = FrameMetadata {
        width: frame.width,
        height: frame.height,
        pixel_format: "rgb8",
        bytes: frame.data.len(),
        frame_index: index,
        captured_at: chrono::Utc::now().to_rfc3339(),
    };
    let sidecar_path = dir.join(format!("{stem}.json"));
    std::fs::write(&sidecar_path, serde_json::to_string_pretty(&metadata)?)?;

    tracing::debug!(raw = %raw_path.display(), "frame written");
    Ok(())
}
