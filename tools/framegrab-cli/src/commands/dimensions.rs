//! Print the primary display's dimensions.

use framegrab_capture_engine::Recorder;

pub fn run(json: bool) -> anyhow::Result<()> {
    let recorder = Recorder::system();
    let dims = recorder
        .screen_dimensions()
        .map_err(|e| anyhow::anyhow!("Failed to query display: {e}"))?;

    if json {
        println!("{}", serde_json::to_string(&dims)?);
    } else {
        println!("Primary display: {dims}");
    }
    Ok(())
}
