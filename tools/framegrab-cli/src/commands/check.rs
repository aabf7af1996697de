//! Check system capabilities.

use framegrab_capture_engine::Recorder;
use framegrab_platform_core::DisplayServer;

pub fn run() -> anyhow::Result<()> {
    println!("FrameGrab System Check");
    println!("{}", "=".repeat(50));

    let recorder = Recorder::system();

    // Display server
    match recorder.display_server() {
        DisplayServer::Wayland => println!("[OK] Display server: Wayland (capture via XWayland)"),
        DisplayServer::X11 => println!("[OK] Display server: X11"),
        DisplayServer::Windows => println!("[OK] Display server: Windows"),
        DisplayServer::MacOS => println!("[OK] Display server: macOS"),
        DisplayServer::Unknown => println!("[WARN] Display server: Unknown"),
    }

    // Display geometry
    match recorder.screen_dimensions() {
        Ok(dims) => println!("[OK] Primary display: {dims}"),
        Err(e) => println!("[FAIL] Primary display query: {e}"),
    }

    #[cfg(target_os = "linux")]
    {
        let capabilities = framegrab_platform_linux::permissions::check_capabilities();
        println!();
        framegrab_platform_linux::permissions::print_capability_report(&capabilities);

        let all_required_ok = capabilities
            .iter()
            .filter(|c| c.required)
            .all(|c| c.available);

        println!();
        if all_required_ok {
            println!("All required capabilities are available. FrameGrab is ready.");
        } else {
            println!("Some required capabilities are missing. See above for fixes.");
        }
    }

    Ok(())
}
