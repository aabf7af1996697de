//! FrameGrab Capture Engine
//!
//! Single-shot, pull-based capture of the primary display. One logical
//! operation — "give me the current screen as pixels" — is implemented three
//! ways against three native graphics subsystems, behind one contract:
//! top-down rows, 3 bytes per pixel, R-G-B, no row padding.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                  Recorder                    │
//! │   dimensions / next_frame / frames_count     │
//! │        │                  (atomic counter)   │
//! │        ▼                                     │
//! │  dyn CaptureBackend                          │
//! │   ┌─────────┐  ┌───────────┐  ┌───────────┐  │
//! │   │ GDI     │  │ Quartz    │  │ X11       │  │
//! │   │ (BGR24) │  │ (BGRA32)  │  │ (masked)  │  │
//! │   └─────────┘  └───────────┘  └───────────┘  │
//! │        normalized at the backend boundary    │
//! └──────────────────────────────────────────────┘
//! ```

pub mod backend;
pub mod recorder;

pub use backend::{platform_backend, CaptureBackend};
pub use recorder::Recorder;
