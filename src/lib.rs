//! # Drawbot
//!
//! Turns natural-language instructions into a vector drawing that can be
//! undone, redone, cleared, saved and reloaded.
//!
//! ## Architecture
//!
//! Drawbot is organized as a workspace with multiple crates:
//!
//! 1. **drawbot-core** - Identifiers, canvas constants, error taxonomy
//! 2. **drawbot-designer** - Shape model, normalizer, renderer, edit history, session
//! 3. **drawbot-generator** - Client for the instruction-to-shapes service
//! 4. **drawbot-storage** - Persistence gateway and storage backends
//! 5. **drawbot-settings** - JSON/TOML configuration
//! 6. **drawbot** - Line-oriented shell that integrates all crates

pub mod shell;

pub use drawbot_core::{DrawingId, Error, OwnerId, Result, CANVAS_HEIGHT, CANVAS_WIDTH};
pub use drawbot_designer::{
    DrawingSession, EditHistory, PixmapSurface, RenderOptions, Renderer, ShapeCommand,
};
pub use drawbot_generator::{GenerationRequest, HttpShapeGenerator, ShapeGenerator};
pub use drawbot_settings::Config;
pub use drawbot_storage::{DrawingBackend, DrawingGateway, HttpBackend, MemoryBackend};
pub use shell::{parse_line, Shell, ShellCommand};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Pretty console output on stderr, leaving stdout to the shell
/// - RUST_LOG environment variable support, INFO by default
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.to_string()));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
