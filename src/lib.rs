//! Rock-paper-scissors tournament served over RFB (VNC).
//!
//! The [`session`] module is the authoritative, lock-guarded tournament
//! state. The `rfb` transport and `ui` presentation layers (feature
//! `server`) only call into it through join, leave, submit and view.
pub mod session;

#[cfg(feature = "server")]
pub mod rfb;
#[cfg(feature = "server")]
pub mod ui;

// ============================================================================
// TOURNAMENT PARAMETERS
// ============================================================================
/// Length of the move-selection window (seconds).
pub const PICKING_SECS: u64 = 10;
/// Length of the results window before the next round (seconds).
pub const REVIEW_SECS: u64 = 5;

// ============================================================================
// PRESENTATION PARAMETERS
// ============================================================================
/// Framebuffer width in pixels.
pub const UI_WIDTH: u16 = 320;
/// Framebuffer height in pixels.
pub const UI_HEIGHT: u16 = 320;
/// Left edge of the rankings column.
pub const RANKINGS_SPLIT_X: i32 = 240;
/// Default cap on framebuffer updates per connection per second.
pub const MAX_FPS: u32 = 20;
/// Desktop name announced in ServerInit.
pub const DESKTOP_NAME: &str = "RPS";

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "server")]
pub fn log() -> anyhow::Result<()> {
    use anyhow::Context;
    std::fs::create_dir_all("logs").context("create logs directory")?;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .context("time moves slow")?
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).context("create log file")?,
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).context("initialize logger")
}

/// Register Ctrl+C handler for immediate (non-graceful) termination.
/// Sessions hold nothing worth flushing, so hard exit is fine.
#[cfg(feature = "server")]
pub fn kys() {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!();
            log::warn!("interrupt received, exiting immediately");
            std::process::exit(0);
        }
    });
}
