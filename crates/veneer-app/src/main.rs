//! veneer launcher demo.
//!
//! Builds a launcher window with compiled-in controls, binds the layout
//! named in `veneer.toml` (or `VENEER_CONFIG`) on top of it, then replays a
//! short session of pointer events and blink ticks.
//!
//! Usage:
//!   veneer-app [run] [layout]     bind and replay a session
//!   veneer-app resave <layout>    load and save a layout in canonical form
//!   veneer-app dump <layout>      print the parsed layout as JSON

mod actions;
mod window;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use veneer_layout::{codec, editor};
use veneer_skin::{FsImageLoader, HostWindow};
use veneer_types::PointerEvent;
use veneer_types::config::VeneerConfig;

use window::{LauncherWindow, START_BUTTON};

/// Blink ticks replayed by `run`.
const DEMO_BLINK_TICKS: u32 = 4;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("resave") => resave(layout_arg(&args)?),
        Some("dump") => dump(layout_arg(&args)?),
        Some("run") => run(args.get(1).map(PathBuf::from)),
        other => run(other.map(PathBuf::from)),
    }
}

fn layout_arg(args: &[String]) -> Result<&Path> {
    args.get(1)
        .map(Path::new)
        .context("expected a layout file path")
}

fn run(layout: Option<PathBuf>) -> Result<()> {
    let config_path = VeneerConfig::locate();
    let config = VeneerConfig::load(&config_path)
        .with_context(|| format!("reading {}", config_path.display()))?;
    log::info!(
        "Starting launcher ({}x{}, layout {})",
        config.client_width,
        config.client_height,
        layout.as_deref().unwrap_or(&config.layout_path).display(),
    );

    let mut win = LauncherWindow::new(config);
    match layout {
        Some(path) => win.load_layout(&path, &FsImageLoader),
        None => win.reload(),
    }

    let form = win.host.form();
    log::info!(
        "Window '{}' {}x{}, {} controls",
        form.caption,
        form.client_size.width,
        form.client_size.height,
        win.host.len() - 1,
    );

    // Hover and click every synthesized button, then the start button.
    let mut targets = win.host.dynamic_controls().to_vec();
    targets.extend(win.id(START_BUTTON));
    for id in targets {
        for event in [
            PointerEvent::Enter,
            PointerEvent::Press,
            PointerEvent::Release,
            PointerEvent::Click,
            PointerEvent::Leave,
        ] {
            win.pointer(id, event);
        }
    }

    let interval = win.config.blink_interval_ms;
    for tick in 0..DEMO_BLINK_TICKS {
        log::debug!("Blink tick {tick} (+{interval} ms)");
        win.blink_tick();
    }

    win.reload();
    let events = &win.events;
    log::info!(
        "Session finished: {} starts, {} option dialogs, {} opened, {} messages, minimized={}, closed={}",
        events.started,
        events.options_shown,
        events.opened.len(),
        events.messages.len(),
        events.minimized,
        events.closed,
    );
    Ok(())
}

/// Load and save `path` so it carries only set fields, with asset paths
/// in canonical form.
fn resave(path: &Path) -> Result<()> {
    let mut def = codec::try_load(path).with_context(|| format!("loading {}", path.display()))?;
    let fixed = editor::normalize_asset_paths(&mut def);
    log::debug!("Normalized {fixed} asset paths");
    codec::save(&mut def, path).with_context(|| format!("saving {}", path.display()))?;
    log::info!("Rewrote {}", path.display());
    Ok(())
}

fn dump(path: &Path) -> Result<()> {
    let def = codec::try_load(path).with_context(|| format!("loading {}", path.display()))?;
    println!("{}", serde_json::to_string_pretty(&def)?);
    Ok(())
}
