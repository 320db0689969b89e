//! Metaview - desktop metadata viewer.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use metaview::gui;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    tracing::info!("Metaview starting...");

    // Run the GUI application
    gui::run()?;

    Ok(())
}
