pub mod config;
pub mod controller;
pub mod joy;
pub mod mqtt;
pub mod ui;

use crate::config::BridgeConfig;
use crate::controller::{StateHandle, AXIS_COUNT, BUTTON_COUNT};
use crate::joy::{BroadcastSettings, BroadcasterHandle};
use crate::mqtt::{MqttDriver, MqttTransport};
use crate::ui::VirtualJoyUI;
use color_eyre::{eyre::eyre, Result};
use eframe::egui;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

// Upper bound for the transport to wind down after the window closed
const TEARDOWN_TIMEOUT: Duration = Duration::from_secs(2);

#[tokio::main]
async fn main() -> Result<()> {
    setup()?;

    let config = BridgeConfig::load().await?;
    let shutdown = CancellationToken::new();

    let state = StateHandle::new();
    info!(
        "Virtual joy node started. Buttons: {}, Axes: {}",
        BUTTON_COUNT, AXIS_COUNT
    );

    let (transport, mqtt_driver) = MqttTransport::connect(&config.mqtt)
        .map_err(|e| eyre!("Failed to set up MQTT transport: {}", e))?;

    let broadcaster = BroadcasterHandle::spawn(
        Some(BroadcastSettings::default()),
        Box::new(transport),
        state.subscribe(),
        shutdown.clone(),
    )
    .map_err(|e| eyre!("Failed to spawn broadcaster: {}", e))?;

    let interrupt = shutdown.clone();
    tokio::spawn(async move {
        tokio::select! {
            _ = interrupt.cancelled() => {}
            result = tokio::signal::ctrl_c() => {
                match result {
                    Ok(()) => info!("Interrupt received, shutting down"),
                    Err(e) => debug!("Unable to listen for interrupt: {}", e),
                }
                interrupt.cancel();
            }
        }
    });

    info!("Starting controller window");
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(ui::WINDOW_TITLE)
            .with_inner_size(ui::WINDOW_SIZE)
            .with_resizable(false),
        ..Default::default()
    };

    let ui_shutdown = shutdown.clone();
    let ui_result = eframe::run_native(
        ui::WINDOW_TITLE,
        native_options,
        Box::new(move |cc| Ok(Box::new(VirtualJoyUI::new(cc, state, ui_shutdown)))),
    );

    teardown(shutdown, broadcaster, mqtt_driver).await;

    ui_result.map_err(|e| eyre!("Controller window failed: {}", e))
}

// Stop publishing, then give the transport time to send its DISCONNECT.
// Failures here are not reported.
async fn teardown(
    shutdown: CancellationToken,
    broadcaster: BroadcasterHandle,
    mqtt_driver: MqttDriver,
) {
    shutdown.cancel();

    let stats = broadcaster.join().await;
    debug!("Broadcaster finished: {:?}", stats);

    mqtt_driver.finish(TEARDOWN_TIMEOUT).await;
    info!("Virtual joy node stopped");
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    setup_logging_env();
    Ok(())
}

fn setup_logging_env() {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .pretty()
        .init();
}
