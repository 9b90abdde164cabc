// Hide console window on Windows in release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod acquisition;
mod app;
mod charts;
mod config;
mod convert;
mod driver;
mod error;
mod recorder;
mod samples;
mod session;
mod sim_driver;
mod ui;

use acquisition::{AcquisitionManager, AcquisitionUpdate};
use app::DaqView;
use config::Config;
use iced::Theme;
use sim_driver::SimulatedDaq;
use std::sync::mpsc;

fn main() -> iced::Result {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::load().unwrap_or_else(|e| {
        log::warn!("Falling back to default config: {}", e);
        Config::default()
    });

    // Create a channel for communication between the acquisition thread and the UI thread
    let (sender, receiver) = mpsc::channel::<AcquisitionUpdate>();

    // Create the acquisition manager; the simulated driver stands in for the
    // vendor hardware-abstraction library
    let (manager, command_sender) = AcquisitionManager::new(
        sender,
        config.stream.clone(),
        Box::new(|| Box::new(SimulatedDaq::new())),
    );

    // Spawn a thread to run the acquisition loop
    std::thread::spawn(move || {
        manager.run();
    });

    iced::application(
        "DaqView: Live Pressure & Temperature",
        DaqView::update,
        DaqView::view,
    )
    .subscription(DaqView::subscription)
    .theme(|_| Theme::Light)
    .window_size((900.0, 700.0))
    .run_with(|| DaqView::new(receiver, command_sender))
}
