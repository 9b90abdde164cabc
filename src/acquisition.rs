//! # Acquisition Management Module
//!
//! Runs the acquisition session in a dedicated thread so device reads never
//! block the UI. The manager owns the session and the poll ticker: while a
//! session is running it selects over the command channel and a 100 ms
//! `crossbeam_channel::tick`, calling `poll_step()` once per tick. Because
//! both arms run in the same loop, poll steps are strictly serialized and
//! `Stop` takes effect before the next scheduled poll.
//!
//! ## Why
//! Separating session management from the UI keeps the session logic
//! toolkit-free and lets tests drive the manager over plain channels.

use crate::config::StreamConfig;
use crate::driver::DaqDriver;
use crate::samples::EngineeringSample;
use crate::session::{AcquisitionSession, DisplaySink};
use crossbeam_channel::{never, select, tick, Receiver, Sender};
use std::sync::mpsc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquisitionCommand {
    Start,
    Stop,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StreamStatus {
    Running,
    Stopped,
    Error(String),
}

/// Messages sent from the acquisition thread to the UI thread
#[derive(Debug)]
pub enum AcquisitionUpdate {
    Status(StreamStatus),
    Samples {
        snapshot: Vec<EngineeringSample>,
        latest: EngineeringSample,
    },
}

/// Display sink that forwards publications to the UI thread.
///
/// Send failures are ignored: if the UI side is gone the application is
/// shutting down and the session will be torn down by the manager loop.
struct ChannelDisplay {
    sender: mpsc::Sender<AcquisitionUpdate>,
}

impl DisplaySink for ChannelDisplay {
    fn publish(&mut self, snapshot: Vec<EngineeringSample>, latest: EngineeringSample) {
        let _ = self.sender.send(AcquisitionUpdate::Samples { snapshot, latest });
    }
}

/// Builds a fresh driver for each session; lets tests inject doubles.
pub type DriverFactory = Box<dyn Fn() -> Box<dyn DaqDriver> + Send>;

/// Manages the acquisition session lifecycle.
///
/// Runs in a dedicated thread. Processes start/stop commands from the UI and
/// drives the periodic poll while a session is active.
pub struct AcquisitionManager {
    command_receiver: Receiver<AcquisitionCommand>,
    update_sender: mpsc::Sender<AcquisitionUpdate>,
    config: StreamConfig,
    driver_factory: DriverFactory,
}

impl AcquisitionManager {
    /// Creates a new AcquisitionManager.
    ///
    /// Returns the manager and a sender for issuing commands from the UI thread.
    pub fn new(
        update_sender: mpsc::Sender<AcquisitionUpdate>,
        config: StreamConfig,
        driver_factory: DriverFactory,
    ) -> (Self, Sender<AcquisitionCommand>) {
        let (command_sender, command_receiver) = crossbeam_channel::unbounded();

        let manager = AcquisitionManager {
            command_receiver,
            update_sender,
            config,
            driver_factory,
        };

        (manager, command_sender)
    }

    fn send_status(&self, status: StreamStatus) {
        let _ = self.update_sender.send(AcquisitionUpdate::Status(status));
    }

    /// Runs the acquisition loop.
    ///
    /// This should be called in a spawned thread. It blocks until the command
    /// channel is closed, stopping any active session on the way out.
    pub fn run(self) {
        let mut session: Option<AcquisitionSession> = None;
        // Disarmed ticker: never fires until a session starts
        let mut ticker: Receiver<Instant> = never();

        loop {
            select! {
                recv(self.command_receiver) -> command => match command {
                    Ok(AcquisitionCommand::Start) => {
                        if session.is_some() {
                            // UI disables Start while running; a duplicate here
                            // is a stale click, not a new session
                            log::warn!("Start requested while already streaming, ignoring");
                            continue;
                        }

                        let driver = (self.driver_factory)();
                        let display = ChannelDisplay {
                            sender: self.update_sender.clone(),
                        };
                        let mut new_session = AcquisitionSession::new(
                            driver,
                            Box::new(display),
                            self.config.buffer_capacity,
                        );

                        match new_session.start(&self.config) {
                            Ok(()) => {
                                ticker = tick(Duration::from_millis(self.config.poll_interval_ms));
                                session = Some(new_session);
                                self.send_status(StreamStatus::Running);
                            }
                            Err(e) => {
                                log::error!("{}", e);
                                self.send_status(StreamStatus::Error(e.to_string()));
                            }
                        }
                    }
                    Ok(AcquisitionCommand::Stop) => {
                        if let Some(mut active) = session.take() {
                            active.stop();
                        }
                        ticker = never();
                        self.send_status(StreamStatus::Stopped);
                    }
                    Err(_) => {
                        log::info!("Acquisition manager: command channel closed, shutting down");
                        if let Some(mut active) = session.take() {
                            active.stop();
                        }
                        break;
                    }
                },
                recv(ticker) -> _ => {
                    if let Some(active) = session.as_mut() {
                        if let Err(e) = active.poll_step() {
                            // Session already released its resources; fail-stop
                            self.send_status(StreamStatus::Error(e.to_string()));
                            session = None;
                            ticker = never();
                        }
                    }
                }
            }
        }
    }
}
