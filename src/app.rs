use crate::acquisition::{AcquisitionCommand, AcquisitionUpdate, StreamStatus};
use crate::charts::{PressureChartType, TemperatureChartType};
use crate::samples::EngineeringSample;
use crate::ui::styles;
use iced::widget::{button, column, container, row, text};
use iced::{Element, Length, Subscription, Task};
use plotters_iced::ChartWidget;
use std::sync::mpsc::Receiver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    Stopped,
    Running,
}

// Iced Application State
pub struct DaqView {
    /// Current plot window, newest sample last
    pub samples: Vec<EngineeringSample>,
    pub latest: Option<EngineeringSample>,
    pub stream_state: StreamState,
    pub last_error: Option<String>,
    receiver: Receiver<AcquisitionUpdate>,
    command_sender: crossbeam_channel::Sender<AcquisitionCommand>,
}

#[derive(Debug, Clone)]
pub enum Message {
    Tick,
    StartStream,
    StopStream,
}

impl DaqView {
    pub fn new(
        receiver: Receiver<AcquisitionUpdate>,
        command_sender: crossbeam_channel::Sender<AcquisitionCommand>,
    ) -> (Self, Task<Message>) {
        (
            DaqView {
                samples: Vec::new(),
                latest: None,
                stream_state: StreamState::Stopped,
                last_error: None,
                receiver,
                command_sender,
            },
            Task::none(),
        )
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => {
                // Process all pending updates without blocking
                while let Ok(update) = self.receiver.try_recv() {
                    match update {
                        AcquisitionUpdate::Status(status) => match status {
                            StreamStatus::Running => {
                                self.stream_state = StreamState::Running;
                                self.last_error = None;
                            }
                            StreamStatus::Stopped => {
                                self.stream_state = StreamState::Stopped;
                            }
                            StreamStatus::Error(e) => {
                                // Fatal to the session: back to stopped controls
                                log::error!("Acquisition error: {}", e);
                                self.stream_state = StreamState::Stopped;
                                self.last_error = Some(e);
                            }
                        },
                        AcquisitionUpdate::Samples { snapshot, latest } => {
                            self.samples = snapshot;
                            self.latest = Some(latest);
                        }
                    }
                }
                Task::none()
            }
            Message::StartStream => {
                if let Err(e) = self.command_sender.send(AcquisitionCommand::Start) {
                    log::error!("Failed to send start command: {}", e);
                }
                Task::none()
            }
            Message::StopStream => {
                if let Err(e) = self.command_sender.send(AcquisitionCommand::Stop) {
                    log::error!("Failed to send stop command: {}", e);
                }
                // State will be updated when we receive StreamStatus::Stopped
                Task::none()
            }
        }
    }

    pub fn subscription(&self) -> Subscription<Message> {
        iced::time::every(std::time::Duration::from_millis(16)).map(|_| Message::Tick)
    }

    pub fn view(&'_ self) -> Element<'_, Message> {
        let readouts = self.create_readouts();
        let controls = self.create_controls();

        let pressure_chart = ChartWidget::new(PressureChartType { state: self })
            .width(Length::Fill)
            .height(Length::Fill);

        let temperature_chart = ChartWidget::new(TemperatureChartType { state: self })
            .width(Length::Fill)
            .height(Length::Fill);

        let plots = column![pressure_chart, temperature_chart]
            .spacing(10)
            .width(Length::Fill)
            .height(Length::Fill);

        let content = column![readouts, controls, plots]
            .spacing(15)
            .padding(20);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn create_readouts(&self) -> Element<'_, Message> {
        let temp_label = match &self.latest {
            Some(sample) => format!("Temperature: {:.2} °F", sample.temperature_f),
            None => "Temperature: -- °F".to_string(),
        };
        let press_label = match &self.latest {
            Some(sample) => format!("Pressure: {:.2} PSI", sample.pressure_psi),
            None => "Pressure: -- PSI".to_string(),
        };

        let mut readouts = column![
            text(temp_label).size(24),
            text(press_label).size(24),
        ]
        .spacing(5);

        if let Some(error) = &self.last_error {
            readouts = readouts.push(
                text(format!("Error: {}", error)).size(16).style(|_theme| {
                    iced::widget::text::Style {
                        color: Some(iced::Color::from_rgb(0.8, 0.2, 0.2)),
                    }
                }),
            );
        }

        readouts.into()
    }

    fn create_controls(&self) -> Element<'_, Message> {
        let stopped = self.stream_state == StreamState::Stopped;

        let start_button = button(text("Stream"))
            .on_press_maybe(if stopped {
                Some(Message::StartStream)
            } else {
                None
            })
            .padding(10)
            .style(styles::start_button_style());

        let stop_button = button(text("Stop"))
            .on_press_maybe(if stopped {
                None
            } else {
                Some(Message::StopStream)
            })
            .padding(10)
            .style(styles::stop_button_style());

        row![start_button, stop_button].spacing(10).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use std::sync::mpsc;

    fn test_app() -> (DaqView, mpsc::Sender<AcquisitionUpdate>) {
        let (update_tx, update_rx) = mpsc::channel();
        let (command_tx, _command_rx) = crossbeam_channel::unbounded();
        let (app, _task) = DaqView::new(update_rx, command_tx);
        (app, update_tx)
    }

    fn sample(index: u64) -> EngineeringSample {
        EngineeringSample {
            index,
            pressure_psi: 50.0,
            temperature_f: 120.0,
            timestamp: Local::now(),
        }
    }

    #[test]
    fn test_tick_drains_updates() {
        let (mut app, update_tx) = test_app();

        update_tx
            .send(AcquisitionUpdate::Status(StreamStatus::Running))
            .unwrap();
        update_tx
            .send(AcquisitionUpdate::Samples {
                snapshot: vec![sample(0), sample(1)],
                latest: sample(1),
            })
            .unwrap();

        let _ = app.update(Message::Tick);

        assert_eq!(app.stream_state, StreamState::Running);
        assert_eq!(app.samples.len(), 2);
        assert_eq!(app.latest.unwrap().index, 1);
    }

    #[test]
    fn test_error_returns_to_stopped_controls() {
        let (mut app, update_tx) = test_app();
        app.stream_state = StreamState::Running;

        update_tx
            .send(AcquisitionUpdate::Status(StreamStatus::Error(
                "Stream read failed: device unplugged".to_string(),
            )))
            .unwrap();
        let _ = app.update(Message::Tick);

        assert_eq!(app.stream_state, StreamState::Stopped);
        assert!(app.last_error.is_some());
    }

    #[test]
    fn test_running_clears_previous_error() {
        let (mut app, update_tx) = test_app();
        app.last_error = Some("old failure".to_string());

        update_tx
            .send(AcquisitionUpdate::Status(StreamStatus::Running))
            .unwrap();
        let _ = app.update(Message::Tick);

        assert!(app.last_error.is_none());
    }
}
