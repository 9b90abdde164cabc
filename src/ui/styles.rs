//! # UI Styling Module
//!
//! Centralized styling utilities for consistent UI appearance across components.
//! Extracts button styling logic so the main view stays readable.

use iced::widget::button;
use iced::{Background, Border, Color};

/// Style for the stream start button (green theme)
pub fn start_button_style() -> impl Fn(&iced::Theme, button::Status) -> button::Style {
    |_theme: &iced::Theme, status: button::Status| match status {
        button::Status::Active => button::Style {
            background: Some(Background::Color(Color::from_rgb(0.2, 0.7, 0.2))),
            text_color: Color::WHITE,
            border: Border {
                color: Color::from_rgb(0.3, 0.8, 0.3),
                width: 1.0,
                radius: 4.0.into(),
            },
            ..Default::default()
        },
        button::Status::Hovered => button::Style {
            background: Some(Background::Color(Color::from_rgb(0.3, 0.8, 0.3))),
            text_color: Color::WHITE,
            border: Border {
                color: Color::from_rgb(0.4, 0.9, 0.4),
                width: 1.0,
                radius: 4.0.into(),
            },
            ..Default::default()
        },
        button::Status::Pressed => button::Style {
            background: Some(Background::Color(Color::from_rgb(0.15, 0.6, 0.15))),
            text_color: Color::WHITE,
            border: Border {
                color: Color::from_rgb(0.2, 0.7, 0.2),
                width: 1.0,
                radius: 4.0.into(),
            },
            ..Default::default()
        },
        button::Status::Disabled => button::Style {
            background: Some(Background::Color(Color::from_rgb(0.3, 0.3, 0.3))),
            text_color: Color::from_rgb(0.6, 0.6, 0.6),
            border: Border {
                color: Color::from_rgb(0.4, 0.4, 0.4),
                width: 1.0,
                radius: 4.0.into(),
            },
            ..Default::default()
        },
    }
}

/// Style for the stream stop button (red theme)
pub fn stop_button_style() -> impl Fn(&iced::Theme, button::Status) -> button::Style {
    |_theme: &iced::Theme, status: button::Status| match status {
        button::Status::Active => button::Style {
            background: Some(Background::Color(Color::from_rgb(0.8, 0.2, 0.2))),
            text_color: Color::WHITE,
            border: Border {
                color: Color::from_rgb(0.9, 0.3, 0.3),
                width: 1.0,
                radius: 4.0.into(),
            },
            ..Default::default()
        },
        button::Status::Hovered => button::Style {
            background: Some(Background::Color(Color::from_rgb(0.9, 0.3, 0.3))),
            text_color: Color::WHITE,
            border: Border {
                color: Color::from_rgb(1.0, 0.4, 0.4),
                width: 1.0,
                radius: 4.0.into(),
            },
            ..Default::default()
        },
        button::Status::Pressed => button::Style {
            background: Some(Background::Color(Color::from_rgb(0.7, 0.15, 0.15))),
            text_color: Color::WHITE,
            border: Border {
                color: Color::from_rgb(0.8, 0.2, 0.2),
                width: 1.0,
                radius: 4.0.into(),
            },
            ..Default::default()
        },
        button::Status::Disabled => button::Style {
            background: Some(Background::Color(Color::from_rgb(0.3, 0.3, 0.3))),
            text_color: Color::from_rgb(0.6, 0.6, 0.6),
            border: Border {
                color: Color::from_rgb(0.4, 0.4, 0.4),
                width: 1.0,
                radius: 4.0.into(),
            },
            ..Default::default()
        },
    }
}
