//! # UI Module
//!
//! User interface components and styling for the DaqView application.
//!
//! ## Organization
//! - `styles`: Shared button styling for the stream controls

pub mod styles;
