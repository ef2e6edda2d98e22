//! # ecmo-watch
//!
//! A bedside terminal dashboard for patients on extracorporeal membrane
//! oxygenation (ECMO).
//!
//! Clinicians enter anticoagulation labs, oxygenator pressures and fluid
//! balance figures through keyboard forms, or a bedside gateway streams them
//! in. Each domain keeps an append-only log in session memory, shown as a
//! table; pressures are also plotted against sample number. The append,
//! projection and idempotency rules live in [`ecmo_core`]; this crate is the
//! terminal around it.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │ events  │───▶│   app    │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (keys)  │    │ (state)  │    │(render) │    │         │ │
//! │  └─────────┘    └────┬─────┘    └─────────┘    └─────────┘ │
//! │                      │  ▲                                   │
//! │                      ▼  │                                   │
//! │               ┌──────────────┐   ┌─────────┐                │
//! │               │  ecmo_core   │   │  feed   │◀── TCP | channel│
//! │               │ (Dashboard)  │   │(commands)                │
//! │               └──────────────┘   └─────────┘                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, view navigation, and user interaction logic
//! - **[`data`]**: Input forms and circuit configuration
//! - **[`feed`]**: Command feed abstraction ([`CommandFeed`] trait) with
//!   implementations for TCP streams and in-process channels
//! - **[`ui`]**: Terminal rendering using ratatui
//! - **[`settings`]** and **[`logging`]**: Layered configuration and file-backed tracing
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Manual entry only
//! ecmo-watch
//!
//! # Also accept commands from a bedside gateway
//! ecmo-watch --connect 10.0.0.12:7070 --log-file ecmo.log
//! ```
//!
//! ### As a library with a channel feed
//!
//! ```
//! use ecmo_core::{Command, Domain, PressureInput, RequestId};
//! use ecmo_watch::{App, ChannelFeed, Circuit, Theme};
//!
//! let (tx, feed) = ChannelFeed::create("pump-controller", 16);
//! let mut app = App::new(Some(Box::new(feed)), Circuit::default(), Theme::dark());
//!
//! let input = PressureInput { pre_oxygenator: Some(210.0), post_oxygenator: Some(190.0) };
//! tx.try_send(Command::new(RequestId::new(), 1, input)).unwrap();
//!
//! assert_eq!(app.poll_feed(), 1);
//! assert_eq!(app.dashboard.count(Domain::Pressure), 1);
//! ```

pub mod app;
pub mod data;
pub mod events;
pub mod feed;
pub mod logging;
pub mod settings;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, View};
pub use data::{Circuit, CircuitField, CircuitSettings, FieldState, FormState, Oxygenator};
pub use feed::{ChannelFeed, CommandFeed, StreamFeed};
pub use settings::{Settings, ThemeChoice};
pub use ui::Theme;
