//! Presentation-side state that feeds the core monitoring logs.
//!
//! ## Submodules
//!
//! - [`form`]: Input forms, one per monitoring domain, that clamp values to
//!   each field's range and step and turn a submit into a [`Command`]
//! - [`circuit`]: Circuit configuration (cannula sizes, oxygenator type)
//!
//! ## Data Flow
//!
//! ```text
//! FormState (keystrokes)      CommandFeed (bedside gateway)
//!        │                            │
//!        └──────────┬─────────────────┘
//!                   ▼
//!             ecmo_core::Command
//!                   │
//!                   ▼
//!        Dashboard::dispatch() ──▶ MonitoringLog<R> ──▶ table / chart
//! ```
//!
//! [`Command`]: ecmo_core::Command

pub mod circuit;
pub mod form;

pub use circuit::{Circuit, CircuitField, CircuitSettings, Oxygenator};
pub use form::{FieldState, FormState};
