//! Command feed abstraction for machine-supplied observations.
//!
//! Besides the keyboard forms, observations can arrive from outside the
//! terminal: a bedside gateway streaming newline-delimited JSON, or another
//! part of the process pushing commands through a channel. Every command
//! carries its own request id, so a feed that re-delivers a command cannot
//! append it twice.

mod channel;
mod stream;

pub use channel::ChannelFeed;
pub use stream::StreamFeed;

use std::fmt::Debug;

use ecmo_core::Command;

/// Trait for receiving append commands from outside the terminal.
///
/// # Example
///
/// ```
/// use ecmo_watch::{ChannelFeed, CommandFeed};
///
/// let (_tx, mut feed) = ChannelFeed::create("bedside-gateway", 16);
/// assert!(feed.poll().is_none());
/// assert_eq!(feed.description(), "channel: bedside-gateway");
/// ```
pub trait CommandFeed: Send + Debug {
    /// Take the next pending command, if any.
    ///
    /// Must not block.
    fn poll(&mut self) -> Option<Command>;

    /// Human-readable description of the feed, shown in the status bar.
    fn description(&self) -> &str;

    /// The most recent error reported by the feed, if any.
    fn error(&self) -> Option<String>;
}
