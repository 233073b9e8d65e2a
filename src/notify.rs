//! User-visible notifications (the dashboard's toasts).

use std::sync::Mutex;
use tokio::sync::mpsc;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
  Success,
  Error,
  Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
  pub title: String,
  pub message: String,
  pub level: Level,
}

impl Notification {
  pub fn new(level: Level, title: impl Into<String>, message: impl Into<String>) -> Self {
    Self {
      title: title.into(),
      message: message.into(),
      level,
    }
  }

  pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
    Self::new(Level::Success, title, message)
  }

  pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
    Self::new(Level::Error, title, message)
  }

  pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
    Self::new(Level::Info, title, message)
  }
}

pub trait Notifier: Send + Sync {
  fn notify(&self, notification: Notification);
}

/// Writes notifications to the log. Used by the one-shot CLI commands.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
  fn notify(&self, n: Notification) {
    match n.level {
      Level::Error => error!(title = %n.title, "{}", n.message),
      Level::Success | Level::Info => info!(title = %n.title, "{}", n.message),
    }
  }
}

/// Forwards notifications to the dashboard's event loop.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
  tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
  pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Self { tx }, rx)
  }
}

impl Notifier for ChannelNotifier {
  fn notify(&self, notification: Notification) {
    // Receiver is gone once the dashboard has shut down.
    let _ = self.tx.send(notification);
  }
}

/// Keeps every notification in memory.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
  seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn take(&self) -> Vec<Notification> {
    match self.seen.lock() {
      Ok(mut seen) => std::mem::take(&mut *seen),
      Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
    }
  }
}

impl Notifier for RecordingNotifier {
  fn notify(&self, notification: Notification) {
    match self.seen.lock() {
      Ok(mut seen) => seen.push(notification),
      Err(poisoned) => poisoned.into_inner().push(notification),
    }
  }
}
