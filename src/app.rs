use crate::commands;
use crate::config::Config;
use crate::event::{Event, EventHandler};
use crate::hooks::Hooks;
use crate::notify::{Level, Notification};
use crate::ui;
use crate::ui::components::{CommandEvent, CommandInput, KeyResult};
use crate::ui::view::{View, ViewAction};
use crate::ui::views::root_view;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use std::io::stdout;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, info};

const TICK_RATE: Duration = Duration::from_millis(250);
const NOTIFICATION_TTL: Duration = Duration::from_secs(6);
const ROOT_COMMAND: &str = "merchants";

/// Main application state
pub struct App {
  /// Navigation stack - root is always at index 0
  view_stack: Vec<Box<dyn View>>,

  /// The `:` palette
  command_input: CommandInput,

  hooks: Hooks,
  base_url: String,
  page_size: u32,

  /// Signed-in admin, shown in the header
  user_name: Option<String>,

  /// Latest notification and when it arrived
  notification: Option<(Notification, Instant)>,

  should_quit: bool,
}

impl App {
  pub fn new(config: &Config, hooks: Hooks, user_name: Option<String>) -> Self {
    let page_size = config.ui.page_size;
    let view_stack = root_view(ROOT_COMMAND, &hooks, page_size).into_iter().collect();
    Self {
      view_stack,
      command_input: CommandInput::new(),
      hooks,
      base_url: config.api.url.clone(),
      page_size,
      user_name,
      notification: None,
      should_quit: false,
    }
  }

  pub async fn run(&mut self, notifications: mpsc::UnboundedReceiver<Notification>) -> Result<()> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut events = EventHandler::new(TICK_RATE);
    events.forward_notifications(notifications);

    let result = self.event_loop(&mut terminal, &mut events).await;

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
  }

  async fn event_loop(
    &mut self,
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    events: &mut EventHandler,
  ) -> Result<()> {
    while !self.should_quit {
      terminal.draw(|frame| ui::draw(frame, self))?;

      match events.next().await {
        Some(event) => self.handle_event(event),
        None => break,
      }
    }
    Ok(())
  }

  fn handle_event(&mut self, event: Event) {
    match event {
      Event::Key(key) => self.handle_key(key),
      Event::Tick => self.tick(),
      Event::Notify(notification) => self.notification = Some((notification, Instant::now())),
    }
  }

  fn tick(&mut self) {
    for view in &mut self.view_stack {
      view.tick();
    }
    if self
      .notification
      .as_ref()
      .is_some_and(|(_, at)| at.elapsed() > NOTIFICATION_TTL)
    {
      self.notification = None;
    }
  }

  fn handle_key(&mut self, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
      self.should_quit = true;
      return;
    }

    // A view that is taking text input gets every key
    let capturing = self.current_view().is_some_and(|v| v.is_capturing_input());
    if !capturing {
      match self.command_input.handle_key(key) {
        KeyResult::Event(CommandEvent::Submitted(cmd)) => {
          self.execute_command(&cmd);
          return;
        }
        KeyResult::Event(CommandEvent::Cancelled) | KeyResult::Handled => return,
        KeyResult::NotHandled => {}
      }
    }

    let action = match self.current_view_mut() {
      Some(view) => view.handle_key(key),
      None => ViewAction::None,
    };
    self.apply(action);
  }

  fn apply(&mut self, action: ViewAction) {
    match action {
      ViewAction::None => {}
      ViewAction::Push(view) => {
        debug!(view = %view.breadcrumb_label(), "push");
        self.view_stack.push(view);
      }
      ViewAction::Pop => {
        if self.view_stack.len() > 1 {
          self.view_stack.pop();
        } else {
          self.should_quit = true;
        }
      }
    }
  }

  fn execute_command(&mut self, cmd: &str) {
    let Some(command) = commands::find(cmd) else {
      self.notification = Some((
        Notification::new(Level::Error, "Unknown command", cmd),
        Instant::now(),
      ));
      return;
    };

    if command.name == "quit" {
      self.should_quit = true;
      return;
    }

    if let Some(view) = root_view(command.name, &self.hooks, self.page_size) {
      info!(command = command.name, "switching root view");
      // Dropping the old stack unmounts its observers
      self.view_stack = vec![view];
    }
  }

  pub fn current_view(&self) -> Option<&dyn View> {
    self.view_stack.last().map(|v| v.as_ref())
  }

  pub fn current_view_mut(&mut self) -> Option<&mut Box<dyn View>> {
    self.view_stack.last_mut()
  }

  pub fn breadcrumb(&self) -> Vec<String> {
    self.view_stack.iter().map(|v| v.breadcrumb_label()).collect()
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  pub fn user_name(&self) -> Option<&str> {
    self.user_name.as_deref()
  }

  pub fn notification(&self) -> Option<&Notification> {
    self.notification.as_ref().map(|(n, _)| n)
  }

  pub fn command_input(&self) -> &CommandInput {
    &self.command_input
  }
}
