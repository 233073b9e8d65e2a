use clap::{Parser, Subcommand};
use color_eyre::eyre::{bail, eyre};
use color_eyre::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use sconto_admin::api::requests::FileUpload;
use sconto_admin::api::Api;
use sconto_admin::app::App;
use sconto_admin::config::Config;
use sconto_admin::guard::{GuardOutcome, SessionGuard};
use sconto_admin::hooks::Hooks;
use sconto_admin::logging;
use sconto_admin::notify::{ChannelNotifier, Notifier, TracingNotifier};
use sconto_admin::session::{SessionStore, SqliteSessionStore};

#[derive(Parser, Debug)]
#[command(name = "sconto-admin")]
#[command(about = "Operations dashboard for the Sconto admin backend")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/sconto-admin/config.yaml)
  #[arg(short, long, global = true)]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Option<Cmd>,
}

#[derive(Subcommand, Debug)]
enum Cmd {
  /// Log in and store the session cookie
  Login {
    #[arg(short, long)]
    email: String,
    /// Falls back to SCONTO_ADMIN_PASSWORD
    #[arg(short, long)]
    password: Option<String>,
  },
  /// Forget the stored session
  Logout,
  /// Show who the stored session belongs to
  Whoami,
  /// Upload a file and print its stored path
  Upload { file: PathBuf },
  /// Open the terminal dashboard (default)
  Dashboard,
}

fn open_session(config: &Config) -> Result<Arc<dyn SessionStore>> {
  let store = match &config.session.path {
    Some(path) => SqliteSessionStore::open(path)?,
    None => SqliteSessionStore::open_default()?,
  };
  Ok(Arc::new(store))
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();
  let config = Config::load(args.config.as_deref())?;
  let session = open_session(&config)?;
  let api = Api::from_config(&config, session.clone());

  match args.command.unwrap_or(Cmd::Dashboard) {
    Cmd::Dashboard => dashboard(&config, api, session).await,
    Cmd::Login { email, password } => {
      let hooks = cli_hooks(&config, api)?;
      let password = match password {
        Some(p) => p,
        None => Config::get_password()?,
      };
      let response = hooks.login(&email, &password).await?;
      println!("Logged in as {}", response.data.user.email);
      Ok(())
    }
    Cmd::Logout => {
      cli_hooks(&config, api)?.logout()?;
      println!("Logged out");
      Ok(())
    }
    Cmd::Whoami => {
      logging::init_stderr()?;
      let guard = SessionGuard::from_config(&config, api);
      match guard.check_token(session.token()?.as_deref()).await {
        GuardOutcome::Render(ctx) => {
          println!("{} {} <{}>", ctx.user.first_name, ctx.user.last_name, ctx.user.email);
          Ok(())
        }
        GuardOutcome::Redirect { .. } => bail!("Not logged in. Run `sconto-admin login`."),
      }
    }
    Cmd::Upload { file } => upload(&cli_hooks(&config, api)?, &file).await,
  }
}

/// Hooks for one-shot commands: stderr logging, notifications to the log.
fn cli_hooks(config: &Config, api: Api) -> Result<Hooks> {
  logging::init_stderr()?;
  let notifier: Arc<dyn Notifier> = Arc::new(TracingNotifier);
  Ok(Hooks::from_config(config, api, notifier))
}

async fn upload(hooks: &Hooks, file: &Path) -> Result<()> {
  let upload = FileUpload::from_path(file)
    .await
    .map_err(|e| eyre!("Failed to read {}: {}", file.display(), e))?;
  let response = hooks.upload_file(upload).await?;
  println!("{}", response.data.item.path);
  Ok(())
}

async fn dashboard(config: &Config, api: Api, session: Arc<dyn SessionStore>) -> Result<()> {
  let _log_guard = logging::init_file()?;

  let guard = SessionGuard::from_config(config, api.clone());
  let ctx = match guard.check_token(session.token()?.as_deref()).await {
    GuardOutcome::Render(ctx) => ctx,
    GuardOutcome::Redirect { .. } => bail!("Not logged in. Run `sconto-admin login --email <email>` first."),
  };
  info!(user = %ctx.user.email, "dashboard opened");

  let (notifier, notifications) = ChannelNotifier::new();
  let hooks = Hooks::from_config(config, api, Arc::new(notifier));
  let name = format!("{} {}", ctx.user.first_name, ctx.user.last_name);

  let mut app = App::new(config, hooks, Some(name.trim().to_string()));
  app.run(notifications).await
}
