//! `phone-kvm`: drive a phone through a KVM-over-IP bridge from the shell.
//!
//! Wires the configuration, the HTTPS bridge client, the relay client, the
//! gesture engine and the screenshot service together, runs one subcommand,
//! and exits.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_config() + CLI/env overrides
//!  └─ HttpsClient (or RecordingTransport with --dry-run)
//!  └─ HttpRelayClient
//!  └─ GestureEngine / ScreenshotService
//!  └─ run one Command
//! ```
//!
//! # Configuration precedence
//!
//! Flags beat environment variables (`PIKVM_BASE_URL`, `PIKVM_USERNAME`,
//! `PIKVM_PASSWORD`, `PIKVM_VERIFY_SSL`, `PIKVM_TIMEOUT`,
//! `PHONE_KVM_RELAY_URL`), which beat the TOML file named by `--config` /
//! `PHONE_KVM_CONFIG`, which beats the built-in defaults.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use phone_kvm_agent::application::{
    ConnectionGuard, GestureEngine, HidTransport, RequestOptions, ScreenshotService,
};
use phone_kvm_agent::infrastructure::{
    frame::screenshot_service,
    relay::{HttpRelayClient, DEFAULT_RELAY_TIMEOUT},
    storage::{load_config, AgentConfig},
    transport::{HttpsClient, RecordingTransport},
};
use phone_kvm_core::protocol::{mouse_move, SNAPSHOT};
use phone_kvm_core::{supported_apps, Gesture, GestureOutcome, Shortcut};

/// Coordinate the bridge clamps to the screen edge.
const EDGE: i32 = 32500;

#[derive(Debug, Parser)]
#[command(name = "phone-kvm", version, about = "Drive a phone through a KVM-over-IP bridge")]
struct Cli {
    /// TOML configuration file; missing file means defaults.
    #[arg(long, env = "PHONE_KVM_CONFIG", default_value = "phone-kvm.toml")]
    config: PathBuf,

    /// Bridge base URL, e.g. https://10.0.0.7
    #[arg(long, env = "PIKVM_BASE_URL")]
    base_url: Option<String>,

    #[arg(long, env = "PIKVM_USERNAME")]
    username: Option<String>,

    #[arg(long, env = "PIKVM_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Verify the bridge's TLS certificate: bare flag, or `=1`/`=true`/`=True`.
    #[arg(
        long,
        env = "PIKVM_VERIFY_SSL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = parse_switch
    )]
    verify_ssl: Option<bool>,

    /// Per-request timeout in seconds.
    #[arg(long, env = "PIKVM_TIMEOUT")]
    timeout: Option<f64>,

    /// Clipboard relay base URL.
    #[arg(long, env = "PHONE_KVM_RELAY_URL")]
    relay_url: Option<String>,

    /// Log bridge calls instead of sending them.
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Move to (X, Y) and click.
    Tap {
        #[arg(allow_negative_numbers = true)]
        x: i32,
        #[arg(allow_negative_numbers = true)]
        y: i32,
    },
    /// Move to (X, Y) and click twice.
    DoubleTap {
        #[arg(allow_negative_numbers = true)]
        x: i32,
        #[arg(allow_negative_numbers = true)]
        y: i32,
    },
    /// Press and hold at (X, Y).
    LongPress {
        #[arg(allow_negative_numbers = true)]
        x: i32,
        #[arg(allow_negative_numbers = true)]
        y: i32,
        #[arg(long, default_value_t = phone_kvm_core::domain::gesture::DEFAULT_LONG_PRESS_MS)]
        duration_ms: i64,
    },
    /// Drag from (X0, Y0) to (X1, Y1).
    Swipe {
        #[arg(allow_negative_numbers = true)]
        x0: i32,
        #[arg(allow_negative_numbers = true)]
        y0: i32,
        #[arg(allow_negative_numbers = true)]
        x1: i32,
        #[arg(allow_negative_numbers = true)]
        y1: i32,
        /// Drag duration; 0 jumps straight to the end point.
        #[arg(long, default_value_t = phone_kvm_core::domain::gesture::DEFAULT_SWIPE_MS)]
        duration_ms: i64,
    },
    /// Navigate back.
    Back,
    /// Go to the home screen.
    Home,
    /// Send a key combination, e.g. `shortcut AltLeft KeyC`.
    Shortcut {
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Open an app by display name.
    Launch { app: String },
    /// Paste TEXT into the focused field.
    Type { text: String },
    /// Capture the screen.
    Screenshot {
        /// Write the decoded image here instead of printing JSON.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the registered app names.
    ListApps,
    /// Connect, sweep the pointer to the four screen edges, save a snapshot.
    Probe {
        #[arg(long, default_value = "screen.jpg")]
        out: PathBuf,
    },
    /// Perform a JSON gesture, e.g. '{"action":"tap","x":540,"y":1200}'.
    Gesture { json: String },
}

/// `1`, `true` and `True` enable; anything else disables.
fn parse_switch(raw: &str) -> Result<bool, String> {
    Ok(matches!(raw.trim(), "1" | "true" | "True"))
}

impl Cli {
    /// Applies flag and environment overrides on top of `config`.
    fn apply_overrides(&self, config: &mut AgentConfig) {
        if let Some(url) = &self.base_url {
            config.bridge.base_url.clone_from(url);
        }
        if let Some(user) = &self.username {
            config.bridge.username.clone_from(user);
        }
        if let Some(password) = &self.password {
            config.bridge.password.clone_from(password);
        }
        if let Some(verify) = self.verify_ssl {
            config.bridge.verify_tls = verify;
        }
        if let Some(timeout) = self.timeout {
            config.bridge.timeout_secs = timeout;
        }
        if let Some(url) = &self.relay_url {
            config.relay.url.clone_from(url);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    cli.apply_overrides(&mut config);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(&config.logging.level))
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    config.validate().context("invalid configuration")?;

    let transport: Arc<dyn HidTransport> = if cli.dry_run {
        info!("dry run: no requests will reach the bridge");
        Arc::new(RecordingTransport::new())
    } else {
        Arc::new(HttpsClient::new(&config.bridge).context("building bridge client")?)
    };

    run(cli.command, &config, transport).await
}

async fn run(
    command: Command,
    config: &AgentConfig,
    transport: Arc<dyn HidTransport>,
) -> anyhow::Result<()> {
    let relay = Arc::new(
        HttpRelayClient::new(&config.relay.url, DEFAULT_RELAY_TIMEOUT)
            .context("building relay client")?,
    );
    let engine = GestureEngine::new(Arc::clone(&transport), relay, config.pacing.clone());
    let timeout = Duration::try_from_secs_f64(config.bridge.timeout_secs)
        .context("bridge.timeout_secs")?;

    match command {
        Command::Tap { x, y } => engine.tap(x, y).await?,
        Command::DoubleTap { x, y } => engine.double_tap(x, y).await?,
        Command::LongPress { x, y, duration_ms } => engine.long_press(x, y, duration_ms).await?,
        Command::Swipe {
            x0,
            y0,
            x1,
            y1,
            duration_ms,
        } => engine.swipe(x0, y0, x1, y1, Some(duration_ms)).await?,
        Command::Back => engine.back().await?,
        Command::Home => engine.home().await?,
        Command::Shortcut { keys } => {
            let shortcut: Shortcut = keys.join(",").parse().context("parsing key names")?;
            engine.key_shortcut(&shortcut).await?;
        }
        Command::Launch { app } => {
            if !engine.launch_app(&app).await? {
                bail!("unknown app {app:?}; see `phone-kvm list-apps`");
            }
        }
        Command::Type { text } => engine.type_text(&text).await?,
        Command::Screenshot { out } => {
            let service = screenshot_service(Arc::clone(&transport), &config.screenshot)
                .context("building screenshot service")?;
            save_or_print(&service, timeout, out).await?;
        }
        Command::ListApps => {
            let mut apps = supported_apps();
            apps.sort_unstable();
            for app in apps {
                println!("{app}");
            }
        }
        Command::Probe { out } => probe(transport, config, timeout, &out).await?,
        Command::Gesture { json } => {
            let gesture: Gesture = serde_json::from_str(&json).context("parsing gesture JSON")?;
            if engine.perform(&gesture).await? == GestureOutcome::AppNotFound {
                bail!("unknown app in gesture {json}");
            }
        }
    }
    Ok(())
}

async fn save_or_print(
    service: &ScreenshotService,
    timeout: Duration,
    out: Option<PathBuf>,
) -> anyhow::Result<()> {
    let shot = service.capture(timeout).await;
    match out {
        Some(path) => {
            let bytes = STANDARD
                .decode(&shot.base64_data)
                .context("decoding screenshot")?;
            std::fs::write(&path, bytes)
                .with_context(|| format!("writing {}", path.display()))?;
            info!(
                path = %path.display(),
                width = shot.width,
                height = shot.height,
                is_sensitive = shot.is_sensitive,
                "screenshot saved"
            );
        }
        None => println!("{}", serde_json::to_string(&shot)?),
    }
    Ok(())
}

/// Connectivity check: every call must succeed for the probe to pass.
async fn probe(
    transport: Arc<dyn HidTransport>,
    config: &AgentConfig,
    timeout: Duration,
    out: &std::path::Path,
) -> anyhow::Result<()> {
    ConnectionGuard::new(Arc::clone(&transport))
        .connect()
        .await
        .context("set_connected")?;

    for (x, y) in [(0, EDGE), (0, -EDGE), (-EDGE, 0), (EDGE, 0)] {
        transport
            .post(&mouse_move(x, y))
            .await
            .with_context(|| format!("moving to ({x}, {y})"))?;
        tokio::time::sleep(config.pacing.after_gesture()).await;
    }

    let frame = transport
        .request(SNAPSHOT, "GET", RequestOptions::default().timeout(timeout))
        .await
        .context("fetching snapshot")?;
    std::fs::write(out, &frame.body).with_context(|| format!("writing {}", out.display()))?;
    info!(path = %out.display(), bytes = frame.body.len(), "probe finished");
    Ok(())
}
