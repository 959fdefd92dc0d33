use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tokio::sync::mpsc;

use mvu_kit::config::{Config, ConfigStore, RuntimeConfig};
use mvu_kit::demo::api::{SimulatedApi, User};
use mvu_kit::demo::field::FieldMsg;
use mvu_kit::demo::pair_form::{PairForm, PairFormMsg, PairFormParams};
use mvu_kit::demo::profile::{ProfileFormMsg, ProfileMsg, ProfilePage, ProfileParams};
use mvu_kit::demo::view::ViewNode;
use mvu_kit::logging::init_tracing;
use mvu_kit::runtime::{Frame, Runtime};
use mvu_kit::{GlobalMsg, Validated};

#[derive(Parser)]
#[command(
    name = "mvu-demo",
    version,
    about = "Run a demo page against a simulated API and print its final state"
)]
struct Cli {
    /// Config file (default: <config dir>/mvu-kit/config.toml).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Simulated API latency; overrides `demo.latency_ms`.
    #[arg(long = "latency-ms", value_name = "MS")]
    latency_ms: Option<u64>,

    /// Which scenario to run.
    #[arg(long, value_enum, default_value = "profile")]
    scenario: Scenario,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Scenario {
    /// Edit a profile, save it, then deactivate the account.
    Profile,
    /// Submit a two-field form twice; responses arrive in reverse order.
    DoubleSubmit,
    /// Open a profile that does not exist.
    Invalid,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let path = cli.config.clone().unwrap_or_else(Config::config_path);
    let store = ConfigStore::open(path).context("Failed to load configuration")?;
    let config = store.get();
    init_tracing(&config.logging.filter);

    let latency = Duration::from_millis(cli.latency_ms.unwrap_or(config.demo.latency_ms));
    tracing::info!(
        config = %store.path().display(),
        scenario = ?cli.scenario,
        latency_ms = latency.as_millis() as u64,
        "Starting demo"
    );

    let output = match cli.scenario {
        Scenario::Profile => run_profile(config.runtime, latency).await?,
        Scenario::DoubleSubmit => run_double_submit(config.runtime, latency).await?,
        Scenario::Invalid => run_invalid(config.runtime, latency).await?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn log_frame(frame: Frame<ViewNode>) {
    tracing::info!("Rendered\n{}", frame.body);
    if let Some(actions) = frame.contextual_actions {
        tracing::info!("Actions\n{}", actions);
    }
}

fn demo_user() -> User {
    User {
        id: 1,
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        job_title: "Analyst".to_string(),
        active: true,
    }
}

async fn run_profile(runtime: RuntimeConfig, latency: Duration) -> Result<serde_json::Value> {
    let api = SimulatedApi::new(latency).with_user(demo_user());
    let (routes, mut requested) = mpsc::unbounded_channel();

    let handle = Runtime::<Validated<ProfilePage>>::builder()
        .config(runtime)
        .renderer(log_frame)
        .on_route(move |request| {
            if routes.send(request).is_err() {
                tracing::trace!("Route request dropped (receiver gone)");
            }
        })
        .mount(ProfileParams {
            api,
            viewer_id: 1,
            profile_id: 1,
        })
        .await;

    handle.dispatch(GlobalMsg::Local(ProfileMsg::StartEditing));
    handle.settled().await?;

    handle.dispatch(GlobalMsg::Local(ProfileMsg::Form(ProfileFormMsg::JobTitle(
        FieldMsg::Set("Mathematician".to_string()),
    ))));
    handle.dispatch(GlobalMsg::Local(ProfileMsg::SaveChanges));
    handle.settled().await?;

    handle.dispatch(GlobalMsg::Local(ProfileMsg::Deactivate));
    handle.settled().await?;

    while let Ok(request) = requested.try_recv() {
        tracing::info!(route = ?request.route(), "Navigation requested");
    }

    let state = handle.unmount().await?;
    Ok(serde_json::to_value(&*state)?)
}

async fn run_double_submit(runtime: RuntimeConfig, latency: Duration) -> Result<serde_json::Value> {
    let api = SimulatedApi::new(latency);
    api.queue_latencies([latency * 3, latency]);

    let handle = Runtime::<PairForm>::builder()
        .config(runtime)
        .renderer(log_frame)
        .mount(PairFormParams { api, a: 0, b: 0 })
        .await;

    handle.dispatch(PairFormMsg::FieldA(FieldMsg::Set(5)));
    handle.dispatch(PairFormMsg::Submit);
    handle.dispatch(PairFormMsg::FieldB(FieldMsg::Set(9)));
    handle.dispatch(PairFormMsg::Submit);
    handle.settled().await?;

    let stats = handle.stats();
    tracing::info!(
        renders = stats.renders,
        commands = stats.commands_spawned,
        "Double submit settled"
    );

    let state = handle.unmount().await?;
    Ok(serde_json::to_value(&*state)?)
}

async fn run_invalid(runtime: RuntimeConfig, latency: Duration) -> Result<serde_json::Value> {
    let api = SimulatedApi::new(latency).with_user(demo_user());

    let handle = Runtime::<Validated<ProfilePage>>::builder()
        .config(runtime)
        .renderer(log_frame)
        .mount(ProfileParams {
            api,
            viewer_id: 1,
            profile_id: 404,
        })
        .await;

    // Ignored: an invalid page absorbs every message.
    handle.dispatch(GlobalMsg::Local(ProfileMsg::StartEditing));
    handle.settled().await?;

    let state = handle.unmount().await?;
    Ok(serde_json::to_value(&*state)?)
}
