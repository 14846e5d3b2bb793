//! gesturecast - Hand gesture controller service
//!
//! Main entry point for the CLI application.

use clap::Parser;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gesturecast::{
    config::Config,
    gesture::TrackingMode,
    output::{TokenListener, UdpDispatcher},
    tracking::{
        subprocess::{check_mediapipe_available, HandTrackerSubprocess},
        HandReceiver,
    },
    GesturePipeline,
};

/// gesturecast - Turn hand gestures into UDP control events
#[derive(Parser, Debug)]
#[command(name = "gesturecast", version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Consumer host (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Consumer UDP port (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Swipe deadband in normalized units (overrides config)
    #[arg(long)]
    deadband: Option<f64>,

    /// Track swipes separately for left and right hands
    #[arg(long)]
    per_hand: bool,

    /// Do not launch the hand tracker subprocess
    #[arg(long)]
    no_launch: bool,

    /// Print gesture tokens received on this port instead of tracking
    #[arg(long, value_name = "PORT")]
    listen: Option<u16>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(log_level.into())
                .from_env_lossy(),
        )
        .init();

    info!("Starting {} v{}", gesturecast::NAME, gesturecast::VERSION);

    let config = load_config(&args)?;

    // Build tokio runtime manually so the main thread stays free for the frame loop
    let runtime = tokio::runtime::Runtime::new()?;

    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = Arc::clone(&stop);
        runtime.spawn(async move {
            shutdown_signal().await;
            info!("Shutdown signal received");
            stop.store(true, Ordering::Relaxed);
        });
    }

    if let Some(port) = args.listen {
        return run_listener(port, &stop);
    }

    // Subprocess spawning needs the runtime context
    let guard = runtime.enter();

    let supervisor = if config.tracker.auto_launch {
        if !check_mediapipe_available(&config.tracker.interpreter) {
            warn!("Python mediapipe package not found; the hand tracker will likely fail");
        }
        let mut sp = HandTrackerSubprocess::new(&config.tracker);
        if let Err(e) = sp.start() {
            error!("Failed to auto-launch hand tracker: {}", e);
            // The tracker may already be running externally
        }
        Some(runtime.spawn(sp.supervise(Arc::clone(&stop))))
    } else {
        None
    };
    drop(guard);

    let mut receiver = HandReceiver::new(&config.tracker);
    receiver.start()?;

    let dispatcher = UdpDispatcher::new(&config.dispatch)?;
    let mut pipeline = GesturePipeline::new(&config.gestures, dispatcher);

    info!(
        "Gesture tracking started (tracker port: {}, deadband: {}, mode: {:?})",
        config.tracker.port, config.gestures.swipe_deadband, config.gestures.tracking_mode
    );

    pipeline.run(&mut receiver, &stop);

    // Cleanup
    receiver.stop();
    if let Some(supervisor) = supervisor {
        if let Err(e) = runtime.block_on(supervisor) {
            error!("Hand tracker supervisor failed: {}", e);
        }
    }

    info!("gesturecast stopped: {:?}", pipeline.stats());
    Ok(())
}

/// Load the config file and apply CLI overrides
fn load_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = if let Some(ref path) = args.config {
        Config::from_file(path)?
    } else {
        Config::load()?
    };

    if let Some(ref host) = args.host {
        config.dispatch.host = host.clone();
    }
    if let Some(port) = args.port {
        config.dispatch.port = port;
    }
    if let Some(deadband) = args.deadband {
        config.gestures.swipe_deadband = deadband;
    }
    if args.per_hand {
        config.gestures.tracking_mode = TrackingMode::PerHand;
    }
    if args.no_launch {
        config.tracker.auto_launch = false;
    }

    config.validate()?;

    info!("Dispatch destination: {}", config.dispatch.destination());
    info!("Tracker auto-launch: {}", config.tracker.auto_launch);

    Ok(config)
}

/// Print every gesture token arriving on `port` until stopped
fn run_listener(port: u16, stop: &AtomicBool) -> anyhow::Result<()> {
    let listener = TokenListener::bind(("0.0.0.0", port), Duration::from_millis(200))?;
    info!("Listening for gesture tokens on {}", listener.local_addr()?);

    while !stop.load(Ordering::Relaxed) {
        match listener.recv() {
            Ok(Some(event)) => println!("{}", event),
            Ok(None) => {}
            Err(e) => warn!("Rejected datagram: {}", e),
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
