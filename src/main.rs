//! Headless runner for the neural field
//!
//! Run with: cargo run --features cli --bin neural-field-cli -- --width 1500 --height 1000

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use neural_field::{
        FieldConfig, FieldLoop, FieldRenderer, HeadlessHost, Host, RecordingSurface, RunTiming,
        Viewport,
    };
    use serde::Serialize;
    use tracing::{info, warn};
    use tracing_subscriber::{fmt, EnvFilter};

    #[derive(Serialize)]
    struct RunSummary {
        viewport: Viewport,
        nodes: usize,
        frames: u64,
        mean_links: f64,
        fps: f64,
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,neural_field=debug"));
    fmt().with_env_filter(filter).with_target(true).init();

    let args: Vec<String> = std::env::args().collect();
    let width = parse_arg(&args, "--width").unwrap_or(1500);
    let height = parse_arg(&args, "--height").unwrap_or(1000);
    let seconds: f64 = parse_arg(&args, "--seconds").unwrap_or(5.0);
    let fps: f64 = parse_arg(&args, "--fps").unwrap_or(60.0);
    let timing = RunTiming::new(seconds, fps)?;
    let resize = arg_value(&args, "--resize").map(parse_size).transpose()?;

    let mut config = match std::env::var("NEURAL_FIELD_CONFIG") {
        Ok(path) => {
            info!(path = %path, "Loading field config");
            FieldConfig::from_json(&std::fs::read_to_string(&path)?)?
        }
        Err(_) => FieldConfig::default(),
    };
    if let Some(seed) = parse_arg(&args, "--seed") {
        config = config.with_seed(seed);
    }

    let viewport = Viewport::new(width, height);
    let renderer = FieldRenderer::new(Some(RecordingSurface::new(viewport)), config);
    let mut field = FieldLoop::new(renderer, HeadlessHost::new(viewport));
    field.start()?;

    let mut frame_interval = tokio::time::interval(timing.frame_period);
    let mut stats_interval = tokio::time::interval(std::time::Duration::from_secs(1));
    let resize_timer = tokio::time::sleep(timing.midpoint);
    let deadline = tokio::time::sleep(timing.duration);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(resize_timer, deadline, ctrl_c);
    let mut pending_resize = resize;

    loop {
        tokio::select! {
            _ = frame_interval.tick() => {
                if field.host_mut().fire().is_some() {
                    field.on_frame()?;
                }
            }
            _ = stats_interval.tick() => {
                let stats = field.stats();
                info!(
                    frames = stats.frames,
                    nodes = stats.nodes,
                    links = stats.links,
                    fps = format!("{:.1}", field.fps()),
                    "stats"
                );
            }
            _ = &mut resize_timer, if pending_resize.is_some() => {
                if let Some(size) = pending_resize.take() {
                    info!(width = size.width, height = size.height, "Resizing viewport");
                    field.host_mut().set_viewport(size);
                    field.on_resize();
                }
            }
            _ = &mut deadline => break,
            _ = &mut ctrl_c => {
                warn!("Interrupted");
                break;
            }
        }
    }

    field.teardown();

    let stats = field.stats();
    let summary = RunSummary {
        viewport: field.host().viewport(),
        nodes: field.renderer().nodes().len(),
        frames: stats.frames,
        mean_links: stats.mean_links(),
        fps: field.fps(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|v| v == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

#[cfg(not(target_arch = "wasm32"))]
fn parse_arg<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    arg_value(args, flag).and_then(|v| v.parse().ok())
}

/// `WIDTHxHEIGHT`, e.g. `300x200`
#[cfg(not(target_arch = "wasm32"))]
fn parse_size(s: &str) -> Result<neural_field::Viewport, neural_field::FieldError> {
    let invalid = || neural_field::FieldError::Config(format!("expected WIDTHxHEIGHT, got {:?}", s));
    let (w, h) = s.split_once(['x', 'X']).ok_or_else(invalid)?;
    Ok(neural_field::Viewport::new(
        w.trim().parse().map_err(|_| invalid())?,
        h.trim().parse().map_err(|_| invalid())?,
    ))
}

#[cfg(target_arch = "wasm32")]
fn main() {}
