#![forbid(unsafe_code)]

//! sortviz binary entry point.

use std::fs::File;
use std::io::{self, BufWriter};
use std::sync::Mutex;
use std::time::Duration;

use crossterm::event::Event;
use sortviz_demo::app::App;
use sortviz_demo::cli::Opts;
use sortviz_demo::session::TerminalSession;
use sortviz_demo::tone::TerminalTone;
use tracing_subscriber::EnvFilter;
use web_time::Instant;

const DEFAULT_LOG_FILTER: &str = "sortviz_core=debug,sortviz_demo=debug";

fn main() {
    let opts = Opts::parse();
    init_logging();

    if let Err(e) = run(&opts) {
        eprintln!("Runtime error: {e}");
        std::process::exit(1);
    }
}

/// Install a file-backed subscriber when `SORTVIZ_LOG` names a file.
///
/// The terminal belongs to the scene, so logs never go to stdout/stderr.
fn init_logging() {
    let Ok(path) = std::env::var("SORTVIZ_LOG") else {
        return;
    };
    let file = match File::create(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Cannot open log file {path}: {e}");
            return;
        }
    };
    let filter = EnvFilter::try_from_env("SORTVIZ_LOG_LEVEL")
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
}

fn run(opts: &Opts) -> io::Result<()> {
    if !opts.in_range() {
        tracing::warn!(
            size = opts.size,
            speed = opts.speed,
            "size or speed out of range; clamping"
        );
    }

    let config = opts.visualizer_config();
    tracing::info!(
        algorithm = %config.algorithm,
        theme = %config.theme,
        size = config.size,
        speed = config.speed,
        seed = config.seed,
        "starting"
    );

    let tone = TerminalTone::stdout(opts.bell, config.tone_spacing);
    let mut app = App::new(config);
    app.attach_sink(Box::new(tone));
    if opts.autostart {
        app.start();
    }

    let frame_interval = opts.frame_interval();
    let exit_after = (opts.exit_after_ms > 0).then(|| Duration::from_millis(opts.exit_after_ms));

    let session = TerminalSession::new()?;
    let mut out = BufWriter::new(io::stdout());
    let started = Instant::now();
    let mut deadline = started;

    loop {
        let (width, height) = session.size()?;
        app.draw(&mut out, width, height)?;

        // Handle input until the next frame is due.
        deadline += frame_interval;
        loop {
            let now = Instant::now();
            let Some(remaining) = deadline.checked_duration_since(now) else {
                break;
            };
            if !session.poll_event(remaining)? {
                break;
            }
            if let Event::Key(key) = session.read_event()? {
                app.handle_key(&key);
            }
            if app.should_quit() {
                break;
            }
        }

        let elapsed = started.elapsed();
        if app.should_quit() || exit_after.is_some_and(|limit| elapsed >= limit) {
            break;
        }

        // Fell behind (e.g. terminal stalled): resync instead of bursting.
        if Instant::now() > deadline + frame_interval {
            deadline = Instant::now();
        }

        app.tick(elapsed);
    }

    let stats = app.visualizer().stats();
    let audio = app.visualizer().audio();
    tracing::info!(
        frames = stats.frames,
        steps = stats.steps,
        resets = stats.resets,
        tones = audio.delivered(),
        "exiting"
    );
    Ok(())
}
