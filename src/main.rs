use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyCode},
    execute,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::env;
use std::io::{BufWriter, stdout};
use std::sync::OnceLock;
use std::time::{Duration, Instant};
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod canvas;
mod config;
mod effects;
mod overlay;
mod sim;

use config::Options;
use effects::Effect;

static BG_COLOR: OnceLock<(u8, u8, u8)> = OnceLock::new();
static MESSAGE: OnceLock<String> = OnceLock::new();

pub fn get_bg_color() -> (u8, u8, u8) {
    *BG_COLOR.get().unwrap_or(&(0, 0, 0))
}

pub fn get_message() -> &'static str {
    MESSAGE.get().map(String::as_str).unwrap_or("HAPPY NEW YEAR!")
}

fn print_usage() {
    eprintln!("finale - Celebratory fireworks display for the terminal");
    eprintln!();
    eprintln!("Usage: finale [EFFECT] [OPTIONS]");
    eprintln!();
    eprintln!("Effects:");
    eprintln!("  fireworks Opening shell, message reveal, rolling volleys (default)");
    eprintln!("  burst     The one-shot confetti burst on its own");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --bg-color RRGGBB  Set background color as hex (e.g., --bg-color 1a1b26)");
    eprintln!("  --message TEXT     Message revealed when the opening shell detonates");
    eprintln!("  --seed N           Seed the random generator for a reproducible show");
    eprintln!();
    eprintln!("Press 'q', ESC, or Ctrl+C to exit");
}

fn run_effect<E: Effect>(seed: u64) -> std::io::Result<()> {
    let stdout = stdout();
    let mut stdout = BufWriter::with_capacity(1024 * 64, stdout);

    terminal::enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, Hide, Clear(ClearType::All))?;

    let (cols, rows) = terminal::size()?;
    let mut effect = E::new(
        cols as usize,
        rows as usize * 2,
        fastrand::Rng::with_seed(seed),
    );

    let mut last_frame = Instant::now();
    let mut accumulator = 0.0f32;
    const FIXED_DT: f32 = 1.0 / sim::scheduler::TICK_RATE as f32;

    loop {
        if event::poll(Duration::from_millis(1))? {
            match event::read()? {
                Event::Key(key_event) => {
                    if key_event.code == KeyCode::Char('q')
                        || key_event.code == KeyCode::Esc
                        || (key_event.code == KeyCode::Char('c')
                            && key_event.modifiers.contains(event::KeyModifiers::CONTROL))
                    {
                        break;
                    }
                }
                Event::Resize(cols, rows) => {
                    // Launch bounds follow the new size; entities already in
                    // flight keep their positions.
                    effect.resize(cols as usize, rows as usize * 2);
                    execute!(stdout, Clear(ClearType::All))?;
                }
                _ => {}
            }
        }

        let now = Instant::now();
        let frame_time = now.duration_since(last_frame).as_secs_f32();
        last_frame = now;

        accumulator += frame_time;
        if accumulator > FIXED_DT * 3.0 {
            accumulator = FIXED_DT * 3.0;
        }

        while accumulator >= FIXED_DT {
            effect.update(FIXED_DT);
            accumulator -= FIXED_DT;
        }

        effect.render(&mut stdout)?;
    }

    execute!(stdout, Show, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    Ok(())
}

fn main() -> std::io::Result<()> {
    let opts = match Options::parse(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("{err}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    if opts.help {
        print_usage();
        return Ok(());
    }

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    if let Some(color) = opts.bg_color {
        let _ = BG_COLOR.set(color);
    }
    if let Some(message) = opts.message {
        let _ = MESSAGE.set(message);
    }

    let seed = opts.seed.unwrap_or_else(|| fastrand::u64(..));
    info!(effect = %opts.effect, seed, "starting");

    let result = match opts.effect.as_str() {
        "fireworks" => run_effect::<effects::fireworks::FireworksEffect>(seed),
        "burst" => run_effect::<effects::burst::BurstEffect>(seed),
        _ => {
            eprintln!("Unknown effect: {}", opts.effect);
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };
    info!("stopped");
    result
}
