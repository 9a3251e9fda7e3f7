//! Binary entry point: terminal setup, the frame loop, teardown.

use std::error::Error;
use std::time::{Duration, Instant};

use tracing::debug;
use tracing_subscriber::EnvFilter;

use folio_tui::app::{App, AppConfig};
use folio_tui::event::input::from_crossterm;
use folio_tui::geometry::Size;
use folio_tui::render::Driver;
use folio_tui::route::ROOT;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    // Logs go to stderr; redirect it when running inside the alt screen,
    // e.g. `RUST_LOG=folio_tui=debug folio-tui 2>folio.log`.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let (cols, rows) = Driver::terminal_size()?;
    let config = AppConfig::default();
    let frame_budget = Duration::from_secs_f64(1.0 / config.fps.max(1) as f64);

    let mut app = App::new(config, Size::new(cols as i32, rows as i32))?;
    let mut driver = Driver::new()?;
    driver.enter_alt_screen()?;

    app.request_navigate(ROOT);

    let result = run(&mut app, &mut driver, frame_budget).await;
    driver.leave_alt_screen()?;
    result
}

async fn run(
    app: &mut App,
    driver: &mut Driver,
    frame_budget: Duration,
) -> Result<(), Box<dyn Error>> {
    let mut last = Instant::now();
    while app.is_running() {
        while crossterm::event::poll(Duration::ZERO)? {
            if let Some(input) = from_crossterm(crossterm::event::read()?) {
                app.handle_input(input);
            }
        }

        let now = Instant::now();
        app.tick(now - last);
        last = now;

        for envelope in app.drain_events() {
            debug!(event = envelope.event.event_name(), "app event");
        }

        if app.take_redraw() {
            driver.draw(&app.render())?;
        }

        tokio::time::sleep(frame_budget).await;
    }
    Ok(())
}
