use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};
use tracing::info;

use ecmo_watch::{
    events, logging, ui, App, Circuit, CommandFeed, Settings, StreamFeed, Theme, ThemeChoice,
};

#[derive(Parser, Debug)]
#[command(name = "ecmo-watch")]
#[command(about = "Bedside terminal dashboard for ECMO anticoagulation, pressure and fluid balance")]
struct Args {
    /// Path to a TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bedside gateway streaming JSON commands (host:port)
    #[arg(long)]
    connect: Option<String>,

    /// Colour theme
    #[arg(long, value_enum)]
    theme: Option<ThemeChoice>,

    /// Write tracing output to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// UI tick in milliseconds
    #[arg(long)]
    tick_ms: Option<u64>,
}

impl Args {
    /// Command-line flags take precedence over file and environment.
    fn apply(self, settings: &mut Settings) {
        if let Some(connect) = self.connect {
            settings.connect = Some(connect);
        }
        if let Some(theme) = self.theme {
            settings.theme = theme;
        }
        if let Some(log_file) = self.log_file {
            settings.log_file = Some(log_file);
        }
        if let Some(tick_ms) = self.tick_ms {
            settings.tick_ms = tick_ms;
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref())?;
    args.apply(&mut settings);

    logging::init(settings.log_file.as_deref(), &settings.log_filter)?;
    let circuit = Circuit::from_settings(&settings.circuit)?;
    let theme = Theme::from_choice(settings.theme);
    let tick = Duration::from_millis(settings.tick_ms.max(10));

    // Handle TCP connection mode
    if let Some(ref addr) = settings.connect {
        return run_with_tcp(addr, circuit, theme, tick);
    }

    run_tui(None, circuit, theme, tick)
}

/// Run with commands streamed from a TCP endpoint
fn run_with_tcp(addr: &str, circuit: Circuit, theme: Theme, tick: Duration) -> Result<()> {
    // The runtime must outlive the TUI so the reader task keeps running
    let rt = tokio::runtime::Runtime::new()?;

    let feed = rt.block_on(async {
        use tokio::net::TcpStream;

        println!("Connecting to {}...", addr);
        let stream = TcpStream::connect(addr)
            .await
            .with_context(|| format!("Failed to connect to {}", addr))?;
        println!("Connected!");
        info!(addr, "connected to command feed");
        Ok::<_, anyhow::Error>(Box::new(StreamFeed::spawn(stream, addr)) as Box<dyn CommandFeed>)
    })?;

    run_tui(Some(feed), circuit, theme, tick)
}

/// Run the TUI with an optional command feed
fn run_tui(
    feed: Option<Box<dyn CommandFeed>>,
    circuit: Circuit,
    theme: Theme,
    tick: Duration,
) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    let mut app = App::new(feed, circuit, theme);
    info!(circuit = %app.circuit.summary(), "dashboard started");

    let result = run_app(&mut terminal, &mut app, tick);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    info!("dashboard stopped");
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    tick: Duration,
) -> Result<()> {
    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 80;
    const MIN_HEIGHT: u16 = 16;

    while app.running {
        // Draw UI
        terminal.draw(|frame| {
            let area = frame.area();

            // Check for minimum terminal size
            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let centered =
                    ratatui::layout::Rect::new(0, (area.height / 2).saturating_sub(2), area.width, 5)
                        .intersection(area);
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Length(1), // Tabs
                Constraint::Min(10),   // Content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            ui::common::render_header(frame, app, chunks[0]);
            ui::common::render_tabs(frame, app, chunks[1]);
            ui::render_view(frame, app, chunks[2]);
            ui::common::render_status_bar(frame, app, chunks[3]);

            // Render help overlay if active
            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(tick)? {
            match event {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    events::handle_key_event(app, key)
                }
                Event::Mouse(mouse) => {
                    // Content starts after header (1) + tabs (1)
                    events::handle_mouse_event(app, mouse, 2);
                }
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        app.poll_feed();
    }

    Ok(())
}
