//! Main entry point for the Teecraft t-shirt customizer

use anyhow::{bail, Result};
use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io::{self, Stdout},
    panic,
    path::PathBuf,
    time::{Duration, Instant},
};

use teecraft::{
    config::Config,
    form::FieldChange,
    input::handle_event,
    logging,
    render_engines::mockup::{render_mockup, MockupInput},
    sink::NotifySink,
    state::AppShell,
    terminal_capabilities::detect_capabilities,
    theme::Theme,
    ui,
    upload::{select_file, ImageRef, ResourceRegistry},
};

/// Target frame time for 60 FPS
const FRAME_TIME_MS: u64 = 16;

/// Command line options
#[derive(Debug, Default)]
struct Args {
    image: Option<PathBuf>,
    text: Option<String>,
    theme: Option<String>,
    render_once: bool,
    plain: bool,
}

impl Args {
    fn parse() -> Self {
        let mut args = Args::default();
        let mut iter = std::env::args().skip(1);
        while let Some(a) = iter.next() {
            match a.as_str() {
                "--image" => args.image = iter.next().map(PathBuf::from),
                "--text" => args.text = iter.next(),
                "--theme" => args.theme = iter.next(),
                "--render-once" => args.render_once = true,
                "--plain" => args.plain = true,
                other => eprintln!("Ignoring unknown argument '{}'", other),
            }
        }
        args
    }
}

fn main() -> Result<()> {
    // Set up panic hook to restore terminal on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableBracketedPaste);
        original_hook(panic_info);
    }));

    let args = Args::parse();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: {:#}, using defaults", e);
            Config::default()
        }
    };

    // Logging is best effort; the app works without a log file
    match logging::initialize_logging(&config.logging.level) {
        Ok(path) => tracing::info!(log = ?path, "logging initialized"),
        Err(e) => eprintln!("Warning: {:#}", e),
    }

    let capabilities = detect_capabilities(config.preview.color);
    tracing::debug!(color = capabilities.color_support.name(), size = ?capabilities.size, "terminal detected");

    if args.render_once {
        return run_render_once(&args, &config, capabilities.color_support);
    }

    let mut shell = AppShell::new(config, capabilities, Box::new(NotifySink));
    shell.mount();

    if let Some(path) = args.image.as_deref() {
        match select_file(Some(path)) {
            Some(file) => shell.handle_image_upload(file),
            None => eprintln!("Could not read image: {}", path.display()),
        }
    }
    if let Some(text) = args.text {
        shell.apply_change(FieldChange::CustomText(text));
    }

    let mut terminal = setup_terminal()?;

    let result = run_event_loop(&mut terminal, &mut shell);

    // Release the shortcut and the uploaded image before leaving
    shell.teardown();

    cleanup_terminal(terminal)?;

    result
}

/// Set up the terminal for TUI rendering
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn cleanup_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Main event loop - handles input and renders UI
fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    shell: &mut AppShell,
) -> Result<()> {
    let frame_duration = Duration::from_millis(FRAME_TIME_MS);

    loop {
        let frame_start = Instant::now();

        terminal.draw(|frame| ui::render(frame, shell))?;

        let timeout = frame_duration.saturating_sub(frame_start.elapsed());
        if event::poll(timeout)? {
            handle_event(event::read()?, shell)?;
        }

        if shell.should_quit {
            break;
        }
    }

    Ok(())
}

/// Print a single mockup to stdout without starting the TUI
fn run_render_once(
    args: &Args,
    config: &Config,
    color: teecraft::terminal_capabilities::ColorSupport,
) -> Result<()> {
    let theme = match args.theme.as_deref() {
        Some(name) => match Theme::from_name(name) {
            Some(theme) => theme,
            None => bail!("Unknown theme '{}' (expected classic, dark or vibrant)", name),
        },
        None => Theme::default(),
    };

    let resources = ResourceRegistry::new();
    let handle = match args.image.as_deref() {
        Some(path) => match select_file(Some(path)) {
            Some(file) => Some(resources.create(&file)),
            None => bail!("Could not read image: {}", path.display()),
        },
        None => None,
    };

    let reference = handle
        .as_ref()
        .map(|h| h.reference().clone())
        .unwrap_or(ImageRef::Placeholder);
    let image = resources.resolve(&reference);

    let mockup = render_mockup(&MockupInput {
        image: &image,
        custom_text: args.text.as_deref().unwrap_or(""),
        theme,
        width: config.preview.width,
        max_height: None,
    });

    if args.plain {
        print!("{}", mockup.to_plain());
    } else {
        print!("{}", mockup.to_ansi(color));
    }

    Ok(())
}
