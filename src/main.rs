//! manmark - An interactive man page browser with bookmarks
//!
//! manmark splits the terminal into a bookmark list and a page list
//! with a help bar underneath. Opening a page hands the terminal to
//! `man` (with `less` as its pager) and jumps straight to the saved
//! line; when the pager exits the browser comes back exactly where it
//! was.
//!
//! # Quick Start
//!
//! ```text
//! manmark                 # Browse with bookmarks from ~/.manmark
//! manmark -f marks.toml   # Use a different bookmark file
//! ```
//!
//! # Keybindings
//!
//! | Key | Action |
//! |-----|--------|
//! | Tab | Switch between the bookmark and page lists |
//! | j/k, arrows | Move the cursor |
//! | Enter | Open the selected page |
//! | b | Bookmark the selected page (page list) |
//! | d | Delete the selected bookmark (bookmark list) |
//! | q | Quit |

mod app;
mod bookmarks;
mod config;
mod pages;
mod pty;
mod ui;
mod views;
mod wm;

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::app::App;
use crate::bookmarks::BookmarkStore;
use crate::config::Config;
use crate::pages::PageIndex;
use crate::pty::NativePty;
use crate::ui::screen::{Screen, TerminalControl, TerminalOwner};
use crate::wm::{Action, PaneRole, WindowManager};

/// Version string from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Command line options
struct CliArgs {
    /// Bookmark file override
    bookmark_file: Option<PathBuf>,
}

fn print_version() {
    eprintln!("manmark {}", VERSION);
}

fn print_help() {
    eprintln!("manmark {} - An interactive man page browser with bookmarks", VERSION);
    eprintln!();
    eprintln!("Usage: manmark [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -f, --file <PATH>     Bookmark file (default: ~/.manmark/bookmarks.toml)");
    eprintln!("  -v, --version         Show version");
    eprintln!("  -h, --help            Show this help");
    eprintln!();
    eprintln!("Keybindings:");
    eprintln!("  Tab                   Switch between bookmark and page lists");
    eprintln!("  j/k, arrows           Move the cursor");
    eprintln!("  Enter                 Open the selected page");
    eprintln!("  b                     Bookmark the selected page (page list)");
    eprintln!("  d                     Delete the selected bookmark (bookmark list)");
    eprintln!("  q                     Quit");
    eprintln!();
    eprintln!("Configuration: ~/.manmark/config.toml");
}

fn parse_args() -> Result<CliArgs, String> {
    let args: Vec<String> = env::args().collect();
    let mut parsed = CliArgs {
        bookmark_file: None,
    };
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-v" | "--version" => {
                print_version();
                std::process::exit(0);
            }
            "-f" | "--file" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing bookmark file argument".to_string());
                }
                parsed.bookmark_file = Some(PathBuf::from(&args[i]));
            }
            arg => {
                return Err(format!("Unknown argument: {}. Use -h for help.", arg));
            }
        }
        i += 1;
    }

    Ok(parsed)
}

/// Initialize logging to `~/.manmark/manmark.log`.
fn init_logging() {
    let log_path = config::config_dir()
        .map(|dir| dir.join("manmark.log"))
        .unwrap_or_else(|| PathBuf::from("manmark.log"));

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .ok();

    if let Some(file) = log_file {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }
}

fn main() -> anyhow::Result<()> {
    let args = match parse_args() {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Use --help for usage information");
            std::process::exit(1);
        }
    };

    init_logging();
    info!("manmark starting...");

    let config = Config::load();
    let bookmark_path = args
        .bookmark_file
        .unwrap_or_else(|| config.bookmark_path());
    let bookmarks = BookmarkStore::load(bookmark_path);
    let pages = PageIndex::load();
    info!(
        "loaded {} bookmarks, {} indexed pages",
        bookmarks.len(),
        pages.len()
    );

    let mut app = App::new(bookmarks, pages);
    let bookmarks_present = !app.bookmarks.is_empty();

    // Without a drawing surface there is nothing to run
    let mut screen = Screen::new();
    screen
        .init()
        .context("could not initialize the terminal")?;

    let mut wm = WindowManager::new(&config, bookmarks_present);

    let result = run_loop(&mut wm, &mut screen, &mut app);

    let _ = screen.cleanup();
    info!("manmark exiting");
    result
}

/// Main event loop: redraw, then poll and dispatch one event at a time.
fn run_loop(wm: &mut WindowManager, screen: &mut Screen, app: &mut App) -> anyhow::Result<()> {
    let poll_timeout = Duration::from_millis(50);
    let mut pty = NativePty;

    let (cols, rows) = Screen::size()?;
    wm.layout_all(cols, rows);
    let mut needs_redraw = true;

    loop {
        if needs_redraw {
            // Drawing is only legal while the UI owns the terminal
            debug_assert_eq!(screen.owner(), TerminalOwner::Ui);
            draw(wm, app)?;
            needs_redraw = false;
        }

        if !event::poll(poll_timeout)? {
            continue;
        }

        match event::read()? {
            Event::Key(key_event) => {
                if key_event.kind != KeyEventKind::Press {
                    continue;
                }

                match key_event.code {
                    KeyCode::Tab => {
                        wm.cycle_active();
                        debug!(role = ?wm.active_pane().role, "switched active pane");
                        needs_redraw = true;
                    }
                    KeyCode::Char('q') => break,
                    KeyCode::Char('c')
                        if key_event.modifiers.contains(KeyModifiers::CONTROL) =>
                    {
                        break
                    }
                    _ => {
                        match wm.dispatch_input(key_event, app) {
                            Action::Quit => break,
                            Action::OpenPage {
                                section,
                                page,
                                line,
                            } => {
                                open_page(wm, screen, &mut pty, app, section, &page, line)?;
                                needs_redraw = true;
                            }
                            Action::None => {
                                needs_redraw = true;
                            }
                        }
                    }
                }
            }

            Event::Resize(cols, rows) => {
                wm.layout_all(cols, rows);
                screen.request_repaint()?;
                needs_redraw = true;
            }

            _ => {}
        }
    }

    Ok(())
}

/// Redraw every pane, then decorate the list panes with borders.
fn draw(wm: &mut WindowManager, app: &App) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = io::BufWriter::with_capacity(65536, stdout.lock());
    wm.draw_all(&mut out, app)?;
    for idx in 0..wm.len() {
        if wm.panes()[idx].role != PaneRole::HelpBar {
            wm.draw_border(&mut out, idx)?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Run the pager for one page and surface its exit status.
fn open_page(
    wm: &mut WindowManager,
    screen: &mut Screen,
    pty: &mut NativePty,
    app: &mut App,
    section: Option<String>,
    page: &str,
    line: Option<String>,
) -> anyhow::Result<()> {
    // No persistent stdout lock here: the pager's output pump writes
    // to stdout from its own thread while this call blocks.
    let mut out = io::stdout();
    let code = wm.open_page(
        &mut out,
        screen,
        pty,
        section.as_deref(),
        page,
        line.as_deref(),
    )?;
    out.flush()?;

    if code != 0 {
        warn!(page, code, "pager exited with non-zero status");
        app.status = Some(format!("man exited with status {}", code));
    } else {
        app.status = None;
    }

    // The terminal may have been resized while the pager had it
    let (cols, rows) = Screen::size()?;
    wm.layout_all(cols, rows);
    Ok(())
}
