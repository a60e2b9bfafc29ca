use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crossterm::event::DisableMouseCapture;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, terminal};
use indoc::indoc;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};

use term_call::constants::{POLL_INTERVAL, WIDE_BREAKPOINT};
use term_call::drivers::console::ConsoleInputDriver;
use term_call::keybindings::KeyBindings;
use term_call::media::Participant;
use term_call::runner::{CallApp, HasCallOverlay, overlay_viewport, run_call_app};
use term_call::ui::UiFrame;
use term_call::{
    CallKind, CallOverlay, CallTarget, ConfigError, ContactIdentity, OverlayChange, OverlayConfig,
    theme, tracing_sub,
};

const RECENT_EVENTS: usize = 8;

#[derive(Parser, Debug)]
#[command(
    name = "term-call",
    version = env!("CARGO_PKG_VERSION"),
    about = "Draggable voice/video call overlay for the terminal",
    after_help = indoc! {"
        Participant specs:
          NAME[:FLAG]...   flags: video, novideo, audio, muted,
                           excellent, good, fair, poor
          e.g. --participant Ada:video:audio:good --participant Grace:muted:poor

        Without --participant the overlay calls --contact one-to-one.
    "}
)]
struct Cli {
    /// Kind of call to open on start (voice or video).
    #[arg(short = 'k', long = "kind", value_name = "KIND", default_value = "video")]
    kind: String,

    /// Display name of the one-to-one contact.
    #[arg(long = "contact", value_name = "NAME", default_value = "Ada Lovelace")]
    contact: String,

    /// Avatar reference for the contact.
    #[arg(long = "avatar", value_name = "URL")]
    avatar: Option<String>,

    /// Show the contact as online.
    #[arg(long = "online")]
    online: bool,

    /// Remote participant for a group call. Repeatable.
    #[arg(short = 'p', long = "participant", value_name = "SPEC")]
    participants: Vec<String>,

    /// Duration timer period in milliseconds.
    #[arg(
        long = "tick-ms",
        value_name = "MS",
        default_value_t = 1000,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    tick_ms: u64,

    /// Terminal width at which the participant grid goes wide.
    #[arg(long = "breakpoint", value_name = "COLUMNS", default_value_t = WIDE_BREAKPOINT)]
    breakpoint: u16,

    /// Append structured logs to this file.
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,
}

struct DemoConfig {
    kind: CallKind,
    target: CallTarget,
    overlay: OverlayConfig,
}

impl TryFrom<&Cli> for DemoConfig {
    type Error = ConfigError;

    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        let kind = cli.kind.parse::<CallKind>()?;
        let target = if cli.participants.is_empty() {
            let name = cli.contact.trim();
            if name.is_empty() {
                return Err(ConfigError::EmptyName);
            }
            let mut contact = ContactIdentity::new(name).with_online(cli.online);
            if let Some(avatar) = &cli.avatar {
                contact = contact.with_avatar(avatar.clone());
            }
            CallTarget::Contact(contact)
        } else {
            let list = cli
                .participants
                .iter()
                .enumerate()
                .map(|(i, spec)| Participant::parse_spec(format!("p{}", i + 1), spec))
                .collect::<Result<Vec<_>, _>>()?;
            CallTarget::Participants(list)
        };
        let overlay = OverlayConfig {
            tick_period: Duration::from_millis(cli.tick_ms),
            wide_breakpoint: cli.breakpoint,
            ..OverlayConfig::default()
        };
        Ok(Self {
            kind,
            target,
            overlay,
        })
    }
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let config = DemoConfig::try_from(&cli).map_err(io::Error::other)?;
    tracing_sub::init(cli.log_file.as_deref())?;

    let (width, height) = terminal::size()?;
    let mut app = App::new(&config, overlay_viewport(width, height));
    app.overlay.open(config.kind, config.target.clone());

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    terminal::enable_raw_mode()?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let mut driver = ConsoleInputDriver::new();

    let result = run_call_app(
        &mut terminal,
        &mut driver,
        &mut app,
        KeyBindings::default(),
        POLL_INTERVAL,
    );

    terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

struct App {
    overlay: CallOverlay,
    target: CallTarget,
    recent: Vec<String>,
}

impl App {
    fn new(config: &DemoConfig, viewport: term_call::layout::Viewport) -> Self {
        Self {
            overlay: CallOverlay::new(config.overlay, viewport),
            target: config.target.clone(),
            recent: Vec::new(),
        }
    }

    fn record(&mut self, line: String) {
        self.recent.push(line);
        if self.recent.len() > RECENT_EVENTS {
            let excess = self.recent.len() - RECENT_EVENTS;
            self.recent.drain(..excess);
        }
    }

    /// Stand-in for the signaling layer: a requested hangup drops the peer
    /// and pushes the shorter list back into the overlay.
    fn drop_participant(&mut self, id: &str) {
        if let CallTarget::Participants(list) = &mut self.target {
            list.retain(|p| p.id != id);
            self.overlay.update_participants(list.clone());
        }
    }
}

impl HasCallOverlay for App {
    fn overlay(&mut self) -> &mut CallOverlay {
        &mut self.overlay
    }
}

impl CallApp for App {
    fn call_target(&self) -> CallTarget {
        self.target.clone()
    }

    fn render_host(&mut self, frame: &mut UiFrame<'_>, area: Rect) {
        let mut lines = vec![
            Line::styled(
                "term-call",
                Style::default()
                    .fg(theme::accent())
                    .add_modifier(Modifier::BOLD),
            ),
            Line::raw(""),
            Line::raw("Drag the overlay by its header. Click its buttons or use the keys below."),
            Line::raw(""),
        ];
        lines.extend(self.recent.iter().map(|l| Line::raw(l.as_str())));
        let block = Block::default().borders(Borders::ALL).title(" host ");
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn on_overlay_change(&mut self, change: &OverlayChange) {
        match change {
            OverlayChange::Tick(_) | OverlayChange::Moved => return,
            OverlayChange::PeerHangupRequested(id) => {
                let id = id.clone();
                self.drop_participant(&id);
            }
            _ => {}
        }
        self.record(format!("{change:?}"));
    }
}
