use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::*;

use matchday_terminal::config::Config;
use matchday_terminal::demo_feed::spawn_demo_provider;
use matchday_terminal::form::Widget;
use matchday_terminal::provider::spawn_provider;
use matchday_terminal::state::{self, AppState, ProviderCommand, apply_delta};
use matchday_terminal::ui::{self, page::Target};

const PAGE_JUMP: usize = 10;

struct App {
    state: AppState,
    should_quit: bool,
    cmd_tx: Option<mpsc::Sender<ProviderCommand>>,
}

impl App {
    fn new(start_path: &str, cmd_tx: Option<mpsc::Sender<ProviderCommand>>) -> Self {
        Self {
            state: AppState::new(start_path),
            should_quit: false,
            cmd_tx,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        if self.state.help_overlay {
            match key.code {
                KeyCode::Char('?') | KeyCode::Esc => self.state.help_overlay = false,
                KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            }
            return;
        }

        let widget = self.state.focused_widget();
        let typing = widget.is_some_and(Widget::is_typed);
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.state.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.state.focus_prev(),
            KeyCode::Enter => self.activate(),
            KeyCode::Esc => self.go_back(),
            KeyCode::Backspace if typing => self.state.backspace(),
            KeyCode::Backspace => self.go_back(),
            KeyCode::Left => self.state.cycle_choice(false),
            KeyCode::Right => self.state.cycle_choice(true),
            KeyCode::PageDown => self.state.page_jump(true, PAGE_JUMP),
            KeyCode::PageUp => self.state.page_jump(false, PAGE_JUMP),
            KeyCode::Char(ch) if typing => self.state.type_char(ch),
            KeyCode::Char(' ') if widget == Some(Widget::Checkbox) => self.state.toggle_checkbox(),
            KeyCode::Char(' ') if widget.is_some_and(Widget::is_choice) => {
                self.state.cycle_choice(true)
            }
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('j') => self.state.focus_next(),
            KeyCode::Char('k') => self.state.focus_prev(),
            KeyCode::Char('b') => self.go_back(),
            KeyCode::Char('h') => self.navigate("/"),
            KeyCode::Char('l') => {
                if self.state.is_authenticated() {
                    self.state.push_log("[INFO] Already logged in");
                } else {
                    self.navigate("/login/");
                }
            }
            KeyCode::Char('o') => {
                if self.state.is_authenticated() {
                    let cmd = self.state.logout_command();
                    self.send(cmd, "Logout");
                } else {
                    self.state.push_log("[INFO] Not logged in");
                }
            }
            KeyCode::Char('r') => self.send(ProviderCommand::Reload, "Reload"),
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            _ => {}
        }
    }

    fn activate(&mut self) {
        match self.state.focused_target() {
            Some(Target::Link(href)) => self.navigate(&href),
            Some(Target::Submit) => {
                if let Some(cmd) = self.state.submission() {
                    self.send(cmd, "Submit");
                }
            }
            Some(Target::Field(_)) => match self.state.focused_widget() {
                Some(Widget::Radio | Widget::Select) => self.state.cycle_choice(true),
                Some(Widget::Checkbox) => self.state.toggle_checkbox(),
                _ => self.state.focus_next(),
            },
            None => {}
        }
    }

    fn go_back(&mut self) {
        match self.state.begin_back() {
            Some(path) => self.send(ProviderCommand::Navigate { path }, "Back"),
            None => self.state.push_log("[INFO] No earlier page"),
        }
    }

    fn navigate(&mut self, path: &str) {
        self.send(
            ProviderCommand::Navigate {
                path: path.to_string(),
            },
            "Navigation",
        );
    }

    fn send(&mut self, cmd: ProviderCommand, what: &str) {
        let Some(tx) = &self.cmd_tx else {
            self.state.push_log(format!("[INFO] {what} unavailable"));
            self.state.cancel_back();
            return;
        };
        if tx.send(cmd).is_err() {
            self.state.push_log(format!("[WARN] {what} request failed"));
            self.state.cancel_back();
        }
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    let config = Config::from_env().apply_args(std::env::args().skip(1));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    if config.demo {
        spawn_demo_provider(&config, tx, cmd_rx);
    } else {
        spawn_provider(config.clone(), tx, cmd_rx);
    }

    let mut app = App::new(&config.start_path, Some(cmd_tx));
    let backend_label = if config.demo {
        "demo"
    } else {
        config.base_url.as_str()
    };
    app.state.push_log(format!("[INFO] Backend: {backend_label}"));
    app.navigate(&config.start_path);
    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<state::Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        terminal.draw(|f| ui::draw(f, &app.state))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.on_key(key);
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
