use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use players_terminal::card::{CardView, image_path, short_image_name, team_logo};
use players_terminal::config::Config;
use players_terminal::data_source::source_from_config;
use players_terminal::input::typed_char;
use players_terminal::pagination::PAGE_SIZE;
use players_terminal::provider::spawn_provider;
use players_terminal::state::{
    AppState, Delta, Focus, ProviderCommand, Screen, TeamLookup, apply_delta,
};

const GRID_COLUMNS: usize = 4;
const GRID_ROWS: usize = PAGE_SIZE / GRID_COLUMNS;

struct App {
    state: AppState,
    should_quit: bool,
    cmd_tx: Option<mpsc::Sender<ProviderCommand>>,
}

impl App {
    fn new(config: &Config, cmd_tx: Option<mpsc::Sender<ProviderCommand>>) -> Self {
        Self {
            state: AppState::with_config(config),
            should_quit: false,
            cmd_tx,
        }
    }

    fn send(&mut self, cmd: ProviderCommand) {
        let Some(tx) = &self.cmd_tx else {
            self.state.push_log("[INFO] Data source unavailable");
            return;
        };
        let label = match &cmd {
            ProviderCommand::FetchPlayers { search } if search.is_empty() => {
                "players".to_string()
            }
            ProviderCommand::FetchPlayers { search } => format!("players \"{search}\""),
            ProviderCommand::FetchTeam { team_id } => format!("team {team_id}"),
        };
        if tx.send(cmd).is_err() {
            self.state.push_log(format!("[WARN] Request for {label} failed"));
        }
    }

    fn open_players(&mut self) {
        let cmd = self.state.open_players();
        self.send(cmd);
    }

    fn back(&mut self) {
        if let Some(cmd) = self.state.back() {
            self.send(cmd);
        }
    }

    fn tick(&mut self, now: Instant) {
        if let Some(cmd) = self.state.poll_search(now) {
            self.send(cmd);
        }
        for cmd in self.state.team_requests() {
            self.send(cmd);
        }
    }

    fn on_key(&mut self, key: KeyEvent, now: Instant) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.state.screen.clone() {
            Screen::Home => match key.code {
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('p') | KeyCode::Enter => self.open_players(),
                KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
                _ => {}
            },
            Screen::Players => self.on_players_key(key, now),
            Screen::PlayerDetail { .. } => match key.code {
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('b') | KeyCode::Esc => self.back(),
                KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
                _ => {}
            },
        }
    }

    fn on_players_key(&mut self, key: KeyEvent, now: Instant) {
        if self.state.players_error.is_some() {
            match key.code {
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('b') | KeyCode::Esc => self.back(),
                _ => {}
            }
            return;
        }

        if self.state.focus == Focus::Search {
            if let Some(ch) = typed_char(&key) {
                self.state.input_char(ch, now);
                return;
            }
            match key.code {
                KeyCode::Backspace => self.state.input_backspace(now),
                KeyCode::Tab | KeyCode::Esc | KeyCode::Enter | KeyCode::Down => {
                    self.state.focus = Focus::Grid
                }
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('b') | KeyCode::Esc => self.back(),
            KeyCode::Char('/') | KeyCode::Tab => self.state.focus = Focus::Search,
            KeyCode::Char('h') | KeyCode::Left => self.state.prev_page(),
            KeyCode::Char('l') | KeyCode::Right => self.state.next_page(),
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Char(ch @ '1'..='5') => {
                let n = ch.to_digit(10).unwrap_or(0) as usize;
                self.state.go_to_button(n);
            }
            KeyCode::Enter => {
                if !self.state.open_selected() {
                    self.state.push_log("[INFO] Player has no detail page");
                }
            }
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            _ => {}
        }
    }

    fn on_mouse(&mut self, mouse: MouseEvent, area: Rect) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        if self.state.screen != Screen::Players || self.state.players_error.is_some() {
            return;
        }
        let point = (mouse.column, mouse.row);
        let layout = players_layout(body_area(area));

        if contains(layout.search, point) {
            self.state.focus = Focus::Search;
            return;
        }

        let cards = self.state.visible_cards();
        let hit = card_rects(layout.grid)
            .into_iter()
            .take(cards.len())
            .position(|rect| contains(rect, point));
        if let Some(idx) = hit {
            self.state.focus = Focus::Grid;
            self.state.selected = idx;
            self.state.select_card(&cards[idx].url);
            return;
        }

        if !self.state.pager.controls_visible() {
            return;
        }
        let segments = pager_segments(layout.pager, &self.state.pager.buttons());
        if let Some((target, _)) = segments.into_iter().find(|(_, rect)| contains(*rect, point)) {
            self.state.focus = Focus::Grid;
            match target {
                PagerTarget::Prev => self.state.prev_page(),
                PagerTarget::Next => self.state.next_page(),
                PagerTarget::Page(page) => {
                    self.state.go_to_page(page);
                }
            }
        }
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    let config = Config::from_env();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    spawn_provider(tx, cmd_rx, source_from_config(&config));

    let mut app = App::new(&config, Some(cmd_tx));
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
    rx: mpsc::Receiver<Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        app.tick(Instant::now());

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.on_key(key, Instant::now())
                }
                Event::Mouse(mouse) => {
                    let area = terminal.size()?;
                    app.on_mouse(mouse, area);
                }
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn frame_chunks(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(area)
}

fn body_area(area: Rect) -> Rect {
    frame_chunks(area)[1]
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = frame_chunks(frame.size());

    let header = Paragraph::new(header_text(&app.state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match &app.state.screen {
        Screen::Home => render_home(frame, chunks[1]),
        Screen::Players => render_players(frame, chunks[1], &app.state),
        Screen::PlayerDetail { url } => render_detail(frame, chunks[1], &app.state, url),
    }

    let footer = Paragraph::new(footer_text(&app.state))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[2]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let title = match &state.screen {
        Screen::Home => "PLAYERS TERMINAL".to_string(),
        Screen::Players => {
            let count = state.players.len();
            if state.pager.page_count() > 0 {
                format!(
                    "PLAYERS | {count} found | Page {}/{}",
                    state.pager.current,
                    state.pager.page_count()
                )
            } else {
                format!("PLAYERS | {count} found")
            }
        }
        Screen::PlayerDetail { .. } => "PLAYER".to_string(),
    };
    format!("{title}\n{}", state.screen.path())
}

fn footer_text(state: &AppState) -> String {
    let keys = match &state.screen {
        Screen::Home => "p/Enter Players | ? Help | q Quit",
        Screen::Players if state.players_error.is_some() => "b/Esc Back | q Quit",
        Screen::Players => match state.focus {
            Focus::Search => "Type to search | Tab/Enter/Esc Grid | Ctrl+C Quit",
            Focus::Grid => {
                "←/→ Prev/Next | 1-5 Page | j/k Move | Enter Open | / Search | b Back | q Quit"
            }
        },
        Screen::PlayerDetail { .. } => "b/Esc Back | ? Help | q Quit",
    };
    let last = state.logs.back().cloned().unwrap_or_default();
    format!("{keys}\n{last}")
}

fn render_home(frame: &mut Frame, area: Rect) {
    let text = [
        "",
        "  Player catalog",
        "",
        "  p  Browse players",
        "  q  Quit",
    ]
    .join("\n");
    let home = Paragraph::new(text).block(Block::default().title("Home").borders(Borders::ALL));
    frame.render_widget(home, area);
}

struct PlayersLayout {
    search: Rect,
    status: Rect,
    grid: Rect,
    pager: Rect,
}

fn players_layout(area: Rect) -> PlayersLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);
    PlayersLayout {
        search: rows[0],
        status: rows[1],
        grid: rows[2],
        pager: rows[3],
    }
}

fn card_rects(grid: Rect) -> Vec<Rect> {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, GRID_ROWS as u32); GRID_ROWS])
        .split(grid);
    let mut rects = Vec::with_capacity(PAGE_SIZE);
    for row in rows.iter() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, GRID_COLUMNS as u32); GRID_COLUMNS])
            .split(*row);
        rects.extend(cols.iter().copied());
    }
    rects
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PagerTarget {
    Prev,
    Page(usize),
    Next,
}

fn pager_label(target: PagerTarget) -> String {
    match target {
        PagerTarget::Prev => " ‹ Prev ".to_string(),
        PagerTarget::Page(page) => format!(" {page} "),
        PagerTarget::Next => " Next › ".to_string(),
    }
}

/// Horizontal cells of the page strip, centered in `area`.
fn pager_segments(area: Rect, buttons: &[usize]) -> Vec<(PagerTarget, Rect)> {
    let mut targets = vec![PagerTarget::Prev];
    targets.extend(buttons.iter().map(|page| PagerTarget::Page(*page)));
    targets.push(PagerTarget::Next);

    let widths: Vec<u16> = targets
        .iter()
        .map(|t| pager_label(*t).chars().count() as u16)
        .collect();
    let total: u16 = widths.iter().sum();
    let mut x = area.x + area.width.saturating_sub(total) / 2;
    let mut segments = Vec::with_capacity(targets.len());
    for (target, width) in targets.into_iter().zip(widths) {
        segments.push((
            target,
            Rect {
                x,
                y: area.y,
                width,
                height: area.height.min(1),
            },
        ));
        x = x.saturating_add(width);
    }
    segments
}

fn contains(rect: Rect, (x, y): (u16, u16)) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

fn render_players(frame: &mut Frame, area: Rect, state: &AppState) {
    if let Some(message) = &state.players_error {
        let error = Paragraph::new(format!("Error : {message}"))
            .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
            .wrap(Wrap { trim: true });
        frame.render_widget(error, area);
        return;
    }

    let layout = players_layout(area);

    let search_style = if state.focus == Focus::Search {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let cursor = if state.focus == Focus::Search { "_" } else { "" };
    let search = Paragraph::new(format!("🔍 {}{cursor}", state.search))
        .style(search_style)
        .block(Block::default().title("Search").borders(Borders::ALL));
    frame.render_widget(search, layout.search);

    let status = if state.players_loading {
        Paragraph::new("Loading...").style(Style::default().fg(Color::Yellow))
    } else if state.search_debounce_pending() {
        Paragraph::new("…").style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new("")
    };
    frame.render_widget(status, layout.status);

    let cards = state.visible_cards();
    if cards.is_empty() && !state.players_loading {
        let empty = Paragraph::new("No players found").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, layout.grid);
    } else {
        for (idx, (card, rect)) in cards.iter().zip(card_rects(layout.grid)).enumerate() {
            let selected = state.focus == Focus::Grid && idx == state.selected;
            render_card(frame, rect, card, selected);
        }
    }

    if state.pager.controls_visible() {
        render_pager(frame, layout.pager, state);
    }
}

fn render_card(frame: &mut Frame, area: Rect, card: &CardView, selected: bool) {
    let border_style = if selected {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let block = Block::default()
        .title(card.name.clone())
        .borders(Borders::ALL)
        .border_style(border_style);

    let mut lines = vec![
        Line::from(Span::styled(
            short_image_name(&card.image).to_string(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(card.country.clone()),
    ];
    if let Some(logo) = &card.team_logo {
        lines.push(Line::from(Span::styled(
            format!("▣ {}", short_image_name(logo)),
            Style::default().fg(Color::Green),
        )));
    }

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_pager(frame: &mut Frame, area: Rect, state: &AppState) {
    for (target, rect) in pager_segments(area, &state.pager.buttons()) {
        let style = match target {
            PagerTarget::Page(page) if page == state.pager.current => Style::default()
                .fg(Color::White)
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
            _ => Style::default(),
        };
        frame.render_widget(Paragraph::new(pager_label(target)).style(style), rect);
    }
}

fn render_detail(frame: &mut Frame, area: Rect, state: &AppState, url: &str) {
    let block = Block::default().title("Player").borders(Borders::ALL);
    let Some(player) = state.detail_player() else {
        let missing = Paragraph::new(format!("Player not found: {url}")).block(block);
        frame.render_widget(missing, area);
        return;
    };

    let team = match state.teams.get(&player.team) {
        Some(TeamLookup::Resolved(team)) if !team.name.is_empty() => team.name.clone(),
        Some(TeamLookup::Pending) => format!("{} (loading)", player.team),
        _ => player.team.clone(),
    };
    let logo = team_logo(&player.team, &state.teams).unwrap_or_else(|| "-".to_string());
    let text = [
        format!("Name:    {}", player.name),
        format!("Country: {}", player.country),
        format!("Team:    {team}"),
        format!("Logo:    {logo}"),
        format!("Image:   {}", image_path(player, &state.images)),
    ]
    .join("\n");
    let detail = Paragraph::new(text).block(block).wrap(Wrap { trim: false });
    frame.render_widget(detail, area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Players Terminal - Help",
        "",
        "Global:",
        "  Ctrl+C       Quit",
        "  ?            Toggle help",
        "",
        "Players (search box):",
        "  type         Search by name",
        "  Tab / Enter  Move to cards",
        "",
        "Players (cards):",
        "  ← / →        Prev / Next page",
        "  1-5          Jump to page button",
        "  j/k or ↑/↓   Move",
        "  Enter        Open player",
        "  /            Search",
        "  b / Esc      Back",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
