//! Application core: event loop, routing, action dispatch.

use std::collections::HashMap;
use std::future::Future;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local, Utc};
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use roster_core::{DetailLookup, Roster, StudentId, SyncOutcome};

use crate::action::{Action, ConfirmAction, Notification, NotificationLevel, SyncOp};
use crate::component::Component;
use crate::event::{Event, EventReader, Rates};
use crate::screen::{Route, ScreenId};
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;

/// How long a toast stays up.
const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

/// Top-level application state and event loop.
pub struct App {
    roster: Roster,
    detail: DetailLookup,
    route: Route,
    screens: HashMap<ScreenId, Box<dyn Component>>,
    running: bool,
    help_visible: bool,
    /// Remote operations currently in flight.
    in_flight: usize,
    last_refresh: Option<DateTime<Utc>>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    data_cancel: CancellationToken,
    /// Pending confirmation dialog (blocks other input while active).
    pending_confirm: Option<ConfirmAction>,
    notification: Option<(Notification, Instant)>,
    rates: Rates,
}

impl App {
    pub fn new(roster: Roster, route: Route) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let detail = roster.detail_lookup();
        let screens = create_screens().into_iter().collect();

        Self {
            roster,
            detail,
            route: Route::Students,
            screens,
            running: true,
            help_visible: false,
            in_flight: 0,
            last_refresh: None,
            action_tx,
            action_rx,
            data_cancel: CancellationToken::new(),
            pending_confirm: None,
            notification: None,
            rates: Rates::default(),
        }
        .with_initial_route(route)
    }

    pub fn with_rates(mut self, rates: Rates) -> Self {
        self.rates = rates;
        self
    }

    /// Queue navigation to the starting route so its load runs inside the
    /// event loop.
    fn with_initial_route(self, route: Route) -> Self {
        if route != Route::Students {
            let _ = self.action_tx.send(Action::Navigate(route));
        }
        self
    }

    fn active_screen(&self) -> ScreenId {
        self.route.screen()
    }

    /// Run the main event loop.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::start()?;
        let area = tui.area()?;
        debug!(width = area.width, height = area.height, "terminal ready");

        let active = self.active_screen();
        if let Some(screen) = self.screens.get_mut(&active) {
            screen.set_focused(true);
        }

        {
            let roster = self.roster.clone();
            let detail = self.detail.clone();
            let cancel = self.data_cancel.clone();
            let tx = self.action_tx.clone();
            tokio::spawn(async move {
                crate::data_bridge::spawn_data_bridge(roster, detail, tx, cancel).await;
            });
        }

        let mut events = EventReader::spawn(self.rates);
        debug!(tick = ?self.rates.tick, render = ?self.rates.render, "event clocks");

        info!("TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        self.data_cancel.cancel();
        events.stop();
        info!("TUI event loop ended");
        Ok(())
    }

    /// Map a key event to an action. Global keys are handled here;
    /// screen-specific keys are delegated to the active screen.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        // Confirmation dialog captures all input
        if self.pending_confirm.is_some() {
            return Ok(match key.code {
                KeyCode::Char('y' | 'Y') => Some(Action::ConfirmYes),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(Action::ConfirmNo),
                _ => None,
            });
        }

        if self.help_visible {
            return Ok(match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Some(Action::ToggleHelp),
                _ => None,
            });
        }

        let active = self.active_screen();
        let Some(screen) = self.screens.get_mut(&active) else {
            return Ok(None);
        };

        // A screen taking text input gets every key
        if screen.captures_input() {
            return screen.handle_key_event(key);
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char('?')) => {
                return Ok(Some(Action::ToggleHelp));
            }
            (KeyModifiers::NONE, KeyCode::Esc) => return Ok(Some(Action::GoBack)),
            _ => {}
        }

        screen.handle_key_event(key)
    }

    /// Process a single action: update app state, then propagate to screens.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => self.running = false,

            Action::Resize(w, h) => debug!(width = w, height = h, "terminal resized"),

            Action::Render => {}

            Action::Tick => {
                if let Some((_, created)) = &self.notification {
                    if created.elapsed() > NOTIFICATION_TTL {
                        self.notification = None;
                    }
                }
                let active = self.active_screen();
                if let Some(screen) = self.screens.get_mut(&active) {
                    screen.update(action)?;
                }
            }

            Action::ToggleHelp => self.help_visible = !self.help_visible,

            // ── Navigation ──
            Action::Navigate(route) => self.navigate(route.clone()),

            Action::GoBack => self.navigate(Route::Students),

            // ── Data updates go to every screen ──
            Action::StudentsUpdated(_)
            | Action::SelectionUpdated(_)
            | Action::DraftUpdated(_)
            | Action::DetailUpdated(_) => self.broadcast(action)?,

            Action::LastRefreshUpdated(at) => self.last_refresh = *at,

            // ── Roster operations ──
            Action::RequestRefresh => {
                let roster = self.roster.clone();
                self.spawn_sync(SyncOp::Refresh, async move { roster.refresh().await });
            }

            Action::SetDraft(draft) => self.roster.set_draft(draft.clone()),

            Action::SubmitDraft => {
                let roster = self.roster.clone();
                self.spawn_sync(SyncOp::Add, async move { roster.submit_draft().await });
            }

            Action::ToggleSelection(id) => {
                self.roster.toggle_selection(id);
            }

            Action::RequestDelete(id) => {
                let name = self.resolve_student_name(id);
                self.action_tx
                    .send(Action::ShowConfirm(ConfirmAction::DeleteStudent {
                        id: id.clone(),
                        name,
                    }))?;
            }

            Action::ClearLocal => {
                self.roster.clear_local();
                self.action_tx
                    .send(Action::Notify(Notification::info("Cleared local listing")))?;
            }

            Action::ReloadDetail => {
                let detail = self.detail.clone();
                self.spawn_sync(SyncOp::Detail, async move { detail.reload().await });
            }

            Action::SyncStarted(_) => self.in_flight += 1,

            Action::SyncFinished(op, outcome) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                if let Some(notification) = Self::outcome_notification(*op, *outcome) {
                    self.action_tx.send(Action::Notify(notification))?;
                }
                self.broadcast(action)?;
            }

            // ── Overlays ──
            Action::ShowConfirm(confirm) => self.pending_confirm = Some(confirm.clone()),

            Action::ConfirmYes => {
                if let Some(ConfirmAction::DeleteStudent { id, .. }) = self.pending_confirm.take() {
                    let roster = self.roster.clone();
                    self.spawn_sync(SyncOp::Delete, async move {
                        roster.remove_record(&id).await
                    });
                }
            }

            Action::ConfirmNo => self.pending_confirm = None,

            Action::Notify(notification) => {
                self.notification = Some((notification.clone(), Instant::now()));
            }
        }
        Ok(())
    }

    fn broadcast(&mut self, action: &Action) -> Result<()> {
        for screen in self.screens.values_mut() {
            if let Some(follow_up) = screen.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    fn navigate(&mut self, route: Route) {
        if route == self.route {
            return;
        }
        let from = self.active_screen();
        let to = route.screen();
        debug!(from = %self.route, to = %route, "navigating");

        match &route {
            Route::Student(id) => {
                let detail = self.detail.clone();
                let id = id.clone();
                self.spawn_sync(SyncOp::Detail, async move { detail.load(id).await });
            }
            Route::Students => self.detail.reset(),
        }

        if from != to {
            if let Some(screen) = self.screens.get_mut(&from) {
                screen.set_focused(false);
            }
            if let Some(screen) = self.screens.get_mut(&to) {
                debug!(screen = screen.id(), "focusing screen");
                screen.set_focused(true);
            }
        }
        self.route = route;
    }

    /// Run a roster operation in the background, bracketed by
    /// `SyncStarted` / `SyncFinished`.
    fn spawn_sync<F>(&self, op: SyncOp, fut: F)
    where
        F: Future<Output = SyncOutcome> + Send + 'static,
    {
        let tx = self.action_tx.clone();
        let _ = tx.send(Action::SyncStarted(op));
        tokio::spawn(async move {
            let outcome = fut.await;
            debug!(?op, %outcome, "sync finished");
            let _ = tx.send(Action::SyncFinished(op, outcome));
        });
    }

    /// Toasts for outcomes the user caused locally. Failures are already
    /// in the log and are not surfaced.
    fn outcome_notification(op: SyncOp, outcome: SyncOutcome) -> Option<Notification> {
        match (op, outcome) {
            (SyncOp::Add, SyncOutcome::Applied) => Some(Notification::success("Student added")),
            (SyncOp::Add, SyncOutcome::Skipped) => {
                Some(Notification::warning("Name and code are required"))
            }
            (SyncOp::Delete, SyncOutcome::Applied) => {
                Some(Notification::success("Student deleted"))
            }
            _ => None,
        }
    }

    fn resolve_student_name(&self, id: &StudentId) -> String {
        self.roster
            .snapshot()
            .iter()
            .find(|s| &s.id == id)
            .map_or_else(|| id.to_string(), |s| s.name.clone())
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // Layout: [screen content] [route line] [status bar]
        let layout = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

        if let Some(screen) = self.screens.get(&self.active_screen()) {
            screen.render(frame, layout[0]);
        }

        self.render_route_line(frame, layout[1]);
        self.render_status_bar(frame, layout[2]);

        // Overlays, last = topmost
        if let Some((ref notif, _)) = self.notification {
            Self::render_notification(frame, area, notif);
        }

        if let Some(ref confirm) = self.pending_confirm {
            Self::render_confirm_dialog(frame, area, confirm);
        }

        if self.help_visible {
            Self::render_help_overlay(frame, area);
        }
    }

    fn render_route_line(&self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled(format!(" {} ", self.active_screen()), theme::tab_active()),
            Span::styled(self.route.to_string(), theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn status_text(&self) -> String {
        let sync = if self.in_flight > 0 { "◐ syncing" } else { "● idle" };
        let refreshed = self.last_refresh.map_or_else(
            || "never".to_owned(),
            |at| at.with_timezone(&Local).format("%H:%M:%S").to_string(),
        );
        format!("{sync} │ refreshed {refreshed}")
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let color = if self.in_flight > 0 {
            theme::ELECTRIC_YELLOW
        } else {
            theme::SUCCESS_GREEN
        };
        let line = Line::from(vec![
            Span::raw(" "),
            Span::styled(self.status_text(), Style::default().fg(color)),
            Span::styled(" │ ? help  q quit", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_help_overlay(frame: &mut Frame, area: Rect) {
        let help_width = 52u16.min(area.width.saturating_sub(4));
        let help_height = 18u16.min(area.height.saturating_sub(4));
        let help_area = centered(area, help_width, help_height);

        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            help_area,
        );

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());

        let inner = block.inner(help_area);
        frame.render_widget(block, help_area);

        let entry = |key: &'static str, label: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {key:<10}"), theme::key_hint_key()),
                Span::styled(label, theme::key_hint()),
            ])
        };
        let section = |title: &'static str| {
            Line::from(Span::styled(
                format!("  {title}"),
                Style::default().fg(theme::NEON_CYAN),
            ))
        };

        let help_text = vec![
            Line::from(""),
            section("Students"),
            entry("j/k ↑/↓", "Move up/down"),
            entry("space", "Select / unselect row"),
            entry("a / Tab", "Edit the new-student form"),
            entry("Enter", "Open record (submit in form)"),
            entry("d", "Delete record"),
            entry("c", "Clear local listing"),
            entry("r", "Refresh from service"),
            Line::from(""),
            section("Global"),
            entry("Esc", "Back / close"),
            entry("?", "This help"),
            entry("q", "Quit"),
        ];

        frame.render_widget(Paragraph::new(help_text), inner);
    }

    fn render_confirm_dialog(frame: &mut Frame, area: Rect, confirm: &ConfirmAction) {
        let width = 50u16.min(area.width.saturating_sub(4));
        let dialog_area = centered(area, width, 5);

        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            dialog_area,
        );

        let block = Block::default()
            .title(" Confirm ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme::ELECTRIC_YELLOW));

        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let text = vec![
            Line::from(Span::styled(
                format!("  {confirm}"),
                Style::default().fg(theme::DIM_WHITE),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("  y ", theme::key_hint_key()),
                Span::styled("confirm    ", theme::key_hint()),
                Span::styled("n ", theme::key_hint_key()),
                Span::styled("cancel", theme::key_hint()),
            ]),
        ];
        frame.render_widget(Paragraph::new(text), inner);
    }

    fn render_notification(frame: &mut Frame, area: Rect, notif: &Notification) {
        let msg_len = u16::try_from(notif.message.chars().count()).unwrap_or(u16::MAX);
        let width = msg_len.saturating_add(6).clamp(20, 60).min(area.width);
        let height = 3u16;

        let x = area.width.saturating_sub(width + 1);
        let y = area.height.saturating_sub(height + 2); // above status bar
        let toast_area = Rect::new(area.x + x, area.y + y, width, height.min(area.height));

        let (border_color, icon) = match notif.level {
            NotificationLevel::Success => (theme::SUCCESS_GREEN, "✓"),
            NotificationLevel::Warning => (theme::ELECTRIC_YELLOW, "!"),
            NotificationLevel::Info => (theme::NEON_CYAN, "·"),
        };

        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            toast_area,
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color));

        let inner = block.inner(toast_area);
        frame.render_widget(block, toast_area);

        let line = Line::from(vec![
            Span::styled(format!(" {icon} "), Style::default().fg(border_color)),
            Span::styled(&notif.message, Style::default().fg(theme::DIM_WHITE)),
        ]);
        frame.render_widget(Paragraph::new(line), inner);
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.width.saturating_sub(width) / 2;
    let y = area.height.saturating_sub(height) / 2;
    Rect::new(area.x + x, area.y + y, width, height.min(area.height))
}
