//! Detail screen: one record, fetched by id.
//!
//! Shows a throbber while the lookup is outstanding and an empty panel
//! when it failed.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use throbber_widgets_tui::{Throbber, ThrobberState};

use roster_core::{DetailSlot, DetailState, StudentRecord};

use crate::action::Action;
use crate::component::Component;
use crate::theme;

pub struct DetailScreen {
    focused: bool,
    slot: DetailSlot,
    throbber_state: ThrobberState,
}

impl DetailScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            slot: DetailSlot::default(),
            throbber_state: ThrobberState::default(),
        }
    }

    fn render_record(frame: &mut Frame, area: Rect, record: &StudentRecord) {
        let status = record.status();
        let lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("  Name    ", Style::default().fg(theme::DIM_WHITE)),
                Span::styled(&record.name, Style::default().fg(theme::NEON_CYAN)),
            ]),
            Line::from(vec![
                Span::styled("  Code    ", Style::default().fg(theme::DIM_WHITE)),
                Span::styled(&record.code, Style::default().fg(theme::CORAL)),
            ]),
            Line::from(vec![
                Span::styled("  Status  ", Style::default().fg(theme::DIM_WHITE)),
                Span::styled(status.to_string(), theme::status_badge(record.active)),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }
}

impl Component for DetailScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        Ok(match key.code {
            KeyCode::Char('r') => Some(Action::ReloadDetail),
            KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => Some(Action::GoBack),
            _ => None,
        })
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::DetailUpdated(slot) => self.slot = slot.clone(),
            Action::Tick if self.slot.state == DetailState::Unloaded => {
                self.throbber_state.calc_next();
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let title = match &self.slot.id {
            Some(id) => format!(" Student {id} "),
            None => " Student ".into(),
        };
        let block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);

        match &self.slot.state {
            DetailState::Unloaded => {
                let throbber = Throbber::default()
                    .label("  Loading student...")
                    .style(Style::default().fg(theme::NEON_CYAN))
                    .throbber_style(Style::default().fg(theme::ELECTRIC_PURPLE));
                frame.render_stateful_widget(throbber, layout[0], &mut self.throbber_state.clone());
            }
            DetailState::Loaded(record) => Self::render_record(frame, layout[0], record),
            DetailState::Failed => {}
        }

        let hints = Line::from(vec![
            Span::styled("  r ", theme::key_hint_key()),
            Span::styled("reload  ", theme::key_hint()),
            Span::styled("Esc ", theme::key_hint_key()),
            Span::styled("back", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[1]);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "Detail"
    }
}
