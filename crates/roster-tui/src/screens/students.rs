//! Students screen: selection header, creation form, and the listing.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};

use roster_core::{NewStudentDraft, SelectionTracker, Snapshot, StudentRecord, StudentStatus};

use crate::action::{Action, SyncOp};
use crate::component::Component;
use crate::screen::Route;
use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormField {
    Name,
    Code,
    Active,
}

impl FormField {
    fn next(self) -> Self {
        match self {
            Self::Name => Self::Code,
            Self::Code => Self::Active,
            Self::Active => Self::Name,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Name => Self::Active,
            Self::Code => Self::Name,
            Self::Active => Self::Code,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Focus {
    #[default]
    Table,
    Form(FormField),
}

pub struct StudentsScreen {
    focused: bool,
    students: Snapshot,
    selection: SelectionTracker,
    draft: NewStudentDraft,
    focus: Focus,
    table_state: TableState,
}

impl StudentsScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            students: Arc::new(Vec::new()),
            selection: SelectionTracker::default(),
            draft: NewStudentDraft::default(),
            focus: Focus::Table,
            table_state: TableState::default().with_selected(Some(0)),
        }
    }

    fn header_text(&self) -> String {
        format!("Total Selected Student: {}", self.selection.count())
    }

    fn selected_index(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    fn select(&mut self, idx: usize) {
        let clamped = idx.min(self.students.len().saturating_sub(1));
        self.table_state.select(Some(clamped));
    }

    fn move_selection(&mut self, delta: isize) {
        if self.students.is_empty() {
            return;
        }
        self.select(self.selected_index().saturating_add_signed(delta));
    }

    fn highlighted(&self) -> Option<&Arc<StudentRecord>> {
        self.students.get(self.selected_index())
    }

    /// Apply `edit` locally and hand the result to the roster.
    fn edit_draft(&mut self, edit: impl FnOnce(&mut NewStudentDraft)) -> Option<Action> {
        edit(&mut self.draft);
        Some(Action::SetDraft(self.draft.clone()))
    }

    fn handle_table_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_selection(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_selection(-1);
                None
            }
            KeyCode::Char('g') => {
                self.select(0);
                None
            }
            KeyCode::Char('G') => {
                self.select(self.students.len().saturating_sub(1));
                None
            }
            KeyCode::Char(' ') => self
                .highlighted()
                .map(|s| Action::ToggleSelection(s.id.clone())),
            KeyCode::Char('d') => self
                .highlighted()
                .map(|s| Action::RequestDelete(s.id.clone())),
            KeyCode::Enter => self
                .highlighted()
                .map(|s| Action::Navigate(Route::Student(s.id.clone()))),
            KeyCode::Char('c') => Some(Action::ClearLocal),
            KeyCode::Char('r') => Some(Action::RequestRefresh),
            KeyCode::Char('a') | KeyCode::Tab => {
                self.focus = Focus::Form(FormField::Name);
                None
            }
            _ => None,
        }
    }

    fn handle_form_key(&mut self, field: FormField, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => {
                self.focus = Focus::Table;
                None
            }
            KeyCode::Tab | KeyCode::Down => {
                self.focus = Focus::Form(field.next());
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = Focus::Form(field.prev());
                None
            }
            KeyCode::Enter => Some(Action::SubmitDraft),
            KeyCode::Char(' ') if field == FormField::Active => {
                self.edit_draft(|d| d.active = !d.active)
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => match field {
                FormField::Name => self.edit_draft(|d| d.name.push(c)),
                FormField::Code => self.edit_draft(|d| d.code.push(c)),
                FormField::Active => None,
            },
            KeyCode::Backspace => match field {
                FormField::Name => self.edit_draft(|d| {
                    d.name.pop();
                }),
                FormField::Code => self.edit_draft(|d| {
                    d.code.pop();
                }),
                FormField::Active => None,
            },
            _ => None,
        }
    }

    fn render_form(&self, frame: &mut Frame, area: Rect) {
        let form_focused = matches!(self.focus, Focus::Form(_));
        let block = Block::default()
            .title(" New Student ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if form_focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let field_style = |field: FormField| {
            if self.focus == Focus::Form(field) {
                Style::default()
                    .fg(theme::ELECTRIC_PURPLE)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme::DIM_WHITE)
            }
        };
        let cursor = |field: FormField| if self.focus == Focus::Form(field) { "█" } else { "" };

        let checkbox = if self.draft.active { "[x]" } else { "[ ]" };
        let lines = vec![
            Line::from(vec![
                Span::styled("  Name  ", field_style(FormField::Name)),
                Span::styled(&self.draft.name, Style::default().fg(theme::NEON_CYAN)),
                Span::styled(cursor(FormField::Name), Style::default().fg(theme::NEON_CYAN)),
            ]),
            Line::from(vec![
                Span::styled("  Code  ", field_style(FormField::Code)),
                Span::styled(&self.draft.code, Style::default().fg(theme::CORAL)),
                Span::styled(cursor(FormField::Code), Style::default().fg(theme::CORAL)),
            ]),
            Line::from(vec![
                Span::styled(format!("  {checkbox} "), field_style(FormField::Active)),
                Span::styled("Still Active", field_style(FormField::Active)),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_table(&self, frame: &mut Frame, area: Rect) {
        let count = self.students.len();
        let block = Block::default()
            .title(format!(" Students ({count}) "))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused && self.focus == Focus::Table {
                theme::border_focused()
            } else {
                theme::border_default()
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let header = Row::new(vec![
            Cell::from(" ").style(theme::table_header()),
            Cell::from("Name").style(theme::table_header()),
            Cell::from("Code").style(theme::table_header()),
            Cell::from("Status").style(theme::table_header()),
        ]);

        let rows: Vec<Row> = self
            .students
            .iter()
            .map(|s| {
                let checkbox = if self.selection.is_selected(&s.id) {
                    "[x]"
                } else {
                    "[ ]"
                };
                let status = s.status();
                Row::new(vec![
                    Cell::from(checkbox),
                    Cell::from(s.name.clone()).style(Style::default().fg(theme::NEON_CYAN)),
                    Cell::from(s.code.clone()).style(Style::default().fg(theme::CORAL)),
                    Cell::from(status.to_string())
                        .style(theme::status_badge(status == StudentStatus::Active)),
                ])
                .style(theme::table_row())
            })
            .collect();

        let widths = [
            Constraint::Length(3),
            Constraint::Min(14),
            Constraint::Length(14),
            Constraint::Length(10),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(theme::table_selected());

        let mut state = self.table_state;
        frame.render_stateful_widget(table, inner, &mut state);
    }

    fn hints(&self) -> Line<'static> {
        let pairs: &[(&str, &str)] = match self.focus {
            Focus::Table => &[
                ("space ", "select  "),
                ("a ", "add  "),
                ("d ", "delete  "),
                ("c ", "clear  "),
                ("r ", "refresh  "),
                ("Enter ", "open"),
            ],
            Focus::Form(_) => &[
                ("Tab ", "next field  "),
                ("space ", "toggle active  "),
                ("Enter ", "add  "),
                ("Esc ", "back to list"),
            ],
        };
        let mut spans = vec![Span::raw(" ")];
        for (key, label) in pairs {
            spans.push(Span::styled(*key, theme::key_hint_key()));
            spans.push(Span::styled(*label, theme::key_hint()));
        }
        Line::from(spans)
    }
}

impl Component for StudentsScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        Ok(match self.focus {
            Focus::Table => self.handle_table_key(key),
            Focus::Form(field) => self.handle_form_key(field, key),
        })
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::StudentsUpdated(students) => {
                self.students = Arc::clone(students);
                self.select(self.selected_index());
            }
            Action::SelectionUpdated(selection) => self.selection = selection.clone(),
            Action::DraftUpdated(draft) => self.draft = draft.clone(),
            Action::SyncFinished(SyncOp::Add, outcome) if outcome.is_applied() => {
                self.focus = Focus::Table;
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical([
            Constraint::Length(1), // selection header
            Constraint::Length(5), // form
            Constraint::Min(3),    // table
            Constraint::Length(1), // hints
        ])
        .split(area);

        let header = Line::from(Span::styled(
            format!(" {}", self.header_text()),
            theme::title_style(),
        ));
        frame.render_widget(Paragraph::new(header), layout[0]);

        self.render_form(frame, layout[1]);
        self.render_table(frame, layout[2]);
        frame.render_widget(Paragraph::new(self.hints()), layout[3]);
    }

    fn captures_input(&self) -> bool {
        matches!(self.focus, Focus::Form(_))
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "Students"
    }
}
