use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Row, Table, Wrap};
use ratatui::Frame;

use recpanel_core::{Action, FormField, NoticeKind, RESULT_HEADER};

use crate::app::{shortcut_label, App, Focus};

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let size = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(9),
            Constraint::Length(3),
            Constraint::Min(5),
        ])
        .split(size);

    render_header(frame, chunks[0], app);
    render_form(frame, chunks[1], app);
    render_status(frame, chunks[2], app);
    render_results(frame, chunks[3], app);

    if app.show_help {
        render_help(frame, size);
    }
}

fn render_header(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let mut spans = vec![Span::raw(format!("server: {}", app.base_url))];
    if app.panel.is_waiting() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            "waiting for response...",
            Style::default().fg(Color::Yellow),
        ));
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Recommendations");
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_form(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let focused = app.focused();
    let form = app.panel.form();
    let mut lines: Vec<Line> = FormField::ALL
        .into_iter()
        .map(|field| {
            field_line(
                field.label(),
                form.value(field),
                focused == Focus::Field(field),
                field.is_editable(),
            )
        })
        .collect();
    lines.push(Line::from(""));

    let mut buttons = Vec::new();
    for action in Action::ALL {
        let style = if focused == Focus::Button(action) {
            Style::default().fg(Color::Black).bg(Color::LightGreen)
        } else {
            Style::default().fg(Color::Green)
        };
        buttons.push(Span::styled(format!("[{}]", action.label()), style));
        buttons.push(Span::raw(" "));
    }
    lines.push(Line::from(buttons));

    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Form"));
    frame.render_widget(paragraph, area);
}

fn render_status(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let line = match app.panel.notice() {
        Some(notice) => {
            let color = match notice.kind {
                NoticeKind::Success => Color::Green,
                NoticeKind::Error => Color::Red,
            };
            Line::from(Span::styled(notice.text.clone(), Style::default().fg(color)))
        }
        None => Line::from(Span::styled(
            "tab next  shift+tab prev  enter activate  F2-F8 actions  F1 help  esc quit",
            Style::default().fg(Color::DarkGray),
        )),
    };
    let paragraph = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn render_results(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::ALL).title("Search Results");
    let Some(table) = app.panel.results() else {
        let paragraph = Paragraph::new("No search yet. Press F8 to search.")
            .block(block)
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    };

    let header = Row::new(RESULT_HEADER).style(Style::default().add_modifier(Modifier::BOLD));
    let rows = table.rows().iter().map(|row| Row::new(row.clone()));
    let widths = [
        Constraint::Percentage(10),
        Constraint::Percentage(20),
        Constraint::Percentage(30),
        Constraint::Percentage(20),
        Constraint::Percentage(20),
    ];
    let widget = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(widget, area);
}

fn render_help(frame: &mut Frame<'_>, area: Rect) {
    let modal = centered_rect(70, 60, area);
    frame.render_widget(Clear, modal);

    let mut text = vec![
        Line::from("Global: esc quit, Ctrl+C quit, F1 help"),
        Line::from("Form: tab/shift+tab move, enter activate button, Ctrl+U clear field, Ctrl+W delete word"),
        Line::from("Type accepts a label (Generic, BoughtTogether, CrossSell, UpSell, Complementary) or its code 0-4"),
        Line::from(""),
    ];
    for action in Action::ALL {
        text.push(Line::from(format!(
            "{}  {}",
            shortcut_label(action),
            action.label()
        )));
    }

    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Help"))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, modal);
}

fn field_line(label: &str, value: &str, focused: bool, editable: bool) -> Line<'static> {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else if editable {
        Style::default()
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Line::from(vec![
        Span::styled(
            format!("{:>26}: ", label),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(value.to_string(), style),
    ])
}

fn centered_rect(percent_x: u16, percent_y: u16, rect: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(rect);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
