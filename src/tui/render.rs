use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::model::application::Application;
use crate::model::field::{Completion, Priority, Status};

use super::app::App;

pub fn render(frame: &mut Frame, app: &mut App) {
    let [header_area, list_area, status_area, input_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(2),
        Constraint::Length(3),
    ])
    .areas(frame.area());

    render_header(frame, app, header_area);
    render_list(frame, app, list_area);
    render_status(frame, app, status_area);
    render_input(frame, app, input_area);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let shown = app.book.filtered().len();
    let total = app.book.len();
    let counts = if shown == total {
        format!("{total} applications")
    } else {
        format!("{shown} of {total} applications")
    };
    let header = Line::from(vec![
        Span::styled(" docket ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(counts, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

fn render_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let filtered = app.book.filtered();

    if filtered.is_empty() {
        let hint = if app.book.is_empty() {
            "nothing tracked yet - try: add c/COMPANY p/POSITION d/YYYY-MM-DD"
        } else {
            "no matches - `list` shows everything again"
        };
        let empty = Paragraph::new(Line::from(Span::styled(
            hint,
            Style::default().fg(Color::DarkGray),
        )));
        frame.render_widget(empty, area);
        return;
    }

    // Two rows per record; keep the scroll inside the list.
    let rows_visible = (area.height as usize / 2).max(1);
    let max_scroll = filtered.len().saturating_sub(rows_visible);
    app.scroll = app.scroll.min(max_scroll);

    let items: Vec<ListItem> = filtered
        .iter()
        .enumerate()
        .skip(app.scroll)
        .take(rows_visible)
        .map(|(i, application)| record_item(i + 1, application))
        .collect();

    frame.render_widget(List::new(items), area);
}

fn record_item(index: usize, application: &Application) -> ListItem<'static> {
    let title = Line::from(vec![
        Span::styled(
            format!("{index:>3}. "),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            application.company.as_str().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" - "),
        Span::raw(application.position.as_str().to_string()),
    ]);

    let mut detail = vec![
        Span::raw("     "),
        Span::styled(
            format!("due {}", application.deadline),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw("  "),
        Span::styled(
            application.status.to_string(),
            Style::default().fg(status_color(application.status)),
        ),
        Span::raw("  "),
        Span::styled(
            format!("{} priority", application.priority),
            Style::default().fg(priority_color(application.priority)),
        ),
    ];
    if application.completion == Completion::Completed {
        detail.push(Span::raw("  "));
        detail.push(Span::styled(
            "completed".to_string(),
            Style::default().fg(Color::Green),
        ));
    }
    for tag in &application.tags {
        detail.push(Span::raw("  "));
        detail.push(Span::styled(
            tag.to_string(),
            Style::default().fg(Color::Cyan),
        ));
    }
    if !application.requirements.is_empty() {
        let reqs: Vec<&str> = application
            .requirements
            .iter()
            .map(|r| r.as_str())
            .collect();
        detail.push(Span::raw("  "));
        detail.push(Span::styled(
            format!("requires: {}", reqs.join(", ")),
            Style::default().fg(Color::DarkGray),
        ));
    }

    ListItem::new(vec![title, Line::from(detail)])
}

fn status_color(status: Status) -> Color {
    match status {
        Status::Pending => Color::Yellow,
        Status::Accepted => Color::Green,
        Status::Rejected => Color::Red,
    }
}

fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::Low => Color::DarkGray,
        Priority::Medium => Color::Blue,
        Priority::High => Color::Magenta,
    }
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let Some(status) = &app.status else {
        let idle = Paragraph::new(Line::from(Span::styled(
            " type a command and press enter (`help` lists them)",
            Style::default().fg(Color::DarkGray),
        )));
        frame.render_widget(idle, area);
        return;
    };
    let style = if status.is_error {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    };
    let text = Paragraph::new(status.text.clone())
        .style(style)
        .wrap(Wrap { trim: true });
    frame.render_widget(text, area);
}

fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("command");
    let inner = block.inner(area);
    let text = Paragraph::new(Line::from(vec![
        Span::styled("> ", Style::default().fg(Color::DarkGray)),
        Span::raw(app.input.clone()),
    ]))
    .block(block);
    frame.render_widget(text, area);

    // Put the terminal cursor where the next grapheme lands.
    let typed_width = app.input[..app.cursor].width() as u16;
    frame.set_cursor_position((inner.x + 2 + typed_width, inner.y));
}
