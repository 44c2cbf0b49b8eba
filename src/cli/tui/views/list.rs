//! List view: the shopping list with inline editor and add dialog

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use crate::cli::tui::app::{AddDialog, App, ConfirmAction, Field, Form, InputMode};
use crate::cli::tui::utils::{centered_rect, truncate_str};
use crate::domain::Item;

const ACCENT: Color = Color::Rgb(0x01, 0x87, 0x86);

/// Draw the list layout
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Items
            Constraint::Length(3), // Status bar
        ])
        .split(area);

    draw_items(frame, app, chunks[0]);
    draw_status_bar(frame, app, chunks[1]);

    if let InputMode::Adding(dialog) = app.input_mode() {
        draw_add_dialog(frame, dialog, area);
    }
}

fn draw_items(frame: &mut Frame, app: &App, area: Rect) {
    let snapshot = app.snapshot();

    if snapshot.is_empty() {
        let hint = Paragraph::new("Nothing to buy. Press 'a' to add an item.")
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .title("Shopping List")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(ACCENT)),
            );
        frame.render_widget(hint, area);
        return;
    }

    let name_width = (area.width as usize).saturating_sub(20).max(8);

    let items: Vec<ListItem> = snapshot
        .items()
        .iter()
        .map(|item| match app.editor_for(item.id) {
            Some(form) => editor_row(form),
            None => item_row(item, name_width),
        })
        .collect();

    let title = format!("Shopping List ({})", snapshot.len());
    let list = List::new(items)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.selected()));

    frame.render_stateful_widget(list, area, &mut state);
}

fn item_row(item: &Item, name_width: usize) -> ListItem<'static> {
    let name = truncate_str(&item.name, name_width);
    ListItem::new(format!(
        "{:<width$}  Qty : {}",
        name,
        item.quantity,
        width = name_width
    ))
}

fn editor_row(form: &Form) -> ListItem<'static> {
    let line = Line::from(vec![
        field_span(&form.name, form.field == Field::Name),
        Span::raw("  Qty : "),
        field_span(&form.quantity, form.field == Field::Quantity),
        Span::styled("  [Enter] save", Style::default().fg(Color::DarkGray)),
    ]);
    ListItem::new(line).style(Style::default().fg(Color::Yellow))
}

/// A text field, with a cursor when focused
fn field_span(text: &str, focused: bool) -> Span<'static> {
    if focused {
        Span::styled(
            format!("{}_", text),
            Style::default().add_modifier(Modifier::UNDERLINED),
        )
    } else {
        Span::raw(text.to_string())
    }
}

fn draw_add_dialog(frame: &mut Frame, dialog: &AddDialog, area: Rect) {
    let popup = centered_rect(50, 9, area);

    let label = |field: Field| {
        if dialog.form.field == field {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        }
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Name:     ", label(Field::Name)),
            field_span(&dialog.form.name, dialog.form.field == Field::Name),
        ]),
        Line::from(vec![
            Span::styled("Quantity: ", label(Field::Quantity)),
            field_span(&dialog.form.quantity, dialog.form.field == Field::Quantity),
        ]),
        Line::default(),
    ];

    match &dialog.error {
        Some(error) => lines.push(Line::styled(error.clone(), Style::default().fg(Color::Red))),
        None => lines.push(Line::default()),
    }

    lines.push(Line::styled(
        "[Enter] add  [Tab] next field  [Esc] cancel",
        Style::default().fg(Color::DarkGray),
    ));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title("Add Shopping Item")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ACCENT)),
    );

    frame.render_widget(Clear, popup);
    frame.render_widget(paragraph, popup);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (content, style) = match app.input_mode() {
        InputMode::Normal => {
            let msg = app
                .status_message()
                .unwrap_or("[a]dd [e]dit [d]elete [q]uit [?]help");
            (msg.to_string(), Style::default())
        }
        InputMode::Adding(_) => (
            "Adding item".to_string(),
            Style::default().fg(Color::Green),
        ),
        InputMode::Editing(_) => (
            "Editing: [Tab] switch field [Enter] save [Esc] cancel".to_string(),
            Style::default().fg(Color::Yellow),
        ),
        InputMode::Confirm(ConfirmAction::Delete(id)) => {
            let name = app
                .snapshot()
                .get(*id)
                .map(|item| item.name.as_str())
                .unwrap_or("item");
            (
                format!("Delete {}? [y/n]", name),
                Style::default().fg(Color::Yellow),
            )
        }
    };

    let paragraph = Paragraph::new(content)
        .style(style)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}
