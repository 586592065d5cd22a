//! Vacancy table rendering.
//!
//! The terminal view draws a bordered [`ratatui::widgets::Table`]; the plain
//! renderer produces a boxed text grid for `--plain` output.

use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use tabled::{
    builder::Builder,
    settings::{object::Segment, Modify, Style, Width},
};

use vacancy_core::vocabulary::{EXIT_HINT, NOTHING_FOUND};
use vacancy_data::query::TableView;

use crate::themes::Theme;

/// Cell text wider than this wraps onto the next line in plain output.
pub const PLAIN_MAX_WIDTH: usize = 20;

/// Tallest row the terminal table draws; longer cells are clipped.
const MAX_ROW_HEIGHT: u16 = 6;

// ── Terminal ──────────────────────────────────────────────────────────────────

/// Render the vacancy table into `area`, skipping the first `scroll` rows.
pub fn render_vacancy_table(
    frame: &mut Frame,
    area: Rect,
    view: &TableView,
    scroll: usize,
    theme: &Theme,
) {
    let header = Row::new(
        view.headers()
            .into_iter()
            .map(|h| Cell::from(h).style(theme.table_header)),
    )
    .height(1);

    let rows: Vec<Row> = view
        .cell_rows()
        .into_iter()
        .enumerate()
        .skip(scroll)
        .map(|(i, cells)| {
            let height = cells
                .iter()
                .map(|c| c.lines().count().max(1))
                .max()
                .unwrap_or(1)
                .min(MAX_ROW_HEIGHT as usize) as u16;
            Row::new(cells.into_iter().map(Cell::from))
                .height(height)
                .style(theme.row_style(i))
        })
        .collect();

    let widths = std::iter::once(Constraint::Length(5))
        .chain(view.columns.iter().map(|_| Constraint::Fill(1)))
        .collect::<Vec<_>>();

    let title = format!(
        " Вакансии: {} (строки {}) ",
        view.rows.len(),
        row_span(view)
    );
    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(title),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Render the empty-result placeholder.
pub fn render_nothing_found(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(NOTHING_FOUND, theme.warning)),
        Line::from(""),
        Line::from(Span::styled(EXIT_HINT, theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Вакансии "),
        ),
        area,
    );
}

fn row_span(view: &TableView) -> String {
    match (view.rows.first(), view.rows.last()) {
        (Some(first), Some(last)) => format!("{}-{}", first.number, last.number),
        _ => "-".to_string(),
    }
}

// ── Plain text ────────────────────────────────────────────────────────────────

/// The vacancy table as a boxed, left-aligned text grid.
pub fn plain_table(view: &TableView) -> String {
    text_grid(view.headers(), view.cell_rows(), PLAIN_MAX_WIDTH)
}

/// Draw `rows` under `headers` as an ASCII grid with a rule after every row.
///
/// Cells wrap at `max_width` columns, on word boundaries where possible.
pub fn text_grid<H, R>(headers: H, rows: Vec<R>, max_width: usize) -> String
where
    H: IntoIterator,
    H::Item: Into<String>,
    R: IntoIterator,
    R::Item: Into<String>,
{
    let mut builder = Builder::default();
    builder.push_record(headers.into_iter().map(Into::<String>::into));
    for row in rows {
        builder.push_record(row.into_iter().map(Into::<String>::into));
    }

    let mut table = builder.build();
    table
        .with(Style::ascii())
        .with(Modify::new(Segment::all()).with(Width::wrap(max_width).keep_words(true)));
    table.to_string()
}

// ── Tests ──────────────────────────────────────────────────────────────────────
