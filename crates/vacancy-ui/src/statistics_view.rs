//! Year and city statistics: tables next to bar charts in the terminal, or
//! two text grids in plain mode.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use vacancy_core::formatting::format_share;
use vacancy_core::vocabulary::{EXIT_HINT, NO_DATA};
use vacancy_data::report::{self, TABLE_CAPTIONS};
use vacancy_data::statistics::Dynamics;

use crate::table_view::text_grid;
use crate::themes::Theme;

/// Wrap width of the plain statistics grids.
const PLAIN_MAX_WIDTH: usize = 40;

/// Finalized statistics handed to the view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatisticsData {
    pub selected_vacancy: String,
    pub total: u32,
    pub dynamics: Dynamics,
}

// ── Terminal ──────────────────────────────────────────────────────────────────

/// Render the summary line, the year row and the city row into `area`.
pub fn render_statistics(frame: &mut Frame, area: Rect, data: &StatisticsData, theme: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Fill(1),
        ])
        .split(area);

    let summary = Line::from(vec![
        Span::styled("Профессия: ", theme.label),
        Span::styled(data.selected_vacancy.as_str(), theme.header),
        Span::styled("  Вакансий: ", theme.label),
        Span::styled(data.total.to_string(), theme.header),
        Span::styled(format!("  {EXIT_HINT}"), theme.dim),
    ]);
    frame.render_widget(Paragraph::new(summary), rows[0]);

    let year_area = split_row(rows[1]);
    let city_area = split_row(rows[2]);
    let d = &data.dynamics;

    frame.render_widget(
        sheet(
            report::year_titles(&data.selected_vacancy).to_vec(),
            report::year_rows(d),
            " Статистика по годам ",
            theme,
        ),
        year_area[0],
    );
    frame.render_widget(
        year_chart(TABLE_CAPTIONS[0], &as_u64(&d.year_salary), &as_u64(&d.selected_year_salary), theme),
        year_area[1],
    );
    frame.render_widget(
        year_chart(TABLE_CAPTIONS[1], &as_u64(&d.year_count), &as_u64(&d.selected_year_count), theme),
        year_area[2],
    );

    frame.render_widget(
        sheet(
            report::city_titles().map(str::to_string).to_vec(),
            report::city_rows(d),
            " Статистика по городам ",
            theme,
        ),
        city_area[0],
    );
    let salary_bars: Vec<(String, u64, String)> = d
        .city_salary
        .iter()
        .map(|(city, salary)| (city.clone(), clamp(*salary), salary.to_string()))
        .collect();
    frame.render_widget(city_chart(TABLE_CAPTIONS[4], salary_bars, theme), city_area[1]);
    let share_bars: Vec<(String, u64, String)> = d
        .city_count
        .iter()
        .map(|(city, share)| (city.clone(), (share * 10_000.0).round() as u64, format_share(*share)))
        .collect();
    frame.render_widget(city_chart(TABLE_CAPTIONS[5], share_bars, theme), city_area[2]);
}

/// Render the placeholder shown when no vacancy could be aggregated.
pub fn render_no_statistics(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(NO_DATA, theme.warning)),
        Line::from(""),
        Line::from(Span::styled(EXIT_HINT, theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Статистика "),
        ),
        area,
    );
}

fn split_row(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ])
        .split(area)
}

fn sheet(titles: Vec<String>, rows: Vec<[String; 5]>, title: &str, theme: &Theme) -> Table<'static> {
    let header = Row::new(
        titles
            .into_iter()
            .map(|t| Cell::from(t).style(theme.table_header)),
    );
    let body: Vec<Row> = rows
        .into_iter()
        .enumerate()
        .map(|(i, cells)| Row::new(cells.into_iter().map(Cell::from)).style(theme.row_style(i)))
        .collect();

    Table::new(body, [Constraint::Fill(1); 5])
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(title.to_string()),
        )
        .style(theme.text)
}

/// Vertical chart with one group of two bars (all, selected) per year.
fn year_chart(
    title: &str,
    all: &[(i32, u64)],
    selected: &[(i32, u64)],
    theme: &Theme,
) -> BarChart<'static> {
    let mut chart = BarChart::default()
        .block(Block::default().borders(Borders::ALL).title(format!(" {title} ")))
        .bar_width(3)
        .bar_gap(0)
        .group_gap(1);

    for (i, &(year, value)) in all.iter().enumerate() {
        let picked = selected.get(i).map(|&(_, v)| v).unwrap_or(0);
        let group = BarGroup::default()
            .label(Line::from(year.to_string()))
            .bars(&[
                Bar::default()
                    .value(value)
                    .style(theme.chart_all)
                    .value_style(theme.chart_value),
                Bar::default()
                    .value(picked)
                    .style(theme.chart_selected)
                    .value_style(theme.chart_value),
            ]);
        chart = chart.data(group);
    }
    chart
}

/// Horizontal chart with one labelled bar per city.
fn city_chart(title: &str, bars: Vec<(String, u64, String)>, theme: &Theme) -> BarChart<'static> {
    let bars: Vec<Bar> = bars
        .into_iter()
        .map(|(city, value, text)| {
            Bar::default()
                .label(Line::from(city))
                .value(value)
                .text_value(text)
                .style(theme.chart_city)
                .value_style(theme.chart_value)
        })
        .collect();

    BarChart::default()
        .block(Block::default().borders(Borders::ALL).title(format!(" {title} ")))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .data(BarGroup::default().bars(&bars))
}

fn as_u64<T: Copy + Into<i64>>(series: &[(i32, T)]) -> Vec<(i32, u64)> {
    series.iter().map(|&(k, v)| (k, clamp(v.into()))).collect()
}

fn clamp(value: i64) -> u64 {
    value.max(0) as u64
}

// ── Plain text ────────────────────────────────────────────────────────────────

/// The year and city sheets as text grids.
pub fn plain_statistics(data: &StatisticsData) -> String {
    let mut out = format!(
        "Профессия: {}\nВакансий: {}\n\nСтатистика по годам\n",
        data.selected_vacancy, data.total
    );
    out.push_str(&text_grid(
        report::year_titles(&data.selected_vacancy),
        report::year_rows(&data.dynamics),
        PLAIN_MAX_WIDTH,
    ));
    out.push_str("\n\nСтатистика по городам\n");
    out.push_str(&text_grid(
        report::city_titles(),
        report::city_rows(&data.dynamics),
        PLAIN_MAX_WIDTH,
    ));
    out.push('\n');
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn make_data() -> StatisticsData {
        StatisticsData {
            selected_vacancy: "Программист".to_string(),
            total: 5,
            dynamics: Dynamics {
                year_salary: vec![(2021, 50000), (2022, 194750)],
                year_count: vec![(2021, 3), (2022, 2)],
                selected_year_salary: vec![(2021, 0), (2022, 194750)],
                selected_year_count: vec![(2021, 0), (2022, 2)],
                city_salary: vec![("Москва".to_string(), 150000), ("Казань".to_string(), 40000)],
                city_count: vec![("Москва".to_string(), 0.6), ("Казань".to_string(), 0.4)],
            },
        }
    }

    #[test]
    fn test_plain_statistics_contains_both_sheets() {
        let text = plain_statistics(&make_data());
        assert!(text.starts_with("Профессия: Программист\nВакансий: 5\n"));
        assert!(text.contains("| 2022 | 194750"));
        assert!(text.contains("Средняя зарплата - Программист"));
        assert!(text.contains("| Москва | 150000"));
        assert!(text.contains("60.0%"));
    }

    #[test]
    fn test_as_u64_clamps_negative() {
        assert_eq!(as_u64(&[(2020, -5i64), (2021, 7i64)]), vec![(2020, 0), (2021, 7)]);
        assert_eq!(as_u64(&[(2020, 3u32)]), vec![(2020, 3)]);
    }

    #[test]
    fn test_render_statistics_does_not_panic() {
        let mut terminal = Terminal::new(TestBackend::new(160, 40)).unwrap();
        let theme = Theme::dark();
        let data = make_data();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_statistics(frame, area, &data, &theme);
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("Программист"));
        assert!(text.contains("Москва"));
    }

    #[test]
    fn test_render_statistics_empty_dynamics() {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let theme = Theme::classic();
        let data = StatisticsData::default();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_statistics(frame, area, &data, &theme);
            })
            .unwrap();
    }

    #[test]
    fn test_render_no_statistics_shows_placeholder() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let theme = Theme::dark();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_no_statistics(frame, area, &theme);
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains(NO_DATA));
        assert!(text.contains(EXIT_HINT));
    }
}
