use ratatui::style::{Color, Modifier, Style};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
}

/// Detect the terminal background from `COLORFGBG` (`"fg;bg"`).
///
/// Background values 0-6 are dark, everything else is light. A missing or
/// unparseable variable means dark.
pub fn detect_background() -> BackgroundType {
    background_from(std::env::var("COLORFGBG").ok().as_deref())
}

fn background_from(colorfgbg: Option<&str>) -> BackgroundType {
    match colorfgbg
        .and_then(|val| val.split(';').next_back())
        .and_then(|bg| bg.parse::<u8>().ok())
    {
        Some(bg) if bg > 6 => BackgroundType::Light,
        _ => BackgroundType::Dark,
    }
}

/// Styles used by the vacancy table and statistics views.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Text ─────────────────────────────────────────────────────────────────
    pub header: Style,
    pub text: Style,
    pub dim: Style,
    pub label: Style,
    pub warning: Style,

    // ── Table ────────────────────────────────────────────────────────────────
    pub table_header: Style,
    pub table_border: Style,
    pub table_row: Style,
    pub table_row_alt: Style,

    // ── Charts ───────────────────────────────────────────────────────────────
    /// Bars of the overall salary and count series.
    pub chart_all: Style,
    /// Bars of the selected-vacancy series.
    pub chart_selected: Style,
    /// Bars of the per-city series.
    pub chart_city: Style,
    pub chart_value: Style,
}

impl Theme {
    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            warning: Style::default().fg(Color::Yellow),

            table_header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),

            chart_all: Style::default().fg(Color::Cyan),
            chart_selected: Style::default().fg(Color::Magenta),
            chart_city: Style::default().fg(Color::Green),
            chart_value: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan),
        }
    }

    /// Light-background terminal theme.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            label: Style::default().fg(Color::DarkGray),
            warning: Style::default().fg(Color::Red),

            table_header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::Gray),
            table_row: Style::default().fg(Color::Black),
            table_row_alt: Style::default().fg(Color::DarkGray),

            chart_all: Style::default().fg(Color::Blue),
            chart_selected: Style::default().fg(Color::Magenta),
            chart_city: Style::default().fg(Color::Green),
            chart_value: Style::default()
                .fg(Color::White)
                .bg(Color::Blue),
        }
    }

    /// Basic 8-colour ANSI palette without modifiers.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::White),
            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::White),
            label: Style::default().fg(Color::White),
            warning: Style::default().fg(Color::Yellow),

            table_header: Style::default().fg(Color::White),
            table_border: Style::default().fg(Color::White),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::White),

            chart_all: Style::default().fg(Color::Blue),
            chart_selected: Style::default().fg(Color::Red),
            chart_city: Style::default().fg(Color::Green),
            chart_value: Style::default().fg(Color::White),
        }
    }

    /// Choose a theme from the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            BackgroundType::Dark => Self::dark(),
        }
    }

    /// Construct a theme by name. Unknown names fall back to `auto_detect`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }

    /// Alternating row style, starting with `table_row`.
    pub fn row_style(&self, index: usize) -> Style {
        if index % 2 == 0 {
            self.table_row
        } else {
            self.table_row_alt
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
