use crate::{clock::strftime, fixed1};
use dash_core::{event::Message, history::HistoryRow, state::AppState, RowError};
use dash_theme::{style, Theme};
use iced::{
    widget::{column, container, scrollable, text, Column, Row},
    Element, Length,
};
use tracing::warn;

/// Column headings of the history table (`history-body`).
pub const COLUMNS: [&str; 5] = ["Timestamp", "CPU %", "Memory %", "Disk %", "Disk I/O"];

/// Text of the single row shown when there is no history at all.
pub const NO_DATA: &str = "No historical data available.";

/// Relative column widths; the timestamp gets the most room.
const PORTIONS: [u16; 5] = [3, 1, 1, 1, 2];

/// How the table treats its input rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableMode {
    /// Unfiltered: only the first `cap` rows.
    Recent,
    /// Date-filtered: every row passed in, no cap.
    Filtered,
}

/// One history row, formatted for display.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedRow {
    pub timestamp: String,
    pub cpu:       String,
    pub memory:    String,
    pub disk:      String,
    pub io:        String,
}

impl RenderedRow {
    fn cells(&self) -> [&str; 5] {
        [&self.timestamp, &self.cpu, &self.memory, &self.disk, &self.io]
    }
}

/// The derived table body.
#[derive(Debug, Clone, PartialEq)]
pub enum TableView {
    /// No input rows at all: one cell spanning `colspan` columns.
    Placeholder { colspan: usize, text: &'static str },
    Rows(Vec<RenderedRow>),
}

/// Render `rows` into table cells.
///
/// In [`TableMode::Recent`] only the first `cap` input rows are considered;
/// in [`TableMode::Filtered`] all of them are.  A row that fails to render is
/// logged and skipped without affecting the others.
pub fn render_table<'a, I>(rows: I, mode: TableMode, cap: usize, timestamp_format: &str) -> TableView
where
    I: IntoIterator<Item = &'a HistoryRow>,
{
    let mut rows = rows.into_iter().peekable();
    if rows.peek().is_none() {
        return TableView::Placeholder { colspan: COLUMNS.len(), text: NO_DATA };
    }

    let limit = match mode {
        TableMode::Recent   => cap,
        TableMode::Filtered => usize::MAX,
    };

    let rendered = rows
        .take(limit)
        .enumerate()
        .filter_map(|(index, row)| match render_row(row, timestamp_format) {
            Ok(r) => Some(r),
            Err(e) => {
                warn!(index, error = %e, row = ?row, "Skipping history row");
                None
            }
        })
        .collect();

    TableView::Rows(rendered)
}

fn render_row(row: &HistoryRow, timestamp_format: &str) -> Result<RenderedRow, RowError> {
    let v = row.values()?;
    Ok(RenderedRow {
        timestamp: strftime(&v.timestamp, timestamp_format),
        cpu:       fixed1(v.cpu),
        memory:    fixed1(v.memory),
        disk:      fixed1(v.disk),
        io:        format!("{} MB/s", fixed1(v.io)),
    })
}

/// History table fed from the cache, capped or filtered per the app state.
#[derive(Debug)]
pub struct HistoryWidget {
    cap: usize,
}

impl HistoryWidget {
    pub fn new(cap: usize) -> Self {
        Self { cap }
    }

    pub fn set_cap(&mut self, cap: usize) {
        self.cap = cap;
    }

    /// The table body for the current state.
    pub fn table(&self, state: &AppState, theme: &Theme) -> TableView {
        let (rows, filtered) = state.history_view();
        let mode = if filtered { TableMode::Filtered } else { TableMode::Recent };
        render_table(rows, mode, self.cap, &theme.timestamp_format)
    }

    pub fn view<'a>(&'a self, state: &'a AppState, theme: &'a Theme) -> Element<'a, Message> {
        let muted = theme.foreground.with_alpha(0.6).to_iced();
        let header = table_row(COLUMNS.map(String::from), theme.font_size - 1.0, Some(muted));

        let body: Element<'a, Message> = match self.table(state, theme) {
            TableView::Placeholder { text: label, .. } => container(text(label).size(theme.font_size).color(muted))
                .width(Length::Fill)
                .center_x(Length::Fill)
                .padding(8)
                .into(),
            TableView::Rows(rows) => Column::with_children(
                rows.iter()
                    .map(|r| table_row(r.cells().map(str::to_owned), theme.font_size, None)),
            )
            .spacing(2)
            .into(),
        };

        container(column![header, scrollable(body).height(Length::Fill)].spacing(6))
            .padding(theme.padding)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(style::panel(theme))
            .into()
    }
}

fn table_row<'a>(cells: [String; 5], size: f32, color: Option<iced::Color>) -> Element<'a, Message> {
    let mut r = Row::new().width(Length::Fill);
    for (cell, portion) in cells.into_iter().zip(PORTIONS) {
        let mut t = text(cell).size(size);
        if let Some(c) = color {
            t = t.color(c);
        }
        r = r.push(container(t).width(Length::FillPortion(portion)));
    }
    r.into()
}
