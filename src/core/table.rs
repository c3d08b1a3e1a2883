//! Sortable breakdown tables
//!
//! A [`Table`] pairs rows of one record type with a list of [`Column`]
//! descriptors. Each row type names its columns with its own key enum
//! through [`TableRow`], so a column can only ever address a field the row
//! actually has.
//!
//! Sorting follows the dashboard's header-click behaviour: the first request
//! for a column sorts ascending, a repeated request flips the direction, and
//! switching columns starts ascending again.

use super::aggregate::{LocationMetric, TypeMetric};
use std::cmp::Ordering;
use std::fmt::Write as _;

/// Message shown for a table without rows
pub const DEFAULT_EMPTY_MESSAGE: &str = "No data available";

/// Value of one table cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Text(String),
    Number(u64),
}

impl CellValue {
    fn compare(&self, other: &CellValue) -> Ordering {
        match (self, other) {
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            (CellValue::Number(a), CellValue::Number(b)) => a.cmp(b),
            (a, b) => a.plain().cmp(&b.plain()),
        }
    }

    fn plain(&self) -> String {
        match self {
            CellValue::Text(text) => text.clone(),
            CellValue::Number(n) => n.to_string(),
        }
    }
}

/// A record that can be shown as a table row
pub trait TableRow {
    /// Column key type, usually a fieldless enum
    type Key: Copy + Eq + std::fmt::Debug;

    fn cell(&self, key: Self::Key) -> CellValue;
}

/// How a cell is turned into text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStrategy {
    Plain,
    /// Right-aligned number
    Number,
    Minutes,
    Percent,
    /// Percentage with a bar of the given width
    ProgressBar { width: usize },
}

impl RenderStrategy {
    fn render(&self, value: &CellValue) -> String {
        match (self, value) {
            (RenderStrategy::Number, CellValue::Number(n)) => n.to_string(),
            (RenderStrategy::Minutes, CellValue::Number(n)) => format!("{n} min"),
            (RenderStrategy::Percent, CellValue::Number(n)) => format!("{n}%"),
            (RenderStrategy::ProgressBar { width }, CellValue::Number(n)) => {
                let filled = ((*n).min(100) as usize * width + 50) / 100;
                format!(
                    "[{}{}] {n}%",
                    "#".repeat(filled),
                    " ".repeat(width.saturating_sub(filled))
                )
            }
            (_, CellValue::Text(text)) if text.is_empty() => "-".to_string(),
            (_, other) => other.plain(),
        }
    }

    fn right_aligned(&self) -> bool {
        !matches!(self, RenderStrategy::Plain)
    }
}

/// Column descriptor
#[derive(Debug, Clone)]
pub struct Column<K> {
    pub key: K,

    /// Machine name used to select the column from the command line
    pub name: &'static str,

    pub label: String,
    pub sortable: bool,
    pub render: RenderStrategy,
}

impl<K> Column<K> {
    pub fn new(key: K, name: &'static str, label: impl Into<String>) -> Self {
        Self {
            key,
            name,
            label: label.into(),
            sortable: false,
            render: RenderStrategy::Plain,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn render(mut self, render: RenderStrategy) -> Self {
        self.render = render;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Current sort column and direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState<K> {
    pub key: Option<K>,
    pub direction: SortDirection,
}

impl<K: Copy + Eq> Default for SortState<K> {
    fn default() -> Self {
        Self {
            key: None,
            direction: SortDirection::Ascending,
        }
    }
}

impl<K: Copy + Eq> SortState<K> {
    /// Applies one header click on `key`
    pub fn toggle(&mut self, key: K) {
        if self.key == Some(key) {
            self.direction = self.direction.flipped();
        } else {
            self.key = Some(key);
            self.direction = SortDirection::Ascending;
        }
    }
}

/// Rows plus column descriptors plus sort state
#[derive(Debug, Clone)]
pub struct Table<T: TableRow> {
    rows: Vec<T>,
    columns: Vec<Column<T::Key>>,
    sort: SortState<T::Key>,
    empty_message: String,
}

impl<T: TableRow> Table<T> {
    pub fn new(rows: Vec<T>, columns: Vec<Column<T::Key>>) -> Self {
        Self {
            rows,
            columns,
            sort: SortState::default(),
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
        }
    }

    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    pub fn columns(&self) -> &[Column<T::Key>] {
        &self.columns
    }

    pub fn sort_state(&self) -> SortState<T::Key> {
        self.sort
    }

    /// Toggles sorting on `key`; returns false if the column is not sortable
    pub fn toggle_sort(&mut self, key: T::Key) -> bool {
        let sortable = self
            .columns
            .iter()
            .any(|column| column.key == key && column.sortable);
        if sortable {
            self.sort.toggle(key);
        }
        sortable
    }

    /// Sorts on the column with machine name `name` in the given direction
    pub fn sort_by_name(&mut self, name: &str, direction: SortDirection) -> bool {
        let Some(key) = self
            .columns
            .iter()
            .find(|column| column.name == name && column.sortable)
            .map(|column| column.key)
        else {
            return false;
        };

        self.sort = SortState {
            key: Some(key),
            direction,
        };
        true
    }

    /// Rows in display order; unsorted tables keep input order
    pub fn rows(&self) -> Vec<&T> {
        let mut rows: Vec<&T> = self.rows.iter().collect();
        if let Some(key) = self.sort.key {
            rows.sort_by(|a, b| {
                let ordering = a.cell(key).compare(&b.cell(key));
                match self.sort.direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }
        rows
    }

    fn header(&self, column: &Column<T::Key>) -> String {
        if !column.sortable {
            return column.label.clone();
        }
        let indicator = match (self.sort.key, self.sort.direction) {
            (Some(key), SortDirection::Ascending) if key == column.key => "↑",
            (Some(key), SortDirection::Descending) if key == column.key => "↓",
            _ => "↕",
        };
        format!("{} {indicator}", column.label)
    }

    /// Renders the table as aligned plain text
    pub fn render_text(&self) -> String {
        if self.rows.is_empty() {
            return format!("{}\n", self.empty_message);
        }

        let headers: Vec<String> = self.columns.iter().map(|c| self.header(c)).collect();
        let body: Vec<Vec<String>> = self
            .rows()
            .into_iter()
            .map(|row| {
                self.columns
                    .iter()
                    .map(|column| column.render.render(&row.cell(column.key)))
                    .collect()
            })
            .collect();

        let widths: Vec<usize> = headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                body.iter()
                    .map(|cells| cells[i].chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        let line = |cells: &[String], out: &mut String| {
            let rendered: Vec<String> = cells
                .iter()
                .zip(&self.columns)
                .zip(&widths)
                .map(|((cell, column), &width)| {
                    if column.render.right_aligned() {
                        format!("{cell:>width$}")
                    } else {
                        format!("{cell:<width$}")
                    }
                })
                .collect();
            let _ = writeln!(out, "{}", rendered.join("  ").trim_end());
        };

        line(&headers, &mut out);
        let total_width = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        let _ = writeln!(out, "{}", "-".repeat(total_width));
        for cells in &body {
            line(cells, &mut out);
        }
        out
    }
}

/// Column keys of the location breakdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationColumn {
    Name,
    SamplesProcessed,
    AvgProcessingMinutes,
    Utilization,
}

impl TableRow for LocationMetric {
    type Key = LocationColumn;

    fn cell(&self, key: LocationColumn) -> CellValue {
        match key {
            LocationColumn::Name => CellValue::Text(self.location_name.clone()),
            LocationColumn::SamplesProcessed => CellValue::Number(self.samples_processed as u64),
            LocationColumn::AvgProcessingMinutes => {
                CellValue::Number(u64::from(self.avg_processing_minutes))
            }
            LocationColumn::Utilization => CellValue::Number(u64::from(self.utilization_percent)),
        }
    }
}

/// Column keys of the sample type breakdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeColumn {
    SampleType,
    Count,
    AvgProcessingMinutes,
    CompletionRate,
}

impl TableRow for TypeMetric {
    type Key = TypeColumn;

    fn cell(&self, key: TypeColumn) -> CellValue {
        match key {
            TypeColumn::SampleType => CellValue::Text(self.sample_type.clone()),
            TypeColumn::Count => CellValue::Number(self.count as u64),
            TypeColumn::AvgProcessingMinutes => {
                CellValue::Number(u64::from(self.avg_processing_minutes))
            }
            TypeColumn::CompletionRate => {
                CellValue::Number(u64::from(self.completion_rate_percent))
            }
        }
    }
}

/// Location breakdown table with the dashboard's standard columns
pub fn location_table(rows: Vec<LocationMetric>) -> Table<LocationMetric> {
    Table::new(
        rows,
        vec![
            Column::new(LocationColumn::Name, "location", "Location").sortable(),
            Column::new(LocationColumn::SamplesProcessed, "processed", "Samples Processed")
                .sortable()
                .render(RenderStrategy::Number),
            Column::new(LocationColumn::AvgProcessingMinutes, "avg-time", "Avg Processing Time")
                .sortable()
                .render(RenderStrategy::Minutes),
            Column::new(LocationColumn::Utilization, "utilization", "Utilization")
                .sortable()
                .render(RenderStrategy::ProgressBar { width: 10 }),
        ],
    )
}

/// Sample type breakdown table with the dashboard's standard columns
pub fn type_table(rows: Vec<TypeMetric>) -> Table<TypeMetric> {
    Table::new(
        rows,
        vec![
            Column::new(TypeColumn::SampleType, "type", "Sample Type").sortable(),
            Column::new(TypeColumn::Count, "count", "Count")
                .sortable()
                .render(RenderStrategy::Number),
            Column::new(TypeColumn::AvgProcessingMinutes, "avg-time", "Avg Processing Time")
                .sortable()
                .render(RenderStrategy::Minutes),
            Column::new(TypeColumn::CompletionRate, "completion", "Completion Rate")
                .sortable()
                .render(RenderStrategy::Percent),
        ],
    )
}
