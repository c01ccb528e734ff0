use chrono::{DateTime, Utc};
use colored::Colorize;

use crate::constants::{
    CHART_RESERVED_ROWS, DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH, MAX_CHART_HEIGHT,
    MAX_CHART_WIDTH, MIN_CHART_HEIGHT, MIN_CHART_WIDTH,
};
use crate::stats::PriceSummary;
use crate::types::PriceSample;

use super::{format_usd, terminal_dimensions};

/// Chart sizing requested on the command line or in the config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartOptions {
    pub width: Option<u16>,
    pub height: Option<u16>,
    pub enabled: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            enabled: true,
        }
    }
}

// Ordered by drawing priority: a cell only takes a higher-ranked mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Cell {
    Empty,
    Mean,
    Hold,
    Step,
    Sample,
}

impl Cell {
    fn glyph(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Mean => '┄',
            Cell::Hold => '─',
            Cell::Step => '│',
            Cell::Sample => '●',
        }
    }
}

/// A step-line chart of prices over time, drawn with box characters.
/// Spot prices hold until the next change, so each price extends right to the next sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceChart {
    width: usize,
    height: usize,
}

impl PriceChart {
    /// Plot area of `width` columns by `height` rows, clamped to drawable bounds.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width: usize::from(width.clamp(MIN_CHART_WIDTH, MAX_CHART_WIDTH)),
            height: usize::from(height.clamp(MIN_CHART_HEIGHT, MAX_CHART_HEIGHT)),
        }
    }

    /// Sizes the chart from explicit options, else from the terminal.
    /// Returns `None` when the terminal is too small to draw anything readable.
    pub fn fit_to_terminal(options: &ChartOptions, label_width: usize) -> Option<Self> {
        let terminal = terminal_dimensions();
        let reserved_columns = label_width as u16 + 3;

        let width = match (options.width, terminal) {
            (Some(width), _) => width,
            (None, Some((columns, _))) => columns.saturating_sub(reserved_columns),
            (None, None) => DEFAULT_CHART_WIDTH,
        };
        let height = match (options.height, terminal) {
            (Some(height), _) => height,
            (None, Some((_, rows))) => rows
                .saturating_sub(CHART_RESERVED_ROWS)
                .clamp(MIN_CHART_HEIGHT, DEFAULT_CHART_HEIGHT),
            (None, None) => DEFAULT_CHART_HEIGHT,
        };

        if width < MIN_CHART_WIDTH {
            tracing::debug!(width, "Terminal too narrow for a chart");
            return None;
        }
        Some(Self::new(width, height))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Width of the widest y-axis label for a summary.
    pub fn label_width(summary: &PriceSummary) -> usize {
        [summary.min, summary.max, summary.mean]
            .iter()
            .map(|price| format_usd(*price).chars().count())
            .max()
            .unwrap_or(0)
    }

    fn row_for(&self, price: f64, summary: &PriceSummary) -> usize {
        if summary.is_flat() {
            return self.height / 2;
        }
        let ratio = (summary.max - price) / (summary.max - summary.min);
        let row = (ratio * (self.height - 1) as f64).round();
        (row.max(0.0) as usize).min(self.height - 1)
    }

    fn column_for(&self, timestamp: DateTime<Utc>, summary: &PriceSummary) -> usize {
        let span = (summary.last_timestamp - summary.first_timestamp).num_seconds();
        if span <= 0 {
            return 0;
        }
        let offset = (timestamp - summary.first_timestamp).num_seconds() as f64;
        let col = (offset / span as f64 * (self.width - 1) as f64).round();
        (col.max(0.0) as usize).min(self.width - 1)
    }

    fn plot(&self, samples: &[PriceSample], summary: &PriceSummary) -> Vec<Vec<Cell>> {
        fn mark(grid: &mut [Vec<Cell>], row: usize, col: usize, cell: Cell) {
            if grid[row][col] < cell {
                grid[row][col] = cell;
            }
        }

        let mut grid = vec![vec![Cell::Empty; self.width]; self.height];

        let mean_row = self.row_for(summary.mean, summary);
        for col in 0..self.width {
            mark(&mut grid, mean_row, col, Cell::Mean);
        }

        let mut previous: Option<(usize, usize)> = None;
        for sample in samples {
            let col = self.column_for(sample.timestamp, summary);
            let row = self.row_for(sample.price, summary);

            if let Some((prev_col, prev_row)) = previous {
                for hold_col in prev_col + 1..col {
                    mark(&mut grid, prev_row, hold_col, Cell::Hold);
                }
                let (top, bottom) = (prev_row.min(row), prev_row.max(row));
                for step_row in top..=bottom {
                    mark(&mut grid, step_row, col, Cell::Step);
                }
            }

            mark(&mut grid, row, col, Cell::Sample);
            previous = Some((col, row));
        }

        if let Some((col, row)) = previous {
            for hold_col in col + 1..self.width {
                mark(&mut grid, row, hold_col, Cell::Hold);
            }
        }

        grid
    }

    /// Draws the chart, y-axis labels and x-axis. `styled` adds terminal colours.
    pub fn lines(&self, samples: &[PriceSample], summary: &PriceSummary, styled: bool) -> Vec<String> {
        let grid = self.plot(samples, summary);
        let label_width = Self::label_width(summary);

        let mean_row = self.row_for(summary.mean, summary);
        let label_for = |row: usize| -> Option<f64> {
            if summary.is_flat() {
                (row == self.height / 2).then_some(summary.max)
            } else if row == 0 {
                Some(summary.max)
            } else if row == self.height - 1 {
                Some(summary.min)
            } else if row == mean_row {
                Some(summary.mean)
            } else {
                None
            }
        };

        let mut lines = Vec::with_capacity(self.height + 3);
        for (row, cells) in grid.iter().enumerate() {
            let (label, axis) = match label_for(row) {
                Some(price) => (format_usd(price), '┤'),
                None => (String::new(), '│'),
            };
            let body: String = cells
                .iter()
                .map(|cell| Self::styled_glyph(*cell, styled))
                .collect();
            lines.push(format!("{:>label_width$} {}{}", label, axis, body));
        }

        lines.push(format!(
            "{:>label_width$} └{}",
            "",
            "─".repeat(self.width)
        ));
        lines.push(format!(
            "{:>label_width$}  {}",
            "",
            self.x_axis_labels(summary)
        ));

        let legend = format!(
            "{} USD/hr   {} mean {}",
            Self::styled_glyph(Cell::Sample, styled),
            Self::styled_glyph(Cell::Mean, styled),
            format_usd(summary.mean)
        );
        lines.push(format!("{:>label_width$}  {}", "", legend));

        lines
    }

    fn x_axis_labels(&self, summary: &PriceSummary) -> String {
        let span_hours =
            (summary.last_timestamp - summary.first_timestamp).num_seconds() as f64 / 3600.0;
        let left = format!("-{:.1}h", span_hours);
        let middle = format!("-{:.1}h", span_hours / 2.0);
        let right = "latest".to_string();

        let mut axis: Vec<char> = vec![' '; self.width];
        let mut place = |text: &str, start: usize| {
            for (offset, ch) in text.chars().enumerate() {
                if let Some(slot) = axis.get_mut(start + offset) {
                    *slot = ch;
                }
            }
        };

        let right_start = self.width.saturating_sub(right.chars().count());
        place(&left, 0);
        let middle_len = middle.chars().count();
        let middle_start = (self.width / 2).saturating_sub(middle_len / 2);
        if middle_start > left.chars().count() + 1 && middle_start + middle_len + 1 < right_start {
            place(&middle, middle_start);
        }
        place(&right, right_start);

        axis.into_iter().collect::<String>().trim_end().to_string()
    }

    fn styled_glyph(cell: Cell, styled: bool) -> String {
        let glyph = cell.glyph().to_string();
        if !styled {
            return glyph;
        }
        match cell {
            Cell::Sample | Cell::Hold | Cell::Step => glyph.green().to_string(),
            Cell::Mean => glyph.red().to_string(),
            Cell::Empty => glyph,
        }
    }
}
