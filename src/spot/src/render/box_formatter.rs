use colored::Colorize;
use std::fmt::Write;

const LABEL_WIDTH: usize = 22;
const MIN_WIDTH: usize = LABEL_WIDTH + 12;

/// Formats a box like interface in the command line.
/// create with `BoxFormatter::new(width)`
pub struct BoxFormatter {
    output: String,
    width: usize,
}

impl BoxFormatter {
    /// `max_width` is shrunk to the terminal width when the terminal is narrower.
    pub fn new(max_width: usize) -> Self {
        let width = match super::terminal_dimensions() {
            Some((columns, _)) if usize::from(columns) > MIN_WIDTH + 2 => {
                max_width.min(usize::from(columns) - 2)
            }
            _ => max_width,
        };
        Self::with_width(width)
    }

    pub fn with_width(width: usize) -> Self {
        Self {
            output: String::new(),
            width: width.max(MIN_WIDTH),
        }
    }

    pub fn add_header(&mut self, title: &str) {
        let _ = writeln!(
            &mut self.output,
            "┌{:─^width$}┐",
            format!(" {} ", title),
            width = self.width - 2
        );
    }

    pub fn add_section_header(&mut self, title: &str) {
        let _ = writeln!(
            &mut self.output,
            "├{:─^width$}┤",
            format!(" {} ", title),
            width = self.width - 2
        );
    }

    pub fn add_footer(&mut self) {
        let _ = writeln!(
            &mut self.output,
            "└{:─^width$}┘",
            "",
            width = self.width - 2
        );
    }

    pub fn add_field(&mut self, label: &str, value: &str, color: &str) {
        let max_value_width = self.width - LABEL_WIDTH - 7;
        let formatted_value = Self::format_value(value, color, max_value_width);
        let padding = max_value_width.saturating_sub(value.chars().count());
        let _ = writeln!(
            &mut self.output,
            "│ {:<label_width$} │ {}{} │",
            label,
            formatted_value,
            " ".repeat(padding),
            label_width = LABEL_WIDTH
        );
    }

    // truncate before colouring so escape codes are never cut
    fn format_value(value: &str, color: &str, max_value_width: usize) -> String {
        let value = if value.chars().count() > max_value_width {
            let kept: String = value.chars().take(max_value_width.saturating_sub(3)).collect();
            format!("{}...", kept)
        } else {
            value.to_string()
        };

        match color {
            "green" => value.green(),
            "yellow" => value.yellow(),
            "cyan" => value.cyan(),
            "blue" => value.blue(),
            "red" => value.red(),
            "bold" => value.bold(),
            _ => value.normal(),
        }
        .to_string()
    }

    pub fn get_output(&self) -> &str {
        &self.output
    }
}
