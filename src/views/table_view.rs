use crate::model::SeriesTable;
use crate::utils::format_row;
use std::io::{self, Write};
use termcolor::{Color, ColorSpec, WriteColor};

/// Writes the table the way `Display` does, colored for a terminal.
pub fn render(table: &SeriesTable, out: &mut impl WriteColor) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    writeln!(out, "Dicom files at {}", table.path().display())?;

    for (name, members) in table.sections() {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
        writeln!(out, "{name}:")?;
        for series in members {
            let color = if series.is_multi_echo() {
                Color::Cyan
            } else {
                Color::Blue
            };
            out.set_color(ColorSpec::new().set_fg(Some(color)))?;
            writeln!(out, "{}", format_row(series))?;
        }
    }

    out.reset()
}

/// Prints a message in red, used for recoverable errors at the prompt.
pub fn render_error(message: &str, out: &mut impl WriteColor) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
    writeln!(out, "{message}")?;
    out.reset()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Series;
    use termcolor::Buffer;

    fn table() -> SeriesTable {
        let mut multi_echo = Series::new(6, "MBME_RPE1_TMS", Vec::new());
        multi_echo.echo_times = vec![11.2, 32.36];
        SeriesTable::from_series("/data", vec![Series::new(1, "AAHEAD_SCOUT", Vec::new()), multi_echo])
    }

    #[test]
    fn plain_output_matches_display() {
        let table = table().group(&[6], "func").unwrap();
        let mut buffer = Buffer::no_color();
        render(&table, &mut buffer).unwrap();

        let text = String::from_utf8(buffer.into_inner()).unwrap();
        assert_eq!(text, format!("{table}\n"));
    }

    #[test]
    fn colors_rows_by_echo_kind() {
        let mut buffer = Buffer::ansi();
        render(&table(), &mut buffer).unwrap();

        let text = String::from_utf8(buffer.into_inner()).unwrap();
        assert!(text.contains("\x1b[0m\x1b[34m  1\t"));
        assert!(text.contains("\x1b[0m\x1b[36m  6\t"));
    }

    #[test]
    fn errors_are_red() {
        let mut buffer = Buffer::ansi();
        render_error("series 9 not in table", &mut buffer).unwrap();
        let text = String::from_utf8(buffer.into_inner()).unwrap();
        assert!(text.starts_with("\x1b[0m\x1b[31mseries 9 not in table"));
    }
}
