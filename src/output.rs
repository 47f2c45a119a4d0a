//! Output formatting for suffix tables and query results

use crate::index::suffix_array::{Semantics, SuffixQueries};
use std::cmp::Ordering;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

fn choice(color: bool) -> ColorChoice {
    if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

/// Print the sorted suffix table to stdout
pub fn print_suffix_table<Q: SuffixQueries + ?Sized>(
    queries: &Q,
    text: &[u8],
    limit: usize,
    preview_width: usize,
    color: bool,
) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(choice(color));
    write_suffix_table(&mut stdout, queries, text, limit, preview_width)
}

/// Write one row per rank: rank, start position, LCP with the next row,
/// and a preview of the suffix with the prefix shared with the previous
/// row highlighted
pub fn write_suffix_table<W: WriteColor, Q: SuffixQueries + ?Sized>(
    out: &mut W,
    queries: &Q,
    text: &[u8],
    limit: usize,
    preview_width: usize,
) -> io::Result<()> {
    let n = queries.len();
    let rows = n.min(limit);
    let width = n.to_string().len().max(4);

    out.set_color(ColorSpec::new().set_bold(true))?;
    writeln!(out, "{:>width$} {:>width$} {:>width$}  suffix", "rank", "pos", "lcp")?;
    out.reset()?;

    let mut shared = 0;
    for rank in 0..rows {
        let pos = queries.order_at(rank).map_err(io::Error::other)?;
        let lcp = queries.lcp_at(rank).map_err(io::Error::other)?;

        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(out, "{:>width$}", rank)?;
        out.reset()?;
        write!(out, " ")?;
        out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
        write!(out, "{:>width$}", pos)?;
        out.reset()?;
        write!(out, " ")?;
        out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
        write!(out, "{:>width$}", lcp)?;
        out.reset()?;
        write!(out, "  ")?;

        let suffix = preview(text, pos, queries.semantics(), preview_width);
        let split = shared.min(suffix.len());

        // The prefix shared with the previous row
        if split > 0 {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
            write!(out, "{}", suffix[..split].escape_ascii())?;
            out.reset()?;
        }
        write!(out, "{}", suffix[split..].escape_ascii())?;
        if suffix.len() < suffix_len(n, pos, queries.semantics()) {
            write!(out, "...")?;
        }
        writeln!(out)?;

        shared = lcp;
    }

    if rows < n {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
        writeln!(out, "-- {} more", n - rows)?;
        out.reset()?;
    }

    Ok(())
}

/// Length of the suffix (or rotation) starting at `pos`
fn suffix_len(n: usize, pos: usize, semantics: Semantics) -> usize {
    match semantics {
        Semantics::Suffixes => n - pos,
        Semantics::Rotations => n,
    }
}

/// Up to `width` bytes of the suffix at `pos`; rotations wrap around
fn preview(text: &[u8], pos: usize, semantics: Semantics, width: usize) -> Vec<u8> {
    let len = suffix_len(text.len(), pos, semantics).min(width);
    text[pos..]
        .iter()
        .chain(text[..pos].iter())
        .take(len)
        .copied()
        .collect()
}

/// Numeric form of an ordering: -1, 0 or 1
pub fn ordering_sign(ordering: Ordering) -> i8 {
    match ordering {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

/// Print a comparison result
pub fn print_ordering(ordering: Ordering, color: bool) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(choice(color));
    let fg = match ordering {
        Ordering::Less => Color::Blue,
        Ordering::Equal => Color::Green,
        Ordering::Greater => Color::Magenta,
    };
    stdout.set_color(ColorSpec::new().set_fg(Some(fg)).set_bold(true))?;
    writeln!(stdout, "{}", ordering_sign(ordering))?;
    stdout.reset()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::suffix_array::{SuffixArray, SuffixArrayBuilder, SuffixArrayConfig};
    use termcolor::Buffer;

    fn render(queries: &dyn SuffixQueries, text: &[u8], limit: usize, width: usize) -> String {
        let mut buffer = Buffer::no_color();
        write_suffix_table(&mut buffer, queries, text, limit, width).unwrap();
        String::from_utf8(buffer.into_inner()).unwrap()
    }

    #[test]
    fn test_suffix_table() {
        let sa = SuffixArray::new(b"banana").unwrap();
        let output = render(&sa, b"banana", 10, 40);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 7);
        assert!(lines[0].contains("rank"));
        assert!(lines[1].trim_end().ends_with("  a"));
        assert!(lines[4].trim_end().ends_with("  banana"));
        assert!(lines[6].trim_end().ends_with("  nana"));
    }

    #[test]
    fn test_suffix_table_limit_and_width() {
        let sa = SuffixArray::new(b"banana").unwrap();
        let output = render(&sa, b"banana", 4, 3);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 6);
        assert!(lines[3].ends_with("ana..."));
        assert!(lines[5].contains("-- 2 more"));
    }

    #[test]
    fn test_rotation_preview_wraps() {
        assert_eq!(preview(b"banana", 4, Semantics::Rotations, 10), b"nabana");
        assert_eq!(preview(b"banana", 4, Semantics::Suffixes, 10), b"na");

        let array = SuffixArrayBuilder::new(SuffixArrayConfig {
            semantics: Semantics::Rotations,
            ..Default::default()
        })
        .build(b"banana")
        .unwrap()
        .array;
        let output = render(&array, b"banana", 10, 40);
        assert!(output.lines().nth(1).unwrap().ends_with("abanan"));
    }

    #[test]
    fn test_escapes_control_bytes() {
        let sa = SuffixArray::new(b"a\nb").unwrap();
        let output = render(&sa, b"a\nb", 10, 40);
        assert!(output.contains("\\n"));
    }

    #[test]
    fn test_ordering_sign() {
        assert_eq!(ordering_sign(Ordering::Less), -1);
        assert_eq!(ordering_sign(Ordering::Equal), 0);
        assert_eq!(ordering_sign(Ordering::Greater), 1);
    }
}
