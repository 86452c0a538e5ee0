use std::ops::Range;

use unicode_segmentation::UnicodeSegmentation;

use crate::util::unicode::{display_width, grapheme_display_width};

/// A grapheme with its byte offset and display width.
struct Grapheme<'a> {
    s: &'a str,
    byte_offset: usize,
    display_width: usize,
}

impl Grapheme<'_> {
    fn is_whitespace(&self) -> bool {
        self.s.chars().all(char::is_whitespace)
    }
}

fn graphemes(line: &str) -> Vec<Grapheme<'_>> {
    line.grapheme_indices(true)
        .map(|(i, g)| Grapheme {
            s: g,
            byte_offset: i,
            display_width: grapheme_display_width(g),
        })
        .collect()
}

/// Wrap a single line into byte ranges, one per visual row.
///
/// Breaks at whitespace (which is dropped at the break), moves a word that
/// does not fit to the next row, and splits a word wider than `width`
/// between graphemes. A `width` of 0 disables wrapping.
pub fn wrap_line(line: &str, width: usize) -> Vec<Range<usize>> {
    if width == 0 || display_width(line) <= width {
        return vec![0..line.len()];
    }

    let gs = graphemes(line);
    let byte_at = |idx: usize| gs.get(idx).map_or(line.len(), |g| g.byte_offset);

    let mut rows = Vec::new();
    let mut row_start = 0;
    let mut col = 0;
    let mut i = 0;

    while i < gs.len() {
        let ws = gs[i].is_whitespace();
        let mut j = i;
        while j < gs.len() && gs[j].is_whitespace() == ws {
            j += 1;
        }
        let token_width: usize = gs[i..j].iter().map(|g| g.display_width).sum();

        if col + token_width <= width {
            col += token_width;
            i = j;
        } else if ws {
            rows.push(row_start..byte_at(i));
            row_start = byte_at(j);
            col = 0;
            i = j;
        } else if col > 0 {
            // Retry the word at the start of the next row
            rows.push(row_start..byte_at(i));
            row_start = byte_at(i);
            col = 0;
        } else {
            for k in i..j {
                let w = gs[k].display_width;
                if col + w > width && col > 0 {
                    rows.push(row_start..byte_at(k));
                    row_start = byte_at(k);
                    col = 0;
                }
                col += w;
            }
            i = j;
        }
    }

    if row_start < line.len() || rows.is_empty() {
        rows.push(row_start..line.len());
    }
    rows
}

/// Wrap multi-line text into visual rows. Trailing whitespace on a wrapped
/// row is dropped.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    text.lines()
        .flat_map(|line| {
            wrap_line(line, width)
                .into_iter()
                .map(move |r| line[r].trim_end().to_string())
        })
        .collect()
}
