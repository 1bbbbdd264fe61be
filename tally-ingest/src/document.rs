//! Seam between the extractors and whatever turns a statement file into
//! page text or table grids.

use std::path::Path;

use anyhow::Result;

use crate::types::{Row, Table};

/// Source of raw page content for a statement file.
///
/// Implementations open the document, read it and release it within each
/// call; nothing is held between calls.
pub trait DocumentReader {
    /// Plain text, one entry per page
    fn read_text(&self, path: &Path) -> Result<Vec<String>>;

    /// Cell grids, one table per page
    fn read_tables(&self, path: &Path) -> Result<Vec<Table>>;
}

/// Concatenate page text the way line scanners expect it
pub fn join_pages(pages: &[String]) -> String {
    pages.join("\n")
}

/// Split a text line into cells on tabs or runs of two or more spaces.
pub fn split_cells(line: &str) -> Row {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut spaces = 0usize;

    for ch in line.chars() {
        match ch {
            '\t' => {
                push_cell(&mut cells, &mut current);
                spaces = 0;
            }
            ' ' => spaces += 1,
            _ => {
                if spaces >= 2 {
                    push_cell(&mut cells, &mut current);
                } else if spaces == 1 && !current.is_empty() {
                    current.push(' ');
                }
                spaces = 0;
                current.push(ch);
            }
        }
    }
    push_cell(&mut cells, &mut current);
    cells
}

fn push_cell(cells: &mut Row, current: &mut String) {
    if !current.is_empty() {
        cells.push(Some(std::mem::take(current)));
    }
}

/// Recover a cell grid from laid-out page text; blank lines are dropped.
pub fn text_to_table(page: &str) -> Table {
    page.lines()
        .filter(|line| !line.trim().is_empty())
        .map(split_cells)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_cells_on_wide_gaps() {
        let row = split_cells("5月20日   5月21日    STARBUCKS CENTRAL      123.45");
        assert_eq!(
            row,
            vec![
                Some("5月20日".to_string()),
                Some("5月21日".to_string()),
                Some("STARBUCKS CENTRAL".to_string()),
                Some("123.45".to_string()),
            ]
        );
    }

    #[test]
    fn test_split_cells_tabs_and_single_cell() {
        assert_eq!(split_cells("a\tb c").len(), 2);
        assert_eq!(split_cells("  just one cell  "), vec![Some("just one cell".to_string())]);
        assert!(split_cells("   ").is_empty());
    }

    #[test]
    fn test_text_to_table_skips_blank_lines() {
        let table = text_to_table("Date  Amount\n\n1月2日  300.00\n");
        assert_eq!(table.len(), 2);
        assert_eq!(table[1][1].as_deref(), Some("300.00"));
    }

    #[test]
    fn test_join_pages() {
        let pages = vec!["page one".to_string(), "page two".to_string()];
        assert_eq!(join_pages(&pages), "page one\npage two");
    }
}
