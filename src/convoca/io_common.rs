// Primitives shared by the spreadsheet and CSV readers.

use crate::convoca::*;

/// A candidate row, as read from a pool file. Both fields are trimmed and
/// non-empty.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ParsedRow {
    pub lineno: usize,
    pub program: String,
    pub name: String,
}

/// A cell that can be read as text.
pub trait CellText {
    fn text(&self, lineno: usize) -> BConvocaResult<String>;
}

impl CellText for String {
    fn text(&self, _lineno: usize) -> BConvocaResult<String> {
        Ok(self.clone())
    }
}

/// Headers and values are compared without surrounding whitespace. A byte
/// order mark may stick to the first cell of a file.
pub fn normalize_cell(s: &str) -> &str {
    s.trim_start_matches('\u{feff}').trim()
}

fn find_column<C: CellText>(
    header: &[C],
    header_lineno: usize,
    column: &str,
    path: &str,
) -> BConvocaResult<usize> {
    for (idx, cell) in header.iter().enumerate() {
        if normalize_cell(&cell.text(header_lineno)?) == column.trim() {
            return Ok(idx);
        }
    }
    Err(Box::new(ConvocaError::MissingColumn {
        column: column.to_string(),
        path: path.to_string(),
    }))
}

fn read_field<C: CellText>(row: &[C], idx: usize, lineno: usize) -> BConvocaResult<String> {
    match row.get(idx) {
        Some(cell) => Ok(normalize_cell(&cell.text(lineno)?).to_string()),
        None => Ok(String::new()),
    }
}

/// Extracts the (program, name) rows of a table.
///
/// `lines` are the rows of the file with their 1-based line numbers. Lines
/// before the header are ignored. Rows missing the program or the name are
/// skipped.
pub fn parse_table<C, I>(lines: I, source: &PoolSource, path: &str) -> BConvocaResult<Vec<ParsedRow>>
where
    C: CellText,
    I: IntoIterator<Item = (usize, Vec<C>)>,
{
    let header_row = source.header_row_index()?;
    let mut iter = lines
        .into_iter()
        .skip_while(|(lineno, _)| *lineno < header_row);

    let (header_lineno, header) = iter.next().context(MissingHeaderSnafu {
        row: header_row,
        path,
    })?;
    if header_lineno != header_row {
        return Err(Box::new(ConvocaError::MissingHeader {
            row: header_row,
            path: path.to_string(),
        }));
    }
    let program_idx = find_column(&header, header_lineno, source.program_column(), path)?;
    let name_idx = find_column(&header, header_lineno, source.name_column(), path)?;
    debug!(
        "parse_table: {:?}: program column {}, name column {}",
        path, program_idx, name_idx
    );

    let mut res: Vec<ParsedRow> = Vec::new();
    for (lineno, row) in iter {
        let program = read_field(&row, program_idx, lineno)?;
        let name = read_field(&row, name_idx, lineno)?;
        match (program.is_empty(), name.is_empty()) {
            (true, true) => {
                debug!("parse_table: {:?}: line {} is blank", path, lineno);
            }
            (true, false) | (false, true) => {
                warn!(
                    "{}: line {}: skipping row with program {:?} and name {:?}",
                    path, lineno, program, name
                );
            }
            (false, false) => res.push(ParsedRow {
                lineno,
                program,
                name,
            }),
        }
    }
    Ok(res)
}
