// Primitives for reading CSV files.

use std::fs::File;
use std::io::Read;

use crate::convoca::{io_common::parse_table, io_common::ParsedRow, *};

pub fn read_csv_pool(path: &str, source: &PoolSource) -> BConvocaResult<Vec<ParsedRow>> {
    let file = File::open(path).context(OpeningFileSnafu { path })?;
    read_csv_records(file, path, source)
}

pub fn read_csv_records<R: Read>(
    rdr: R,
    path: &str,
    source: &PoolSource,
) -> BConvocaResult<Vec<ParsedRow>> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(rdr);

    let mut lines: Vec<(usize, Vec<String>)> = Vec::new();
    for (idx, line_r) in rdr.into_records().enumerate() {
        let line = line_r.context(CsvLineParseSnafu { path })?;
        // Blank lines are not returned by the reader, the position keeps the
        // line numbers in line with the file.
        let lineno = line
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(idx + 1);
        debug!("read_csv_records: lineno: {:?} row: {:?}", lineno, &line);
        lines.push((lineno, line.iter().map(|s| s.to_string()).collect()));
    }
    parse_table(lines, source, path)
}
