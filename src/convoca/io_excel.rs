// Reads the pools from the worksheets of a classification workbook.

use calamine::{open_workbook, DataType, Reader, Xlsx};

use crate::convoca::{
    io_common::{parse_table, CellText, ParsedRow},
    *,
};

impl CellText for DataType {
    fn text(&self, lineno: usize) -> BConvocaResult<String> {
        match self {
            DataType::String(s) => Ok(s.clone()),
            DataType::Empty => Ok(String::new()),
            DataType::Int(i) => Ok(i.to_string()),
            // Whole numbers are stored as floats.
            DataType::Float(f) if f.fract() == 0.0 => Ok(format!("{}", *f as i64)),
            DataType::Float(f) => Ok(f.to_string()),
            DataType::Bool(b) => Ok(b.to_string()),
            _ => Err(Box::new(ConvocaError::ExcelWrongCellType {
                lineno: lineno as u64,
                content: format!("{:?}", self),
            })),
        }
    }
}

/// Finds a worksheet by its exact name, then by its name without surrounding
/// whitespace: some workbooks have sheets named like `" TECNICO - NEGROS"`.
pub fn find_worksheet_name(sheet_names: &[String], requested: &str) -> Option<String> {
    if let Some(name) = sheet_names.iter().find(|s| s.as_str() == requested) {
        return Some(name.clone());
    }
    sheet_names
        .iter()
        .find(|s| s.trim() == requested.trim())
        .cloned()
}

fn get_range(path: &str, source: &PoolSource) -> BConvocaResult<calamine::Range<DataType>> {
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;
    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    debug!(
        "get_range: path: {:?} worksheets: {:?} requested: {:?}",
        path, sheet_names, source.worksheet_name
    );

    let worksheet_name = match &source.worksheet_name {
        // A worksheet name was provided, use it.
        Some(requested) => find_worksheet_name(&sheet_names, requested).context(
            MissingWorksheetSnafu {
                worksheet: requested.clone(),
                path,
            },
        )?,
        None => match sheet_names.as_slice() {
            [single] => single.clone(),
            _ => {
                return Err(Box::new(ConvocaError::MissingWorksheet {
                    worksheet: "(no worksheetName and more than one worksheet)".to_string(),
                    path: path.to_string(),
                }));
            }
        },
    };

    let wrange = workbook
        .worksheet_range(&worksheet_name)
        .context(MissingWorksheetSnafu {
            worksheet: worksheet_name.clone(),
            path,
        })?
        .context(OpeningExcelSnafu { path })?;
    Ok(wrange)
}

pub fn read_excel_pool(path: &str, source: &PoolSource) -> BConvocaResult<Vec<ParsedRow>> {
    let wrange = get_range(path, source)?;

    // The range starts at the first non-empty cell, not at the top of the sheet.
    let start_row = wrange.start().map(|(row, _)| row as usize).unwrap_or(0);
    debug!("read_excel_pool: {:?}: first row {}", path, start_row + 1);

    let lines: Vec<(usize, Vec<DataType>)> = wrange
        .rows()
        .enumerate()
        .map(|(idx, row)| (start_row + idx + 1, row.to_vec()))
        .collect();
    parse_table(lines, source, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_as_text() {
        assert_eq!(
            DataType::String(" Ana ".to_string()).text(1).unwrap(),
            " Ana "
        );
        assert_eq!(DataType::Empty.text(1).unwrap(), "");
        assert_eq!(DataType::Float(12.0).text(1).unwrap(), "12");
        assert_eq!(DataType::Float(1.5).text(1).unwrap(), "1.5");
        assert_eq!(DataType::Int(7).text(1).unwrap(), "7");
        let err = DataType::Error(calamine::CellErrorType::NA)
            .text(3)
            .unwrap_err();
        assert!(matches!(
            *err,
            ConvocaError::ExcelWrongCellType { lineno: 3, .. }
        ));
    }

    #[test]
    fn worksheet_lookup() {
        let names: Vec<String> = vec![
            "SUPERIOR - AMPLA".to_string(),
            " TECNICO - NEGROS".to_string(),
            "TECNICO - NEGROS ".to_string(),
        ];
        assert_eq!(
            find_worksheet_name(&names, "SUPERIOR - AMPLA"),
            Some("SUPERIOR - AMPLA".to_string())
        );
        // Exact match first.
        assert_eq!(
            find_worksheet_name(&names, "TECNICO - NEGROS "),
            Some("TECNICO - NEGROS ".to_string())
        );
        assert_eq!(
            find_worksheet_name(&names, "TECNICO - NEGROS"),
            Some(" TECNICO - NEGROS".to_string())
        );
        assert_eq!(find_worksheet_name(&names, "TECNICO - PCD"), None);
    }

    fn workbook_path() -> String {
        [env!("CARGO_MANIFEST_DIR"), "tests", "data", "workbook", "classificacao.xlsx"]
            .iter()
            .collect::<std::path::PathBuf>()
            .display()
            .to_string()
    }

    fn read_sheet(worksheet: &str) -> Vec<(usize, String, String)> {
        let path = workbook_path();
        let source = PoolSource::xlsx(&path, worksheet);
        read_excel_pool(&path, &source)
            .unwrap()
            .into_iter()
            .map(|r| (r.lineno, r.program, r.name))
            .collect()
    }

    fn row(lineno: usize, program: &str, name: &str) -> (usize, String, String) {
        (lineno, program.to_string(), name.to_string())
    }

    #[test]
    fn header_below_title_rows() {
        assert_eq!(
            read_sheet("SUPERIOR - AMPLA"),
            vec![
                row(5, "DIREITO", "Ana Lima"),
                row(6, "DIREITO", "Bruno Dias"),
                row(7, "DIREITO", "Carla Nunes"),
                row(8, "DIREITO", "Diego Reis"),
                row(9, "ENFERMAGEM", "Davi Costa"),
            ]
        );
    }

    #[test]
    fn sheet_starting_at_header_row() {
        // Rows 1 to 3 are empty, the used range starts at row 4.
        assert_eq!(
            read_sheet("SUPERIOR - NEGROS"),
            vec![
                row(5, "DIREITO", "Carla Nunes"),
                row(6, "DIREITO", "Elisa Prado"),
            ]
        );
    }

    #[test]
    fn padded_sheet_name_and_cells() {
        // The sheet is named " TECNICO - NEGROS". Row 6 is blank and row 7
        // has no name.
        assert_eq!(
            read_sheet("TECNICO - NEGROS"),
            vec![row(5, "INFORMÁTICA", "Igor Santos")]
        );
    }

    #[test]
    fn header_only_sheet() {
        assert!(read_sheet("TECNICO - PCD").is_empty());
    }

    #[test]
    fn unknown_worksheet() {
        let path = workbook_path();
        let source = PoolSource::xlsx(&path, "MEDIO - AMPLA");
        let err = read_excel_pool(&path, &source).unwrap_err();
        assert!(matches!(*err, ConvocaError::MissingWorksheet { .. }));
    }

    #[test]
    fn missing_workbook() {
        let source = PoolSource::xlsx("/nonexistent/classificacao.xlsx", "SUPERIOR - AMPLA");
        let err = read_excel_pool("/nonexistent/classificacao.xlsx", &source).unwrap_err();
        assert!(matches!(*err, ConvocaError::OpeningExcel { .. }));
    }
}
