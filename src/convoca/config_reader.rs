use crate::convoca::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

pub const DEFAULT_PROGRAM_COLUMN: &str = "CURSO";
pub const DEFAULT_NAME_COLUMN: &str = "NOME";
// The published classification workbooks have 3 title rows above the header.
pub const DEFAULT_XLSX_HEADER_ROW: usize = 4;
pub const DEFAULT_CSV_HEADER_ROW: usize = 1;
pub const DEFAULT_TOP_PROGRAMS: usize = 10;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "listName")]
    pub list_name: String,
    #[serde(rename = "outputFile")]
    pub output_file: Option<String>,
    #[serde(rename = "summaryFile")]
    pub summary_file: Option<String>,
    #[serde(rename = "topPrograms")]
    pub top_programs: Option<usize>,
}

impl OutputSettings {
    pub fn top_programs(&self) -> usize {
        self.top_programs.unwrap_or(DEFAULT_TOP_PROGRAMS)
    }
}

/// Where to find one ranked pool.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct PoolSource {
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "worksheetName")]
    pub worksheet_name: Option<String>,
    #[serde(rename = "headerRowIndex")]
    _header_row_index: Option<JSValue>,
    #[serde(rename = "programColumn")]
    pub program_column: Option<String>,
    #[serde(rename = "nameColumn")]
    pub name_column: Option<String>,
}

impl PoolSource {
    pub fn xlsx(file_path: &str, worksheet_name: &str) -> PoolSource {
        PoolSource {
            provider: "xlsx".to_string(),
            file_path: file_path.to_string(),
            worksheet_name: Some(worksheet_name.to_string()),
            _header_row_index: None,
            program_column: None,
            name_column: None,
        }
    }

    /// The 1-based index of the header row.
    pub fn header_row_index(&self) -> BConvocaResult<usize> {
        match &self._header_row_index {
            None if self.provider == "csv" => Ok(DEFAULT_CSV_HEADER_ROW),
            None => Ok(DEFAULT_XLSX_HEADER_ROW),
            x => {
                let idx = read_js_int(x)?;
                if idx == 0 {
                    return Err(Box::new(ConvocaError::ParsingJsonNumber {
                        content: "headerRowIndex starts at 1".to_string(),
                    }));
                }
                Ok(idx)
            }
        }
    }

    pub fn program_column(&self) -> &str {
        self.program_column
            .as_deref()
            .unwrap_or(DEFAULT_PROGRAM_COLUMN)
    }

    pub fn name_column(&self) -> &str {
        self.name_column.as_deref().unwrap_or(DEFAULT_NAME_COLUMN)
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct LevelSource {
    pub level: String,
    pub geral: PoolSource,
    pub negro: PoolSource,
    pub pcd: PoolSource,
}

impl LevelSource {
    pub fn sources(&self) -> [(Category, &PoolSource); 3] {
        [
            (Category::Geral, &self.geral),
            (Category::Negro, &self.negro),
            (Category::Pcd, &self.pcd),
        ]
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ConvocaConfig {
    #[serde(rename = "outputSettings")]
    pub output_settings: OutputSettings,
    pub levels: Vec<LevelSource>,
}

impl ConvocaConfig {
    /// The layout of the classification workbook of the internship selection:
    /// higher education first, then technical level.
    pub fn default_for_workbook(path: &str) -> ConvocaConfig {
        let level = |name: &str, prefix: &str| LevelSource {
            level: name.to_string(),
            geral: PoolSource::xlsx(path, &format!("{} - AMPLA", prefix)),
            negro: PoolSource::xlsx(path, &format!("{} - NEGROS", prefix)),
            pcd: PoolSource::xlsx(path, &format!("{} - PCD", prefix)),
        };
        ConvocaConfig {
            output_settings: OutputSettings {
                list_name: "Lista de Convocação".to_string(),
                output_file: None,
                summary_file: None,
                top_programs: None,
            },
            levels: vec![
                level("ENSINO SUPERIOR", "SUPERIOR"),
                level("NÍVEL TÉCNICO", "TECNICO"),
            ],
        }
    }

    /// Points every xlsx pool to the given workbook.
    pub fn with_workbook(self, path: &str) -> ConvocaConfig {
        let retarget = |s: PoolSource| -> PoolSource {
            if s.provider == "xlsx" {
                PoolSource {
                    file_path: path.to_string(),
                    ..s
                }
            } else {
                s
            }
        };
        ConvocaConfig {
            output_settings: self.output_settings,
            levels: self
                .levels
                .into_iter()
                .map(|l| LevelSource {
                    level: l.level,
                    geral: retarget(l.geral),
                    negro: retarget(l.negro),
                    pcd: retarget(l.pcd),
                })
                .collect(),
        }
    }
}

pub fn read_config(path: &str) -> BConvocaResult<ConvocaConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: ConvocaConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(config)
}

fn read_js_int(x: &Option<JSValue>) -> ConvocaResult<usize> {
    match x {
        Some(JSValue::Number(n)) => n.as_u64().map(|x| x as usize).context(ParsingJsonNumberSnafu {
            content: n.to_string(),
        }),
        Some(JSValue::String(s)) => s.trim().parse::<usize>().ok().context(ParsingJsonNumberSnafu {
            content: s.clone(),
        }),
        x => None.context(ParsingJsonNumberSnafu {
            content: format!("{:?}", x),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_config() {
        let js = r#"{
            "outputSettings": {"listName": "Lista", "outputFile": "lista.csv", "topPrograms": 5},
            "levels": [{
                "level": "ENSINO SUPERIOR",
                "geral": {"provider": "csv", "filePath": "geral.csv", "headerRowIndex": "4"},
                "negro": {"provider": "csv", "filePath": "negro.csv", "headerRowIndex": 2, "nameColumn": "CANDIDATO"},
                "pcd": {"provider": "xlsx", "filePath": "pcd.xlsx", "worksheetName": "PCD"}
            }]
        }"#;
        let config: ConvocaConfig = serde_json::from_str(js).unwrap();
        assert_eq!(config.output_settings.top_programs(), 5);
        assert_eq!(config.output_settings.summary_file, None);
        let level = &config.levels[0];
        assert_eq!(level.geral.header_row_index().unwrap(), 4);
        assert_eq!(level.negro.header_row_index().unwrap(), 2);
        assert_eq!(level.negro.name_column(), "CANDIDATO");
        assert_eq!(level.negro.program_column(), "CURSO");
        assert_eq!(level.pcd.header_row_index().unwrap(), DEFAULT_XLSX_HEADER_ROW);
        let categories: Vec<Category> = level.sources().iter().map(|(c, _)| *c).collect();
        assert_eq!(categories, Category::ALL.to_vec());
    }

    #[test]
    fn bad_header_row() {
        let zero: PoolSource =
            serde_json::from_str(r#"{"provider": "csv", "filePath": "x.csv", "headerRowIndex": 0}"#)
                .unwrap();
        assert!(zero.header_row_index().is_err());
        let text: PoolSource =
            serde_json::from_str(r#"{"provider": "csv", "filePath": "x.csv", "headerRowIndex": "first"}"#)
                .unwrap();
        assert!(text.header_row_index().is_err());
        let csv_default: PoolSource =
            serde_json::from_str(r#"{"provider": "csv", "filePath": "x.csv"}"#).unwrap();
        assert_eq!(csv_default.header_row_index().unwrap(), 1);
    }

    #[test]
    fn default_workbook_layout() {
        let config = ConvocaConfig::default_for_workbook("classificacao.xlsx");
        let levels: Vec<&str> = config.levels.iter().map(|l| l.level.as_str()).collect();
        assert_eq!(levels, vec!["ENSINO SUPERIOR", "NÍVEL TÉCNICO"]);
        let tecnico = &config.levels[1];
        assert_eq!(
            tecnico.negro.worksheet_name.as_deref(),
            Some("TECNICO - NEGROS")
        );
        assert_eq!(tecnico.pcd.file_path, "classificacao.xlsx");
        assert_eq!(tecnico.geral.header_row_index().unwrap(), 4);
    }

    #[test]
    fn workbook_override_keeps_csv_sources() {
        let js = r#"{
            "outputSettings": {"listName": "Lista"},
            "levels": [{
                "level": "L",
                "geral": {"provider": "xlsx", "filePath": "a.xlsx", "worksheetName": "G"},
                "negro": {"provider": "csv", "filePath": "negro.csv"},
                "pcd": {"provider": "xlsx", "filePath": "a.xlsx", "worksheetName": "P"}
            }]
        }"#;
        let config: ConvocaConfig = serde_json::from_str(js).unwrap();
        let config = config.with_workbook("/tmp/b.xlsx");
        let level = &config.levels[0];
        assert_eq!(level.geral.file_path, "/tmp/b.xlsx");
        assert_eq!(level.negro.file_path, "negro.csv");
        assert_eq!(level.pcd.file_path, "/tmp/b.xlsx");
        assert_eq!(level.pcd.worksheet_name.as_deref(), Some("P"));
    }
}
