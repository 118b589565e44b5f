// Rendering of the convocation list and of its statistics.

use convocation_list::stats::{fingerprint, ConvocationStats};
use serde::Serialize;
use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;

use crate::convoca::*;

const UTF8_BOM: &str = "\u{feff}";

#[derive(Serialize)]
struct CsvRecord<'a> {
    position: u32,
    category: &'static str,
    candidate: &'a str,
    program: &'a str,
    level: &'a str,
}

/// The list in CSV format, starting with a byte order mark so that
/// spreadsheet programs read it as UTF-8.
pub fn to_csv_string(entries: &[ConvocationEntry]) -> BConvocaResult<String> {
    let mut buf: Vec<u8> = UTF8_BOM.as_bytes().to_vec();
    {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(&mut buf);
        // Written by hand so that an empty list still has its header.
        wtr.write_record(&["CLASSIFICAÇÃO", "TIPO", "CANDIDATO", "CURSO", "NÍVEL"])
            .context(CsvWriteSnafu {})?;
        for e in entries.iter() {
            wtr.serialize(CsvRecord {
                position: e.position,
                category: e.category.label(),
                candidate: &e.candidate,
                program: &e.program,
                level: &e.level,
            })
            .context(CsvWriteSnafu {})?;
        }
        wtr.flush().context(WritingOutputSnafu { path: "csv buffer" })?;
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn entry_to_json(e: &ConvocationEntry) -> JSValue {
    json!({
        "position": e.position,
        "category": e.category.label(),
        "candidate": e.candidate,
        "program": e.program,
        "level": e.level,
    })
}

fn stats_to_json(stats: &ConvocationStats) -> JSValue {
    let mut by_level: JSMap<String, JSValue> = JSMap::new();
    for (level, count) in stats.by_level.iter() {
        let mut by_category: JSMap<String, JSValue> = JSMap::new();
        for (l, category, c) in stats.by_level_category.iter() {
            if l == level {
                by_category.insert(category.label().to_string(), json!(c));
            }
        }
        by_level.insert(
            level.clone(),
            json!({"total": count, "byCategory": by_category}),
        );
    }
    let mut by_category: JSMap<String, JSValue> = JSMap::new();
    for (category, count) in stats.by_category.iter() {
        by_category.insert(category.label().to_string(), json!(count));
    }
    let top_programs: Vec<JSValue> = stats
        .top_programs
        .iter()
        .map(|(p, c)| json!({"program": p, "count": c}))
        .collect();
    json!({
        "total": stats.total,
        "byLevel": by_level,
        "byCategory": by_category,
        "topPrograms": top_programs,
    })
}

fn report_to_json(r: &CourseReport) -> JSValue {
    json!({
        "level": r.level,
        "program": r.program,
        "candidates": r.universe,
        "convoked": r.emitted,
        "underFilled": r.is_under_filled(),
    })
}

pub fn build_summary_js(
    config: &ConvocaConfig,
    outcome: &ConvocationOutcome,
    stats: &ConvocationStats,
) -> JSValue {
    let levels: Vec<&str> = config.levels.iter().map(|l| l.level.as_str()).collect();
    let courses: Vec<JSValue> = outcome.reports.iter().map(report_to_json).collect();
    let entries: Vec<JSValue> = outcome.entries.iter().map(entry_to_json).collect();
    json!({
        "config": {
            "listName": config.output_settings.list_name,
            "levels": levels,
        },
        "fingerprint": fingerprint(&outcome.entries),
        "stats": stats_to_json(stats),
        "courses": courses,
        "entries": entries,
    })
}

pub fn log_stats(stats: &ConvocationStats) {
    info!("{}", "=".repeat(70));
    info!("Total convocations: {}", stats.total);
    info!("By level:");
    for (level, count) in stats.by_level.iter() {
        info!("  {:<30} {:>6}", level, count);
    }
    info!("By category:");
    for (category, count) in stats.by_category.iter() {
        info!("  {:<30} {:>6}", category.label(), count);
    }
    info!("By level and category:");
    for (level, category, count) in stats.by_level_category.iter() {
        info!("  {:<22} {:<7} {:>6}", level, category.label(), count);
    }
    info!("By program (top {}):", stats.top_programs.len());
    for (program, count) in stats.top_programs.iter() {
        info!("  {:<30} {:>6}", program, count);
    }
    info!("{}", "=".repeat(70));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<ConvocationEntry> {
        let pools = CoursePools {
            geral: vec!["Ana Souza".to_string(), "Souza, Bruno".to_string()],
            negro: vec![],
            pcd: vec!["Carla Dias".to_string()],
        };
        allocate_course(&pools, "DIREITO", "ENSINO SUPERIOR")
    }

    #[test]
    fn csv_layout() {
        let text = to_csv_string(&sample()).unwrap();
        assert_eq!(
            text,
            "\u{feff}CLASSIFICAÇÃO,TIPO,CANDIDATO,CURSO,NÍVEL\n\
             1,PCD,Carla Dias,DIREITO,ENSINO SUPERIOR\n\
             2,GERAL,Ana Souza,DIREITO,ENSINO SUPERIOR\n\
             3,GERAL,\"Souza, Bruno\",DIREITO,ENSINO SUPERIOR\n"
        );
    }

    #[test]
    fn empty_list_keeps_header() {
        let text = to_csv_string(&[]).unwrap();
        assert_eq!(text, "\u{feff}CLASSIFICAÇÃO,TIPO,CANDIDATO,CURSO,NÍVEL\n");
    }

    #[test]
    fn summary_json() {
        let entries = sample();
        let outcome = ConvocationOutcome {
            entries: entries.clone(),
            reports: vec![CourseReport {
                program: "DIREITO".to_string(),
                level: "ENSINO SUPERIOR".to_string(),
                universe: 3,
                emitted: 3,
            }],
        };
        let stats = ConvocationStats::from_entries(&entries, 10);
        let config = ConvocaConfig::default_for_workbook("x.xlsx");
        let js = build_summary_js(&config, &outcome, &stats);
        assert_eq!(js["stats"]["total"], json!(3));
        assert_eq!(js["stats"]["byCategory"]["GERAL"], json!(2));
        assert_eq!(js["stats"]["byLevel"]["ENSINO SUPERIOR"]["byCategory"]["PCD"], json!(1));
        assert_eq!(js["courses"][0]["underFilled"], json!(false));
        assert_eq!(js["entries"][0]["candidate"], json!("Carla Dias"));
        assert_eq!(js["config"]["levels"][1], json!("NÍVEL TÉCNICO"));
        assert_eq!(js["fingerprint"], json!(fingerprint(&entries)));
    }
}
