pub mod config_reader;
pub mod export;
pub mod io_common;
pub mod io_csv;
pub mod io_excel;

use log::{debug, info, warn};

use convocation_list::builder::Builder;
use convocation_list::stats::ConvocationStats;
use convocation_list::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};

use text_diff::print_diff;

use crate::args::Args;
use crate::convoca::config_reader::*;
use crate::convoca::io_common::ParsedRow;

#[derive(Debug, Snafu)]
pub enum ConvocaError {
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("Cannot find worksheet {worksheet:?} in {path}"))]
    MissingWorksheet { worksheet: String, path: String },
    #[snafu(display("No header found at row {row} of {path}"))]
    MissingHeader { row: usize, path: String },
    #[snafu(display("Cannot find column {column:?} in the header of {path}"))]
    MissingColumn { column: String, path: String },
    #[snafu(display("Cannot read the cell at line {lineno} as text: {content}"))]
    ExcelWrongCellType { lineno: u64, content: String },
    #[snafu(display("Error opening file {path}"))]
    OpeningFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error reading a line of {path}"))]
    CsvLineParse { source: csv::Error, path: String },
    #[snafu(display("Error writing the list in CSV format"))]
    CsvWrite { source: csv::Error },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Could not understand the number {content}"))]
    ParsingJsonNumber { content: String },
    #[snafu(display("Invalid candidate row in level {level:?}"))]
    InvalidPool {
        source: convocation_list::PoolErrors,
        level: String,
    },
    #[snafu(display("Unknown provider {provider:?}"))]
    UnknownProvider { provider: String },
    #[snafu(display("Error writing {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("The configuration does not describe any level"))]
    NoLevels {},
    #[snafu(display("Nothing to process: provide --config or --input"))]
    MissingInput {},
    #[snafu(display("Missing parent directory"))]
    MissingParentDir {},
    #[snafu(display("Difference detected between the generated list and the reference {path}"))]
    ReferenceMismatch { path: String },
}

pub type ConvocaResult<T> = Result<T, ConvocaError>;
pub type BConvocaResult<T> = Result<T, Box<ConvocaError>>;

/// The combined list and, for each program, how much of its candidates made it
/// into the list.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ConvocationOutcome {
    pub entries: Vec<ConvocationEntry>,
    pub reports: Vec<CourseReport>,
}

fn read_pool(root: &Path, source: &PoolSource) -> BConvocaResult<Vec<ParsedRow>> {
    let p: PathBuf = root.join(&source.file_path);
    let p2 = p.as_path().display().to_string();
    info!(
        "Attempting to read pool file {:?} (worksheet {:?})",
        p2, source.worksheet_name
    );
    match source.provider.as_str() {
        "xlsx" => io_excel::read_excel_pool(&p2, source),
        "csv" => io_csv::read_csv_pool(&p2, source),
        x => Err(Box::new(ConvocaError::UnknownProvider {
            provider: x.to_string(),
        })),
    }
}

fn load_level(root: &Path, level_source: &LevelSource) -> BConvocaResult<LevelPools> {
    info!("Loading pools of {}...", level_source.level);
    let mut builder = Builder::new(&level_source.level);
    for (category, source) in level_source.sources() {
        let rows = read_pool(root, source)?;
        info!("  [OK] {}: {} candidates", category, rows.len());
        for row in rows.iter() {
            debug!(
                "load_level: {} line {}: {:?} / {:?}",
                category, row.lineno, row.program, row.name
            );
        }
        builder
            .add_rows(
                category,
                rows.iter().map(|r| (r.program.as_str(), r.name.as_str())),
            )
            .context(InvalidPoolSnafu {
                level: level_source.level.clone(),
            })?;
    }
    Ok(builder.build())
}

/// Loads every level described by the configuration, then builds the
/// combined list.
pub fn run_convocation(config: &ConvocaConfig, root: &Path) -> BConvocaResult<ConvocationOutcome> {
    if config.levels.is_empty() {
        return Err(Box::new(ConvocaError::NoLevels {}));
    }

    let mut level_lists: Vec<Vec<ConvocationEntry>> = Vec::new();
    let mut reports: Vec<CourseReport> = Vec::new();
    for level_source in config.levels.iter() {
        let pools = load_level(root, level_source)?;
        let (entries, mut level_reports) = aggregate_level_with_reports(&pools);
        info!("  [OK] {}: {} convocations", pools.level, entries.len());
        level_lists.push(entries);
        reports.append(&mut level_reports);
    }

    let entries = combine_levels(&level_lists);
    info!("[OK] Total: {} convocations", entries.len());
    Ok(ConvocationOutcome { entries, reports })
}

fn normalize_csv_text(s: &str) -> String {
    s.trim_start_matches('\u{feff}').replace("\r\n", "\n")
}

/// Compares a generated list with a reference list in CSV format. Byte order
/// marks and line endings are not significant.
pub fn check_reference(generated_csv: &str, reference_path: &str) -> BConvocaResult<()> {
    let reference = fs::read_to_string(reference_path).context(OpeningFileSnafu {
        path: reference_path,
    })?;
    let reference = normalize_csv_text(&reference);
    let generated = normalize_csv_text(generated_csv);
    if reference != generated {
        warn!("Found differences with the reference list");
        print_diff(reference.as_str(), generated.as_str(), "\n");
        return Err(Box::new(ConvocaError::ReferenceMismatch {
            path: reference_path.to_string(),
        }));
    }
    info!("The list matches the reference {:?}", reference_path);
    Ok(())
}

fn write_output(dest: &str, contents: &str) -> BConvocaResult<()> {
    if dest == "stdout" {
        print!("{}", contents);
        return Ok(());
    }
    info!("Writing {:?}", dest);
    fs::write(dest, contents).context(WritingOutputSnafu { path: dest })?;
    Ok(())
}

fn resolve_output(root: &Path, cli: &Option<String>, configured: &Option<String>) -> Option<String> {
    match (cli, configured) {
        (Some(x), _) if x.is_empty() => None,
        (Some(x), _) => Some(x.clone()),
        (None, Some(x)) if x == "stdout" => Some(x.clone()),
        (None, Some(x)) => Some(root.join(x).display().to_string()),
        (None, None) => None,
    }
}

pub fn run(args: &Args) -> BConvocaResult<()> {
    let (mut config, root): (ConvocaConfig, PathBuf) = match (&args.config, &args.input) {
        (Some(config_path), _) => {
            let config = read_config(config_path)?;
            let root = Path::new(config_path.as_str())
                .parent()
                .context(MissingParentDirSnafu {})?
                .to_path_buf();
            (config, root)
        }
        (None, Some(input)) => (ConvocaConfig::default_for_workbook(input), PathBuf::new()),
        (None, None) => {
            return Err(Box::new(ConvocaError::MissingInput {}));
        }
    };
    if let (Some(_), Some(input)) = (&args.config, &args.input) {
        // The workbook given on the command line is relative to the current
        // directory, not to the configuration.
        let absolute = fs::canonicalize(input).context(OpeningFileSnafu { path: input })?;
        config = config.with_workbook(&absolute.display().to_string());
    }
    if let Some(n) = args.top_programs {
        config.output_settings.top_programs = Some(n);
    }
    debug!("config: {:?}", config);

    info!("{}", "=".repeat(70));
    info!(" {}", config.output_settings.list_name);
    info!("{}", "=".repeat(70));

    let outcome = run_convocation(&config, &root)?;

    let stats = ConvocationStats::from_entries(&outcome.entries, config.output_settings.top_programs());
    export::log_stats(&stats);

    let csv_text = export::to_csv_string(&outcome.entries)?;

    let out = resolve_output(&root, &args.out, &config.output_settings.output_file)
        .unwrap_or_else(|| "stdout".to_string());
    write_output(&out, &csv_text)?;

    if let Some(summary_dest) =
        resolve_output(&root, &args.summary, &config.output_settings.summary_file)
    {
        let summary_js = export::build_summary_js(&config, &outcome, &stats);
        let pretty = serde_json::to_string_pretty(&summary_js).context(ParsingJsonSnafu {})?;
        write_output(&summary_dest, &format!("{}\n", pretty))?;
    }

    // The reference list, if provided for comparison
    if let Some(reference_path) = &args.reference {
        check_reference(&csv_text, reference_path)?;
    }

    Ok(())
}

#[cfg(test)]
pub fn test_wrapper(test_name: &str) -> ConvocationOutcome {
    let _ = env_logger::builder().is_test(true).try_init();
    let test_dir: PathBuf = [env!("CARGO_MANIFEST_DIR"), "tests", "data", test_name]
        .iter()
        .collect();
    info!("Running test {}", test_name);
    let config_path = test_dir.join("config.json");
    let config = match read_config(&config_path.display().to_string()) {
        Ok(c) => c,
        Err(e) => panic!("cannot read config of {}: {}", test_name, e),
    };
    let outcome = match run_convocation(&config, &test_dir) {
        Ok(x) => x,
        Err(e) => panic!("test {} failed: {}", test_name, e),
    };
    let csv_text = match export::to_csv_string(&outcome.entries) {
        Ok(x) => x,
        Err(e) => panic!("test {} failed: {}", test_name, e),
    };
    let expected_path = test_dir.join("expected.csv");
    if let Err(e) = check_reference(&csv_text, &expected_path.display().to_string()) {
        panic!("test {}: {}", test_name, e);
    }
    outcome
}
