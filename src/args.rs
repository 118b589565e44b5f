use clap::Parser;

/// Builds the convocation list of a selection process from the classification spreadsheets.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file describing the levels and where to find the GERAL, NEGRO and PCD
    /// pools of each level. See the manual of the convocation_list crate for the format.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path, optional) The classification workbook (xlsx). Without --config, the default layout
    /// (ENSINO SUPERIOR and NÍVEL TÉCNICO sheets) is used. With --config, it replaces the file of every
    /// xlsx pool.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (file path, 'stdout' or empty) Where to write the list in CSV format. Setting this option overrides
    /// the path that may be specified in the configuration. Defaults to stdout.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path, 'stdout' or empty) If specified, a JSON summary (statistics, programs that could not be
    /// fully listed, full list) is written to the given location.
    #[clap(short, long, value_parser)]
    pub summary: Option<String>,

    /// (file path) A reference list in CSV format. If provided, convoca will check that the generated list
    /// matches it and fail otherwise.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (default 10) Number of programs shown in the statistics.
    #[clap(long, value_parser)]
    pub top_programs: Option<usize>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
