use clap::Parser;

/// This is a tallying program for legislative roll-call votes.
#[derive(Parser, Debug, Clone, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file describing the inputs and outputs of the run.
    /// The command line options below override the values of this file.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (directory path, optional) A directory containing the reports expected for this input. If provided,
    /// legtally checks that the tabulated reports match the reference and writes nothing if they differ.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (directory path, default 'output') The directory in which both reports are written.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (directory or file path, default 'data') The directory containing the input tables for the csv input type,
    /// or the workbook for the xlsx input type.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (default csv) The type of the input: csv or xlsx.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (file path, optional) Overrides the location of the bills table.
    #[clap(long, value_parser)]
    pub bills: Option<String>,

    /// (file path, optional) Overrides the location of the legislators table.
    #[clap(long, value_parser)]
    pub legislators: Option<String>,

    /// (file path, optional) Overrides the location of the votes table.
    #[clap(long, value_parser)]
    pub votes: Option<String>,

    /// (file path, optional) Overrides the location of the vote results table.
    #[clap(long, value_parser)]
    pub vote_results: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard error.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
