use clap::{Parser, ValueEnum};
use lmpretype::engine::ordering::OrderingKind;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

const AFTER_HELP: &str = "\
By default types are sorted by atomic number (lowest Z -> highest Z).
With --ordering fixed-table each element receives the type ID from the fixed table.";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan, Ted Yu, William A. Goddard III, Victor Wai Tak Kam",
    version,
    about = "LMP-RETYPE - Reorder atom types in LAMMPS data files so each element gets a consistent type ID.",
    help_template = HELP_TEMPLATE,
    after_help = AFTER_HELP,
)]
pub struct Cli {
    /// Path to the input LAMMPS data file (e.g., input.lmp).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Path for the retyped output file. An existing file is overwritten.
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Strategy used to assign the new type IDs.
    #[arg(long, value_enum, value_name = "STRATEGY")]
    pub ordering: Option<OrderingArg>,

    /// CSV file with `element,type` rows for the fixed-table ordering.
    #[arg(long, value_name = "PATH")]
    pub type_table: Option<PathBuf>,

    /// TOML file replacing the built-in element table.
    #[arg(long, value_name = "PATH")]
    pub elements: Option<PathBuf>,

    /// Override the mass tolerance (amu) used to identify elements.
    #[arg(long, value_name = "FLOAT")]
    pub tolerance: Option<f64>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S atom-layout=compact
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,

    /// Do not warn about atom lines whose type is not declared in Masses.
    #[arg(long)]
    pub quiet_unmapped: bool,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderingArg {
    /// Sort types by ascending atomic number and renumber them 1..N.
    AtomicNumber,
    /// Look up each element's type in a fixed element-to-type table.
    FixedTable,
}

impl From<OrderingArg> for OrderingKind {
    fn from(arg: OrderingArg) -> Self {
        match arg {
            OrderingArg::AtomicNumber => OrderingKind::AtomicNumber,
            OrderingArg::FixedTable => OrderingKind::FixedTable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use clap::error::ErrorKind;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn two_positionals_are_enough() {
        let cli = Cli::try_parse_from(["lmp-retype", "in.lmp", "out.lmp"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("in.lmp"));
        assert_eq!(cli.output, PathBuf::from("out.lmp"));
        assert!(cli.ordering.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn wrong_positional_count_is_a_usage_error() {
        let too_few = Cli::try_parse_from(["lmp-retype", "in.lmp"]).unwrap_err();
        assert_eq!(too_few.kind(), ErrorKind::MissingRequiredArgument);

        let too_many = Cli::try_parse_from(["lmp-retype", "a", "b", "c"]).unwrap_err();
        assert_eq!(too_many.kind(), ErrorKind::UnknownArgument);
        assert_ne!(too_many.exit_code(), 0);
    }

    #[test]
    fn options_are_parsed() {
        let cli = Cli::try_parse_from([
            "lmp-retype",
            "in.lmp",
            "out.lmp",
            "--ordering",
            "fixed-table",
            "--type-table",
            "types.csv",
            "--tolerance",
            "0.25",
            "-S",
            "atom-layout=wide",
            "-S",
            "warn-unmapped=false",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.ordering, Some(OrderingArg::FixedTable));
        assert_eq!(cli.type_table, Some(PathBuf::from("types.csv")));
        assert_eq!(cli.tolerance, Some(0.25));
        assert_eq!(cli.set_values.len(), 2);
        assert_eq!(cli.verbose, 2);
        assert_eq!(
            OrderingKind::from(OrderingArg::FixedTable),
            OrderingKind::FixedTable
        );
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["lmp-retype", "a", "b", "-q", "-v"]);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::ArgumentConflict);
    }
}
