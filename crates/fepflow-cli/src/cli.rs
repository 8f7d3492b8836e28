use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "fepflow CLI - Inspect and validate run inputs for solvation free-energy perturbation calculations.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Run input in TOML format, merged over the bundled defaults.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a run-input option, overriding the config file.
    /// Can be used multiple times. Example: -S setup.watermodel=tip3p
    #[arg(short = 'S', long = "set", value_name = "SECTION.OPTION=VALUE", global = true)]
    pub set_values: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show or export the effective run input.
    Config(ConfigArgs),
    /// Show the FEP schedule of one decoupling stage.
    Schedule(ScheduleArgs),
    /// Print the free-energy engine parameters for one lambda window.
    Mdp(MdpArgs),
    /// Check the run input against the force-field registries and bundled topologies.
    Validate,
    /// List the registered water or solvent models.
    Models(ModelsArgs),
    /// List bundled topology files, or resolve one by name.
    Topfiles(TopfilesArgs),
    /// Convert a value between run-input and engine units.
    Units(UnitsArgs),
}

/// Arguments for the `config` subcommand.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective run input as TOML.
    Show {
        /// Only print this section.
        #[arg(value_name = "SECTION")]
        section: Option<String>,
    },
    /// Write the effective run input to a file.
    Write {
        #[arg(required = true, value_name = "PATH")]
        path: PathBuf,
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

/// Arguments for the `schedule` subcommand.
#[derive(Args, Debug)]
pub struct ScheduleArgs {
    /// Decoupling stage: 'coulomb' or 'vdw'.
    #[arg(required = true, value_name = "COMPONENT")]
    pub component: String,

    /// Also list the lambda window directories.
    #[arg(short, long)]
    pub windows: bool,
}

/// Arguments for the `mdp` subcommand.
#[derive(Args, Debug)]
pub struct MdpArgs {
    /// Decoupling stage: 'coulomb' or 'vdw'.
    #[arg(required = true, value_name = "COMPONENT")]
    pub component: String,

    /// Zero-based index of the lambda window.
    #[arg(short, long, required = true, value_name = "INT")]
    pub window: usize,

    /// Molecule type to decouple, as named in the system topology.
    #[arg(short, long, default_value = "SOLUTE", value_name = "NAME")]
    pub moltype: String,
}

/// Arguments for the `models` subcommand.
#[derive(Args, Debug)]
pub struct ModelsArgs {
    #[command(subcommand)]
    pub command: ModelsCommands,
}

#[derive(Subcommand, Debug)]
pub enum ModelsCommands {
    /// List the water models.
    Water,
    /// List the organic solvent models of a force field.
    Solvents {
        /// Force field name; defaults to the run input's `setup.forcefield`.
        #[arg(short, long, value_name = "NAME")]
        forcefield: Option<String>,
    },
}

/// Arguments for the `topfiles` subcommand.
#[derive(Args, Debug)]
pub struct TopfilesArgs {
    /// File name to resolve, e.g. 'ffoplsaa.itp' or 'oplsaa.ff/tip4p.itp'.
    #[arg(value_name = "NAME")]
    pub name: Option<String>,
}

/// Arguments for the `units` subcommand.
#[derive(Args, Debug)]
pub struct UnitsArgs {
    #[arg(value_enum, required = true)]
    pub conversion: Conversion,

    #[arg(required = true, allow_negative_numbers = true, value_name = "VALUE")]
    pub value: f64,

    /// Temperature in K, used by 'kbt-to-kj'.
    #[arg(short, long, default_value_t = 300.0, value_name = "KELVIN")]
    pub temperature: f64,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// Molar concentration to molecules per nm³.
    MolarToNm3,
    /// Pressure in bar to kJ/mol/nm³.
    BarToKjmolnm3,
    /// kcal/mol to kJ/mol.
    KcalToKj,
    /// kJ/mol to kcal/mol.
    KjToKcal,
    /// Thermal energies (kT) to kJ/mol.
    KbtToKj,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_options_are_accepted_after_the_subcommand() {
        let cli = Cli::try_parse_from([
            "fepflow",
            "validate",
            "-vv",
            "-c",
            "run.toml",
            "-S",
            "setup.watermodel=tip3p",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("run.toml")));
        assert_eq!(cli.set_values, vec!["setup.watermodel=tip3p".to_string()]);
        assert!(matches!(cli.command, Commands::Validate));
    }

    #[test]
    fn metadata_comes_from_the_package() {
        let command = Cli::command();
        assert_eq!(command.get_author(), Some(env!("CARGO_PKG_AUTHORS")));
        assert_eq!(command.get_version(), Some(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["fepflow", "-q", "-v", "validate"]).is_err());
    }

    #[test]
    fn mdp_requires_a_window() {
        assert!(Cli::try_parse_from(["fepflow", "mdp", "vdw"]).is_err());
        let cli = Cli::try_parse_from(["fepflow", "mdp", "vdw", "--window", "3"]).unwrap();
        match cli.command {
            Commands::Mdp(args) => {
                assert_eq!(args.window, 3);
                assert_eq!(args.moltype, "SOLUTE");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn units_parses_conversion_names() {
        let cli = Cli::try_parse_from(["fepflow", "units", "kbt-to-kj", "2", "-t", "298.15"]).unwrap();
        match cli.command {
            Commands::Units(args) => {
                assert_eq!(args.conversion, Conversion::KbtToKj);
                assert_eq!(args.value, 2.0);
                assert_eq!(args.temperature, 298.15);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
