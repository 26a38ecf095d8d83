pub mod toml_config;

pub const DEFAULT_DATA_FILE: &str = "data/race_scores.json";
pub const DEFAULT_BASE_PATH: &str = ".";

#[cfg(feature = "cli")]
pub use cli_config::{CliConfig, Command};

#[cfg(feature = "cli")]
mod cli_config {
    use super::toml_config::TomlConfig;
    use super::{DEFAULT_BASE_PATH, DEFAULT_DATA_FILE};
    use crate::core::{ConfigProvider, Duration};
    use crate::utils::error::Result;
    use crate::utils::validation::{
        validate_file_extension, validate_log_level, validate_non_empty_string, validate_path,
        validate_required_field, Validate,
    };
    use clap::{Parser, Subcommand};

    #[derive(Debug, Clone, Parser)]
    #[command(name = "race-results")]
    #[command(about = "Record and query race participant times")]
    pub struct CliConfig {
        #[arg(long, help = "JSON file holding the race results [default: data/race_scores.json]")]
        pub data_file: Option<String>,

        #[arg(long, help = "Directory that relative paths are resolved against [default: .]")]
        pub base_path: Option<String>,

        #[arg(short, long, help = "TOML configuration file")]
        pub config: Option<String>,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit logs as JSON")]
        pub json_logs: bool,

        #[arg(long, help = "Log level for this crate (trace, debug, info, warn, error)")]
        pub log_level: Option<String>,

        #[command(subcommand)]
        pub command: Command,

        #[arg(skip)]
        pub export_path: Option<String>,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Show one participant's time in one sport
        Show { participant: String, sport: String },

        /// Show a participant's total time across all sports
        Total { participant: String },

        /// Record a new result and save it to the data file
        Add {
            participant: String,
            sport: String,
            /// e.g. "2m 30s", "2:30" or "150"
            time: Duration,
        },

        /// List every recorded result
        List,

        /// Results for one sport, fastest first
        Leaderboard { sport: String },

        /// Overall totals per participant, lowest first
        Standings,

        /// How far a participant finished behind another in one sport
        Gap {
            participant: String,
            reference: String,
            sport: String,
        },

        /// Write results as CSV
        Export {
            /// Destination .csv file (falls back to output.export_path in the config file)
            path: Option<String>,

            #[arg(long, help = "Export overall standings instead of individual results")]
            standings: bool,
        },
    }

    impl CliConfig {
        /// 命令列參數優先，未指定的值由 TOML 補上
        pub fn merge_toml(&mut self, toml: &TomlConfig) {
            if self.data_file.is_none() {
                self.data_file = toml.store.data_file.clone();
            }
            if self.base_path.is_none() {
                self.base_path = toml.store.base_path.clone();
            }
            if self.export_path.is_none() {
                self.export_path = toml.export_path().map(str::to_string);
            }
            if !self.verbose {
                self.verbose = toml.verbose_logging();
            }
            if !self.json_logs {
                self.json_logs = toml.json_logging();
            }
            if self.log_level.is_none() {
                self.log_level = toml.log_level().map(str::to_string);
            }
        }

        /// Destination for `export`: the argument, else the configured path.
        pub fn resolve_export_path(&self) -> Result<String> {
            let from_args = match &self.command {
                Command::Export { path, .. } => path.clone(),
                _ => None,
            };
            let path = from_args.or_else(|| self.export_path.clone());
            validate_required_field("output.export_path", &path).cloned()
        }
    }

    impl ConfigProvider for CliConfig {
        fn data_file(&self) -> &str {
            self.data_file.as_deref().unwrap_or(DEFAULT_DATA_FILE)
        }

        fn base_path(&self) -> &str {
            self.base_path.as_deref().unwrap_or(DEFAULT_BASE_PATH)
        }

        fn export_path(&self) -> Option<&str> {
            self.export_path.as_deref()
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_path("data_file", self.data_file())?;
            validate_file_extension("data_file", self.data_file(), &["json"])?;
            validate_path("base_path", self.base_path())?;
            if let Some(level) = &self.log_level {
                validate_log_level("log_level", level)?;
            }

            match &self.command {
                Command::Show { participant, sport }
                | Command::Add {
                    participant, sport, ..
                } => {
                    validate_non_empty_string("participant", participant)?;
                    validate_non_empty_string("sport", sport)?;
                }
                Command::Total { participant } => {
                    validate_non_empty_string("participant", participant)?;
                }
                Command::Leaderboard { sport } => {
                    validate_non_empty_string("sport", sport)?;
                }
                Command::Gap {
                    participant,
                    reference,
                    sport,
                } => {
                    validate_non_empty_string("participant", participant)?;
                    validate_non_empty_string("reference", reference)?;
                    validate_non_empty_string("sport", sport)?;
                }
                Command::Export { .. } => {
                    let path = self.resolve_export_path()?;
                    validate_path("export_path", &path)?;
                    validate_file_extension("export_path", &path, &["csv"])?;
                }
                Command::List | Command::Standings => {}
            }

            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::utils::error::RaceError;

        fn parse(args: &[&str]) -> CliConfig {
            CliConfig::try_parse_from(std::iter::once("race-results").chain(args.iter().copied()))
                .unwrap()
        }

        #[test]
        fn test_defaults() {
            let config = parse(&["list"]);
            assert_eq!(config.data_file(), DEFAULT_DATA_FILE);
            assert_eq!(config.base_path(), DEFAULT_BASE_PATH);
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_add_parses_time() {
            let config = parse(&["add", "participant3", "swim", "3m 0s"]);
            match config.command {
                Command::Add { time, .. } => assert_eq!(time, Duration::from_seconds(180)),
                other => panic!("unexpected command {:?}", other),
            }
        }

        #[test]
        fn test_add_rejects_bad_time() {
            let result = CliConfig::try_parse_from(["race-results", "add", "p", "swim", "2m 75s"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_validation_rejects_non_json_data_file() {
            let config = parse(&["--data-file", "scores.txt", "list"]);
            assert!(config.validate().is_err());
        }

        #[test]
        fn test_validation_rejects_blank_participant() {
            let config = parse(&["total", "  "]);
            assert!(config.validate().is_err());
        }

        #[test]
        fn test_export_path_resolution() {
            let mut config = parse(&["export"]);
            assert!(matches!(
                config.validate(),
                Err(RaceError::MissingConfigError { .. })
            ));

            config.export_path = Some("out/results.csv".to_string());
            assert_eq!(config.resolve_export_path().unwrap(), "out/results.csv");
            assert!(config.validate().is_ok());

            let config = parse(&["export", "results.json"]);
            assert!(config.validate().is_err());
        }

        #[test]
        fn test_cli_flags_override_toml() {
            let toml = TomlConfig::from_toml_str(
                r#"
[store]
data_file = "from-toml.json"
base_path = "/srv/race"

[output]
export_path = "standings.csv"

[logging]
level = "warn"
verbose = true
"#,
            )
            .unwrap();

            let mut config = parse(&["--data-file", "from-cli.json", "list"]);
            config.merge_toml(&toml);

            assert_eq!(config.data_file(), "from-cli.json");
            assert_eq!(config.base_path(), "/srv/race");
            assert_eq!(config.export_path(), Some("standings.csv"));
            assert!(config.verbose);
            assert!(!config.json_logs);
            assert_eq!(config.log_level.as_deref(), Some("warn"));

            let mut config = parse(&["--log-level", "error", "list"]);
            config.merge_toml(&toml);
            assert_eq!(config.log_level.as_deref(), Some("error"));
        }

        #[test]
        fn test_validation_rejects_unknown_log_level() {
            let config = parse(&["--log-level", "chatty", "list"]);
            assert!(config.validate().is_err());
        }
    }
}
