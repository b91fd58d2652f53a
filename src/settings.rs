use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::{
    algorithms::aco::ColonyParameters,
    error::{Error, Result},
};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct GenerateSettings {
    pub num_points: usize,
    pub num_clusters: usize,
    // Standard deviation around the cluster centre
    pub spread: f64,
    // Centres are placed uniformly in [0, width) x [0, width)
    pub width: f64,
}

impl Default for GenerateSettings {
    fn default() -> Self {
        GenerateSettings {
            num_points: 52,
            num_clusters: 5,
            spread: 50.0,
            width: 1000.0,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Settings {
    // `.tsp`, `.txt` or `.dat`. A random instance is generated when unset
    pub input: Option<String>,
    pub results_folder: String,
    pub seed: Option<u64>,
    pub log_level: String,
    pub log_timestamps: bool,
    pub nearest_neighbour: bool,
    pub nn_start: Option<usize>,
    pub ant_colony: bool,
    pub colony: ColonyParameters,
    pub generate: GenerateSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            input: None,
            results_folder: "results".to_string(),
            seed: None,
            log_level: "info".to_string(),
            log_timestamps: false,
            nearest_neighbour: true,
            nn_start: None,
            ant_colony: true,
            colony: ColonyParameters::default(),
            generate: GenerateSettings::default(),
        }
    }
}

impl Settings {
    /**
     * Reads the optional `name` config file, then `APP_*` environment variables on top.
     * Nested keys use a double underscore, e.g. `APP_COLONY__NUM_ANTS=50`.
     */
    pub fn load(name: &str) -> Result<Settings> {
        let mut settings = config::Config::default();
        settings
            .merge(config::File::with_name(name).required(false))?
            .merge(config::Environment::with_prefix("APP").separator("__"))?;

        let settings: Settings = settings.try_into()?;
        settings.colony.validate()?;

        Ok(settings)
    }

    pub fn log_level(&self) -> Result<LevelFilter> {
        self.log_level
            .parse()
            .map_err(|_| Error::invalid_parameter(format!("unknown log level {}", self.log_level)))
    }
}

// ----- Unit tests ---- //
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults_without_file() {
        let settings = Settings::load("this-config-file-does-not-exist").unwrap();

        assert_eq!(settings.results_folder, "results");
        assert_eq!(settings.colony, ColonyParameters::default());
        assert_eq!(settings.log_level().unwrap(), LevelFilter::Info);
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Run.toml");

        fs::write(
            &path,
            r#"
input = "txt/berlin52.tsp"
seed = 7
log_level = "debug"
ant_colony = false

[colony]
num_ants = 12
evaporation_rate = 0.25
"#,
        )
        .unwrap();

        let settings = Settings::load(path.to_str().unwrap()).unwrap();

        assert_eq!(settings.input.as_deref(), Some("txt/berlin52.tsp"));
        assert_eq!(settings.seed, Some(7));
        assert!(!settings.ant_colony);
        assert_eq!(settings.colony.num_ants, 12);
        assert_eq!(settings.colony.evaporation_rate, 0.25);
        assert_eq!(settings.colony.alpha, ColonyParameters::default().alpha);
        assert_eq!(settings.log_level().unwrap(), LevelFilter::Debug);
    }

    #[test]
    fn test_invalid_colony_parameters() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Bad.toml");

        fs::write(&path, "[colony]\nevaporation_rate = 2.0\n").unwrap();

        let result = Settings::load(path.to_str().unwrap());
        assert!(matches!(result, Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn test_unknown_log_level() {
        let settings = Settings {
            log_level: "loud".to_string(),
            ..Settings::default()
        };

        assert!(settings.log_level().is_err());
    }
}
