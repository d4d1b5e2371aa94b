use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct Config {
    /// Path to the SQLite database file
    #[serde(default = "default_database")]
    pub database: String,
    /// Profile whose calendar is acted on when --user is not given
    #[serde(default = "default_profile")]
    pub profile: String,
}

fn default_database() -> String {
    "calelog.db".to_string()
}

fn default_profile() -> String {
    "default".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            profile: default_profile(),
        }
    }
}

impl Config {
    pub fn new() -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Toml::file("calelog.toml"))
            .merge(Env::prefixed("CALELOG_"))
            .extract()
    }
}
