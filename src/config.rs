use std::path::PathBuf;

use rocket::{
    fairing::{Fairing, Info, Kind},
    Build, Rocket,
};
use serde::Deserialize;

use crate::model::{notify::Notifier, raffle::EligibilityRule, store::Store};

/// Application configuration, derived from `Rocket.toml` and `ROCKET_*`
/// environment variables. One deployment serves one campaign; everything the
/// old per-campaign handler copies hard-coded lives here as data instead.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Directory holding the survey and dashboard pages.
    #[serde(default = "default_pages_dir")]
    pages_dir: PathBuf,
    /// Backing file for the response store. Unset means in-memory only,
    /// which loses responses and raffle numbering on restart.
    #[serde(default)]
    store_path: Option<PathBuf>,
    /// First raffle number a fresh store hands out.
    #[serde(default = "default_raffle_start")]
    raffle_start: u32,
    /// The campaign's raffle eligibility rule.
    #[serde(default = "default_eligibility")]
    eligibility: EligibilityRule,
    /// Lowercase substrings that qualify a city for the `city` rule.
    #[serde(default = "default_city_patterns")]
    city_patterns: Vec<String>,
    /// Form-relay endpoint for outbound email. Unset means log-only.
    #[serde(default)]
    notify_url: Option<String>,
    /// Who receives the new-lead summaries.
    #[serde(default = "default_operator_email")]
    operator_email: String,
}

fn default_pages_dir() -> PathBuf {
    PathBuf::from("static")
}

fn default_raffle_start() -> u32 {
    1
}

fn default_eligibility() -> EligibilityRule {
    EligibilityRule::City
}

fn default_city_patterns() -> Vec<String> {
    vec!["coruña".to_string(), "coruna".to_string()]
}

fn default_operator_email() -> String {
    "eva@galiadigital.es".to_string()
}

impl Config {
    pub fn pages_dir(&self) -> &PathBuf {
        &self.pages_dir
    }

    pub fn store_path(&self) -> Option<&PathBuf> {
        self.store_path.as_ref()
    }

    pub fn raffle_start(&self) -> u32 {
        self.raffle_start
    }

    pub fn eligibility(&self) -> EligibilityRule {
        self.eligibility
    }

    pub fn city_patterns(&self) -> &[String] {
        &self.city_patterns
    }

    pub fn notify_url(&self) -> Option<&str> {
        self.notify_url.as_deref()
    }

    pub fn operator_email(&self) -> &str {
        &self.operator_email
    }
}

/// A fairing that loads the application config and puts it in managed state.
pub struct ConfigFairing;

#[rocket::async_trait]
impl Fairing for ConfigFairing {
    fn info(&self) -> Info {
        Info {
            name: "Config",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, rocket: Rocket<Build>) -> rocket::fairing::Result {
        let config = match rocket.figment().extract::<Config>() {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load application config");
                rocket::config::pretty_print_error(e);
                return Err(rocket);
            }
        };
        info!(
            "Campaign config: eligibility {:?}, raffle numbering from {}",
            config.eligibility, config.raffle_start
        );
        Ok(rocket.manage(config))
    }
}

/// A fairing that opens the response store (loading the backing file when
/// one is configured) and puts it in managed state. Runs after
/// `ConfigFairing`; a store file that exists but cannot be parsed aborts
/// launch rather than silently starting empty and renumbering the raffle.
pub struct StoreFairing;

#[rocket::async_trait]
impl Fairing for StoreFairing {
    fn info(&self) -> Info {
        Info {
            name: "Response store",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, rocket: Rocket<Build>) -> rocket::fairing::Result {
        let (path, raffle_start) = match rocket.state::<Config>() {
            Some(config) => (config.store_path().cloned(), config.raffle_start()),
            None => {
                error!("Store fairing requires the config fairing to run first");
                return Err(rocket);
            }
        };
        match Store::open(path, raffle_start) {
            Ok(store) => Ok(rocket.manage(store)),
            Err(e) => {
                error!("Failed to open response store: {e}");
                Err(rocket)
            }
        }
    }
}

/// A fairing that builds the outbound notifier from the config and puts it
/// in managed state.
pub struct NotifierFairing;

#[rocket::async_trait]
impl Fairing for NotifierFairing {
    fn info(&self) -> Info {
        Info {
            name: "Notifier",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, rocket: Rocket<Build>) -> rocket::fairing::Result {
        let (notify_url, operator_email) = match rocket.state::<Config>() {
            Some(config) => (
                config.notify_url().map(str::to_string),
                config.operator_email().to_string(),
            ),
            None => {
                error!("Notifier fairing requires the config fairing to run first");
                return Err(rocket);
            }
        };
        match &notify_url {
            Some(url) => info!("Notifications relayed through {url}"),
            None => info!("No notify_url configured, notifications are log-only"),
        }
        Ok(rocket.manage(Notifier::new(notify_url, operator_email)))
    }
}
