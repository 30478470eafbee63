#[macro_use]
extern crate rocket;

#[macro_use]
extern crate log;

use rocket::{figment::Figment, Build, Rocket};

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;

use config::{ConfigFairing, NotifierFairing, StoreFairing};
use logging::LoggerFairing;

/// Build the server from the default figment (`Rocket.toml` + `ROCKET_*`).
pub fn build() -> Rocket<Build> {
    assemble(rocket::build())
}

/// Build the server from an explicit figment. Used by tests to point each
/// client at its own store.
pub fn custom(figment: Figment) -> Rocket<Build> {
    assemble(rocket::custom(figment))
}

fn assemble(rocket: Rocket<Build>) -> Rocket<Build> {
    rocket
        .mount("/", api::routes())
        .attach(ConfigFairing)
        .attach(StoreFairing)
        .attach(NotifierFairing)
        .attach(LoggerFairing)
}

#[cfg(test)]
pub(crate) mod testing {
    use rocket::local::asynchronous::Client;

    use super::*;

    /// A local client over a fresh server with its own temp store file and
    /// the default (city) eligibility rule.
    pub(crate) async fn client() -> Client {
        client_with_eligibility("city").await
    }

    /// As `client`, but with the campaign's eligibility rule overridden.
    pub(crate) async fn client_with_eligibility(rule: &str) -> Client {
        client_at(&temp_store_path(), rule).await
    }

    /// A fresh temp path for a test's backing store.
    pub(crate) fn temp_store_path() -> std::path::PathBuf {
        let random: u32 = rand::random();
        std::env::temp_dir().join(format!("galia-api-test-{random}.json"))
    }

    /// A local client whose server persists to the given store file.
    pub(crate) async fn client_at(store: &std::path::Path, rule: &str) -> Client {
        let figment = rocket::Config::figment()
            .merge(("store_path", store.display().to_string()))
            .merge(("raffle_start", 20))
            .merge(("eligibility", rule));
        Client::tracked(custom(figment))
            .await
            .expect("failed to build test client")
    }
}
