use rocket::{
    fairing::{self, Fairing, Info, Kind},
    Build, Rocket,
};

use super::{GibddClient, GibddConfig};

/// Reads the registry configuration on ignite and puts a [`GibddClient`] into managed state.
pub struct GibddFairing;

impl GibddFairing {
    pub fn fairing() -> Self {
        Self {}
    }
}

#[rocket::async_trait]
impl Fairing for GibddFairing {
    fn info(&self) -> Info {
        Info {
            name: "Vehicle registry",
            kind: Kind::Ignite | Kind::Singleton,
        }
    }

    async fn on_ignite(&self, rocket: Rocket<Build>) -> fairing::Result {
        let config = match GibddConfig::from_figment(rocket.figment()) {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to configure the vehicle registry: {e}");
                return Err(rocket);
            }
        };

        info!("Using vehicle registry at {}", config.base_url);

        let client = match GibddClient::new(config) {
            Ok(client) => client,
            Err(e) => {
                error!("Failed to create the vehicle registry client: {e}");
                return Err(rocket);
            }
        };

        Ok(rocket.manage(client))
    }
}
