use reqwest::Url;
use rocket::{figment::Figment, tokio::join};
use serde::{de::DeserializeOwned, Deserialize};
use shared::data::{ReportParts, Resource, VinReport};
use thiserror::Error;

pub mod fairing;

pub const DEFAULT_BASE_URL: &str = "https://api-cloud.ru/api/gibdd.php";
const TOKEN_VARIABLE: &str = "GIBDD_TOKEN";

#[derive(Debug, Error)]
pub enum GibddConfigError {
    #[error("Could not read the registry configuration: {0}")]
    Figment(#[from] rocket::figment::Error),
    #[error("'{0}' is not a valid registry url: {1}")]
    InvalidBaseUrl(String, String),
    #[error("Could not create the http client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Why a single lookup produced no data. Never leaves this module.
#[derive(Debug, Error)]
enum FetchError {
    #[error("request failed: {0}")]
    Http(reqwest::Error),
    #[error("registry answered with status {0}")]
    Status(u16),
}

impl From<reqwest::Error> for FetchError {
    // The request url carries the access token, so it must not end up in the logs.
    fn from(value: reqwest::Error) -> Self {
        FetchError::Http(value.without_url())
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default = "default_base_url")]
    gibdd_base_url: String,
    gibdd_token: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GibddConfig {
    pub base_url: Url,
    pub token: String,
}

impl GibddConfig {
    /// Reads `gibdd_base_url` and `gibdd_token` from the figment. The token falls back to the
    /// `GIBDD_TOKEN` environment variable and then to an empty string.
    ///
    /// # Errors
    ///
    /// Returns an error if the figment can't be extracted or the base url doesn't parse.
    pub fn from_figment(figment: &Figment) -> Result<Self, GibddConfigError> {
        let raw: RawConfig = figment.extract()?;
        let base_url = Url::parse(&raw.gibdd_base_url).map_err(|e| {
            GibddConfigError::InvalidBaseUrl(raw.gibdd_base_url.clone(), e.to_string())
        })?;

        let token = match raw.gibdd_token {
            Some(token) => token,
            None => std::env::var(TOKEN_VARIABLE).unwrap_or_else(|_| {
                warn!("No registry token configured. Set {TOKEN_VARIABLE} or gibdd_token.");
                String::new()
            }),
        };

        Ok(Self { base_url, token })
    }
}

/// Talks to the upstream vehicle registry.
pub struct GibddClient {
    http: reqwest::Client,
    config: GibddConfig,
}

impl GibddClient {
    /// # Errors
    ///
    /// Returns an error if the underlying http client can't be built.
    pub fn new(config: GibddConfig) -> Result<Self, GibddConfigError> {
        let http = reqwest::ClientBuilder::new().build()?;
        Ok(Self { http, config })
    }

    /// Queries every dataset for `vin` and merges the answers. Lookups that fail are left out of
    /// the report instead of failing it.
    pub async fn full_report(&self, vin: &str) -> VinReport {
        let (gibdd, restrict, gibddv2, wanted, dtp, fines, eaisto) = join!(
            self.fetch(vin, Resource::Vin),
            self.fetch(vin, Resource::Restrict),
            self.fetch(vin, Resource::GibddV2),
            self.fetch(vin, Resource::Wanted),
            self.fetch(vin, Resource::Dtp),
            self.fetch(vin, Resource::Fines),
            self.fetch(vin, Resource::Eaisto),
        );

        let report = VinReport::assemble(ReportParts {
            gibdd,
            restrict,
            gibddv2,
            wanted,
            dtp,
            fines,
            eaisto,
        });
        info!(
            "Report for {vin}: {} owners, restricted: {}, wanted: {}, accidents: {}, fines: {}",
            report.owners_count,
            report.has_restriction,
            report.is_wanted,
            report.has_accidents,
            report.has_fines
        );
        report
    }

    /// Fetches one dataset. Any failure is logged and turned into `None`.
    pub async fn fetch<T: DeserializeOwned>(&self, vin: &str, resource: Resource) -> Option<T> {
        match self.try_fetch(vin, resource).await {
            Ok(data) => Some(data),
            Err(e) => {
                warn!("Dropping '{resource}' lookup for {vin}: {e}");
                None
            }
        }
    }

    async fn try_fetch<T: DeserializeOwned>(
        &self,
        vin: &str,
        resource: Resource,
    ) -> Result<T, FetchError> {
        debug!("Requesting '{resource}' for {vin}");
        let response = self
            .http
            .get(self.config.base_url.clone())
            .query(&[
                ("type", resource.as_str()),
                ("val", vin),
                ("token", self.config.token.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use shared::data::{FinesResponse, GibddV2Response};
    use wiremock::{
        matchers::{method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    use super::*;

    const VIN: &str = "XTA210990Y2765499";

    fn client_for(server: &MockServer) -> GibddClient {
        let config = GibddConfig {
            base_url: Url::parse(&format!("{}/api/gibdd.php", server.uri())).unwrap(),
            token: "secret token".into(),
        };
        GibddClient::new(config).unwrap()
    }

    fn lookup(resource: &str) -> wiremock::MockBuilder {
        Mock::given(method("GET"))
            .and(path("/api/gibdd.php"))
            .and(query_param("type", resource))
            .and(query_param("val", VIN))
            .and(query_param("token", "secret token"))
    }

    #[rocket::async_test]
    async fn fetch_sends_type_vin_and_token() {
        let server = MockServer::start().await;
        lookup("gibddv2")
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"status": 200, "found": true})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let data: Option<GibddV2Response> = client.fetch(VIN, Resource::GibddV2).await;

        assert_eq!(
            data,
            Some(GibddV2Response {
                status: 200,
                found: true
            })
        );
    }

    #[rocket::async_test]
    async fn fetch_swallows_error_status() {
        let server = MockServer::start().await;
        lookup("fines")
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let data: Option<FinesResponse> = client.fetch(VIN, Resource::Fines).await;
        assert!(data.is_none());
    }

    #[rocket::async_test]
    async fn fetch_swallows_unparsable_body() {
        let server = MockServer::start().await;
        lookup("fines")
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let data: Option<FinesResponse> = client.fetch(VIN, Resource::Fines).await;
        assert!(data.is_none());
    }

    #[rocket::async_test]
    async fn fetch_swallows_unreachable_registry() {
        let config = GibddConfig {
            // Nothing listens on the discard port.
            base_url: Url::parse("http://127.0.0.1:9/api").unwrap(),
            token: String::new(),
        };
        let client = GibddClient::new(config).unwrap();
        let data: Option<GibddV2Response> = client.fetch(VIN, Resource::GibddV2).await;
        assert!(data.is_none());
    }

    #[rocket::async_test]
    async fn fetch_errors_do_not_leak_the_token() {
        let config = GibddConfig {
            base_url: Url::parse("http://127.0.0.1:9/api").unwrap(),
            token: "SUPERSECRET".into(),
        };
        let client = GibddClient::new(config).unwrap();

        let err = client
            .try_fetch::<GibddV2Response>(VIN, Resource::GibddV2)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Http(_)));
        assert!(!err.to_string().contains("SUPERSECRET"));
        assert!(!format!("{err:?}").contains("SUPERSECRET"));
    }

    #[rocket::async_test]
    async fn body_errors_do_not_leak_the_token() {
        let server = MockServer::start().await;
        lookup("fines")
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .try_fetch::<FinesResponse>(VIN, Resource::Fines)
            .await
            .unwrap_err();
        assert!(!err.to_string().contains("secret"));
        assert!(!format!("{err:?}").contains("secret"));
    }

    #[rocket::async_test]
    async fn full_report_queries_each_dataset_once() {
        let server = MockServer::start().await;
        for resource in Resource::ALL {
            lookup(resource.as_str())
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "status": 200,
                    "found": false
                })))
                .expect(1)
                .mount(&server)
                .await;
        }

        let client = client_for(&server);
        let report = client.full_report(VIN).await;

        assert!(report.gibdd.is_some());
        assert!(report.eaisto.is_some());
        assert_eq!(report.owners_count, 0);
        server.verify().await;
    }

    #[test]
    fn config_reads_figment_values() {
        let figment = Figment::new()
            .merge(("gibdd_base_url", "http://registry.local/api.php"))
            .merge(("gibdd_token", "abc"));

        let config = GibddConfig::from_figment(&figment).unwrap();
        assert_eq!(config.base_url.as_str(), "http://registry.local/api.php");
        assert_eq!(config.token, "abc");
    }

    #[test]
    fn config_defaults_base_url() {
        let figment = Figment::new().merge(("gibdd_token", "abc"));
        let config = GibddConfig::from_figment(&figment).unwrap();
        assert_eq!(config.base_url.as_str(), DEFAULT_BASE_URL);
    }

    #[test]
    fn config_rejects_invalid_base_url() {
        let figment = Figment::new()
            .merge(("gibdd_base_url", "not a url"))
            .merge(("gibdd_token", "abc"));

        let err = GibddConfig::from_figment(&figment).unwrap_err();
        assert!(matches!(err, GibddConfigError::InvalidBaseUrl(url, _) if url == "not a url"));
    }
}
