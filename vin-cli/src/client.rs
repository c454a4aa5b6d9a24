use log::{debug, info};
use reqwest::blocking::Client;
use shared::data::VinReport;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("An error occured when interacting with the server: {0}")]
    Http(#[from] reqwest::Error),
    #[error("The server answered with {status}: {body}")]
    Server { status: u16, body: String },
}

/// Fetches reports from a running web-app.
pub struct ReportClient {
    http: Client,
    server: String,
}

impl ReportClient {
    pub fn new(server: &str) -> Result<Self, Error> {
        Ok(Self {
            http: reqwest::blocking::ClientBuilder::new().build()?,
            server: server.trim_end_matches('/').to_string(),
        })
    }

    pub fn lookup(&self, vin: &str) -> Result<VinReport, Error> {
        info!("Looking up {vin}");
        self.get(&format!("/api/vin/{vin}"))
    }

    pub fn mock(&self, code: i32) -> Result<VinReport, Error> {
        info!("Requesting mock scenario {code}");
        self.get(&format!("/api/vin/mock/{code}"))
    }

    fn get(&self, path: &str) -> Result<VinReport, Error> {
        let url = if self.server.contains("://") {
            format!("{}{path}", self.server)
        } else {
            format!("http://{}{path}", self.server)
        };
        debug!("GET {url}");

        let response = self.http.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Server {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        Ok(response.json()?)
    }
}
