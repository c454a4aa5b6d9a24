#![allow(clippy::no_effect_underscore_binding)]
use rocket::{figment::Figment, http::Status, serde::json::Json, Build, Rocket, State};
use shared::{data::VinReport, mock::mock_report};

use error::Error;
use gibdd::{fairing::GibddFairing, GibddClient};

mod error;
mod gibdd;

#[macro_use]
extern crate rocket;

#[get("/vin/<vin>")]
async fn get_vin_report(vin: &str, client: &State<GibddClient>) -> Json<VinReport> {
    Json(client.full_report(vin).await)
}

#[get("/vin/mock/<code>")]
fn get_mock_report(code: i32) -> Result<Json<VinReport>, Error> {
    Ok(Json(mock_report(code)?))
}

#[get("/health")]
fn health() -> Status {
    Status::NoContent
}

fn build(figment: Figment) -> Rocket<Build> {
    rocket::custom(figment)
        .attach(GibddFairing::fairing())
        .mount("/api", routes![get_vin_report, get_mock_report, health])
}

#[launch]
fn rocket() -> _ {
    build(rocket::Config::figment())
}
