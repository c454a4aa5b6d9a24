use std::io::Cursor;

use rocket::{
    http::{ContentType, Status},
    response::{self, Responder},
    Request, Response,
};
use shared::mock::MockError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Could not create a mock report: {0}")]
    InvalidMockCode(#[from] MockError),
}

pub trait ErrorResponder {
    fn response(&self) -> (Status, String);
}

impl ErrorResponder for Error {
    fn response(&self) -> (Status, String) {
        (
            match self {
                Error::InvalidMockCode(_) => Status::BadRequest,
            },
            self.to_string(),
        )
    }
}

impl<'r> Responder<'r, 'static> for Error {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let (status, body) = self.response();
        Response::build()
            .status(status)
            .header(ContentType::Plain)
            .sized_body(body.len(), Cursor::new(body))
            .ok()
    }
}
