use std::io::Cursor;

use rocket::{
    http::{ContentType, Status},
    response::{Responder, Response},
    Request,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Not found: {0}")]
    NotFound(String),
}

impl Error {
    fn status(&self) -> Status {
        match self {
            Self::Io(_) | Self::Json(_) => Status::InternalServerError,
            Self::BadRequest(_) => Status::BadRequest,
            Self::NotFound(_) => Status::NotFound,
        }
    }

    /// The message exposed to the client. Internal failures get a generic
    /// message; the detail stays in the log.
    fn message(&self) -> &str {
        match self {
            Self::BadRequest(message) | Self::NotFound(message) => message,
            Self::Io(_) | Self::Json(_) => "Error interno del servidor",
        }
    }
}

/// Every error answers as JSON `{"error": "<message>"}` so the dashboard and
/// the form can show it directly.
impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, _: &'r Request<'_>) -> rocket::response::Result<'o> {
        let status = self.status();
        match status.class() {
            rocket::http::StatusClass::ServerError => error!("{self}"),
            _ => warn!("{self}"),
        }
        let body = json!({ "error": self.message() }).to_string();
        Response::build()
            .status(status)
            .header(ContentType::JSON)
            .sized_body(body.len(), Cursor::new(body))
            .ok()
    }
}
