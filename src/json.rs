//! JSON envelope for handler responses.
//!
//! Payloads are wrapped as `{"timestamp": <unix seconds>, "data": ...}`. Decoding a
//! request body goes through [`HandlerRequest::read_json`](crate::dispatcher::HandlerRequest::read_json).

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::dispatcher::{HandlerResponse, ResponseBody};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub timestamp: i64,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(data: T) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or_default();
        Self { timestamp, data }
    }
}

/// Write `data` into the response inside an [`Envelope`].
///
/// `None` answers 204 with an empty body. `Some` keeps the status the handler already set
/// and adds `content-type: application/json`. Existing headers are preserved either way.
pub fn write_json<T: Serialize>(
    res: &mut HandlerResponse,
    data: Option<&T>,
) -> Result<(), serde_json::Error> {
    match data {
        None => {
            res.status = 204;
            res.body = ResponseBody::Empty;
        }
        Some(data) => {
            let value = serde_json::to_value(Envelope::new(data))?;
            res.set_header("content-type", "application/json".to_string());
            res.body = ResponseBody::Json(value);
        }
    }
    Ok(())
}
