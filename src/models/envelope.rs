// SPDX-License-Identifier: MIT

//! Backend response envelope.
//!
//! The backend has historically answered either with the documented
//! envelope `{ "data": payload, "message": ... }` or with the bare payload.
//! All shape normalization happens here, at the boundary, instead of per
//! call site.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{AppError, Result};

/// The documented response envelope.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub data: T,
    #[serde(default)]
    pub message: Option<String>,
}

/// Deserialize a response body into `T`.
///
/// Tries the documented envelope first and falls back to the bare payload,
/// so a payload that happens to carry its own `data` field (the token
/// grant does) is never unwrapped by mistake.
pub fn decode_payload<T: DeserializeOwned>(body: Value) -> Result<T> {
    if body.is_object() && body.get("data").is_some() {
        if let Ok(envelope) = serde_json::from_value::<ApiEnvelope<T>>(body.clone()) {
            return Ok(envelope.data);
        }
    }

    serde_json::from_value(body).map_err(|e| AppError::Api(format!("Unexpected response shape: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Vehicle {
        id: String,
    }

    #[test]
    fn test_bare_payload_passes_through() {
        let body = json!([{ "id": "v-1" }, { "id": "v-2" }]);
        let out: Vec<Vehicle> = decode_payload(body).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].id, "v-1");
    }

    #[test]
    fn test_enveloped_payload_is_unwrapped() {
        let body = json!({ "data": { "id": "v-1" }, "message": "ok" });
        let out: Vehicle = decode_payload(body).unwrap();
        assert_eq!(out.id, "v-1");
    }

    #[test]
    fn test_payload_owning_a_data_field_is_not_unwrapped() {
        // A bare payload whose own field is named `data` must survive.
        #[derive(Debug, Deserialize)]
        struct Grant {
            token: String,
            data: Value,
        }

        let body = json!({ "token": "abc", "data": { "id": "u-1" } });
        let out: Grant = decode_payload(body).unwrap();
        assert_eq!(out.token, "abc");
        assert_eq!(out.data, json!({ "id": "u-1" }));
    }

    #[test]
    fn test_shape_mismatch_is_an_api_error() {
        let body = json!({ "data": "not a vehicle" });
        let err = decode_payload::<Vehicle>(body).unwrap_err();
        assert!(matches!(err, AppError::Api(_)));
    }
}
