//! Response envelopes.
//!
//! Most endpoints wrap their payload as `{success, message, data}`; catalog
//! listings come either bare or wrapped. Error bodies carry `message` or
//! `error`.

use reqwest::StatusCode;
use serde::{Deserialize, de::DeserializeOwned};

use super::BackendError;

/// `{success, message, data}` wrapper.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    #[serde(default)]
    success: Option<bool>,

    #[serde(default)]
    message: Option<String>,

    #[serde(default)]
    error: Option<String>,

    data: Option<T>,
}

impl<T> Envelope<T> {
    pub(crate) fn into_data(self) -> Result<T, BackendError> {
        self.data
            .ok_or_else(|| BackendError::UnexpectedResponse("response carries no data".to_string()))
    }
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,

    #[serde(default)]
    error: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        self.message
            .or(self.error)
            .filter(|message| !message.trim().is_empty())
    }
}

/// A listing in any of the shapes the catalog endpoints have used.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Listing<T> {
    Bare(Vec<T>),
    Data { data: Vec<T> },
    Recipes { recetas: Vec<T> },
}

impl<T> Listing<T> {
    fn into_items(self) -> Vec<T> {
        match self {
            Listing::Bare(items) | Listing::Data { data: items } | Listing::Recipes { recetas: items } => {
                items
            }
        }
    }
}

/// Message to show for a failed request: the body's `message`, else its
/// `error`, else a generic one naming the status.
pub(crate) fn error_message(status: StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(ErrorBody::into_message)
        .unwrap_or_else(|| format!("request failed with status {status}"))
}

fn check_status(status: StatusCode, body: &[u8]) -> Result<(), BackendError> {
    if status == StatusCode::UNAUTHORIZED {
        return Err(BackendError::Unauthorized);
    }

    if !status.is_success() {
        return Err(BackendError::Api {
            status: status.as_u16(),
            message: error_message(status, body),
        });
    }

    Ok(())
}

/// Reads an enveloped response, failing on error statuses and on
/// `success: false`.
pub(crate) fn read_envelope<T: DeserializeOwned>(
    status: StatusCode,
    body: &[u8],
) -> Result<Envelope<T>, BackendError> {
    check_status(status, body)?;

    let envelope: Envelope<T> = serde_json::from_slice(body)
        .map_err(|error| BackendError::UnexpectedResponse(error.to_string()))?;

    if envelope.success == Some(false) {
        let message = envelope
            .message
            .or(envelope.error)
            .unwrap_or_else(|| format!("request failed with status {status}"));

        return Err(BackendError::Api {
            status: status.as_u16(),
            message,
        });
    }

    Ok(envelope)
}

/// Reads a catalog listing, bare or wrapped.
pub(crate) fn read_listing<T: DeserializeOwned>(
    status: StatusCode,
    body: &[u8],
) -> Result<Vec<T>, BackendError> {
    check_status(status, body)?;

    let listing: Listing<T> = serde_json::from_slice(body)
        .map_err(|error| BackendError::UnexpectedResponse(error.to_string()))?;

    Ok(listing.into_items())
}

#[cfg(test)]
mod tests {
    use caja::prelude::*;
    use serde::de::IgnoredAny;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn reads_stock_report_data() -> TestResult {
        let body = br#"{
            "success": true,
            "data": {
                "disponible": false,
                "faltantes": [{"nombre": "Papa", "stock_actual": 1, "requerido": 4, "unidad": "kg"}]
            }
        }"#;

        let report: StockReport = read_envelope(StatusCode::OK, body)?.into_data()?;

        assert!(!report.available);
        assert_eq!(report.shortfalls.len(), 1);

        Ok(())
    }

    #[test]
    fn success_false_is_an_api_error() {
        let body = br#"{"success": false, "message": "Stock insuficiente"}"#;

        let result = read_envelope::<IgnoredAny>(StatusCode::OK, body);

        assert!(matches!(
            result,
            Err(BackendError::Api { status: 200, ref message }) if message == "Stock insuficiente"
        ));
    }

    #[test]
    fn error_status_prefers_message_then_error() {
        let with_message = br#"{"message": "Mesa ocupada", "error": "ignored"}"#;
        let with_error = br#"{"error": "Token expirado"}"#;

        assert_eq!(error_message(StatusCode::BAD_REQUEST, with_message), "Mesa ocupada");
        assert_eq!(error_message(StatusCode::BAD_REQUEST, with_error), "Token expirado");
    }

    #[test]
    fn error_status_without_body_names_the_status() {
        let result = read_envelope::<IgnoredAny>(StatusCode::INTERNAL_SERVER_ERROR, b"<html>");

        assert!(matches!(
            result,
            Err(BackendError::Api { status: 500, ref message }) if message.contains("500")
        ));
    }

    #[test]
    fn unauthorized_status_is_distinct() {
        let result = read_envelope::<IgnoredAny>(StatusCode::UNAUTHORIZED, b"{}");

        assert!(matches!(result, Err(BackendError::Unauthorized)));
    }

    #[test]
    fn missing_data_is_unexpected() {
        let result = read_envelope::<StockReport>(StatusCode::OK, br#"{"success": true}"#)
            .and_then(Envelope::into_data);

        assert!(matches!(result, Err(BackendError::UnexpectedResponse(_))));
    }

    #[test]
    fn listings_accept_every_shape() -> TestResult {
        let bare = br#"[{"id": 1, "nombre": "Agua", "precio": 1.5}]"#;
        let wrapped = br#"{"data": [{"id": 1, "nombre": "Agua", "precio": 1.5}]}"#;
        let recipes = br#"{"total": 1, "pagina": 1, "recetas": [{"id": 7, "nombre": "Ceviche", "precio_venta": 15}]}"#;

        let from_bare: Vec<Product> = read_listing(StatusCode::OK, bare)?;
        let from_wrapped: Vec<Product> = read_listing(StatusCode::OK, wrapped)?;
        let from_recipes: Vec<Recipe> = read_listing(StatusCode::OK, recipes)?;

        assert_eq!(from_bare, from_wrapped);
        assert_eq!(from_recipes.first().map(|recipe| recipe.id), Some(CatalogId::new(7)));

        Ok(())
    }
}
