//! # Lectura del Body
//! src/echo/body.rs
//!
//! Solo para métodos con body (POST, PUT, PATCH). Nunca falla: si el
//! `Content-Length` no sirve o la lectura se corta, el motivo pasa a ser el
//! payload del mensaje y la respuesta sigue siendo 200.

use super::Payload;
use crate::http::Headers;
use std::io::Read;
use thiserror::Error;
use tracing::debug;

/// Por qué no se pudo obtener el largo del body
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentLengthError {
    #[error("header missing")]
    Missing,

    #[error("{0:?} is not a non-negative integer")]
    Invalid(String),
}

/// Largo declarado en `Content-Length` (primer valor si hay varios)
///
/// # Ejemplo
/// ```
/// use httpd_echo::echo::body::{content_length, ContentLengthError};
/// use httpd_echo::http::Headers;
///
/// let mut headers = Headers::new();
/// assert_eq!(content_length(&headers), Err(ContentLengthError::Missing));
///
/// headers.append("Content-Length", " 42 ");
/// assert_eq!(content_length(&headers), Ok(42));
/// ```
pub fn content_length(headers: &Headers) -> Result<u64, ContentLengthError> {
    let value = headers
        .get("Content-Length")
        .ok_or(ContentLengthError::Missing)?;

    value
        .trim()
        .parse::<u64>()
        .map_err(|_| ContentLengthError::Invalid(value.to_string()))
}

/// Lee el body declarado y lo convierte en payload
///
/// Bloquea hasta recibir `Content-Length` bytes o hasta que el cliente
/// cierre; en ese caso el payload es lo que haya llegado.
pub fn read_payload<R: Read>(headers: &Headers, reader: &mut R) -> Payload {
    let length = match content_length(headers) {
        Ok(length) => length,
        Err(err) => {
            debug!(error = %err, "body not read");
            return Payload::Error(format!("Invalid Content-Length: {}", err));
        }
    };

    let mut body = Vec::new();
    match reader.by_ref().take(length).read_to_end(&mut body) {
        Ok(read) => {
            if (read as u64) < length {
                debug!(expected = length, read, "body shorter than Content-Length");
            }
            Payload::Body(body)
        }
        Err(err) => Payload::Error(format!("Failed to read request body: {}", err)),
    }
}
