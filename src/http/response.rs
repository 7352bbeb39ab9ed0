//! # Construcción de Respuestas HTTP
//! src/http/response.rs
//!
//! API para armar la cabecera de una respuesta HTTP/1.0 y convertirla a
//! bytes. Los headers se guardan en un `Vec` para que salgan por el socket
//! en el mismo orden en que se agregaron.
//!
//! ## Formato de la respuesta de eco
//!
//! ```text
//! HTTP/1.0 200 OK\r\n
//! Server: httpd-echo/0.1.0\r\n
//! Date: Fri, 16 Oct 2026 10:00:00 GMT\r\n
//! Content-Type: text/rfc822-headers; charset=UTF-8\r\n
//! Last-Modified: Fri, 16 Oct 2026 10:00:00 GMT\r\n
//! \r\n
//! Method: GET
//! Path: /
//! ```

use super::StatusCode;
use chrono::{DateTime, Utc};

/// Valor del header `Server`
pub const SERVER_NAME: &str = concat!("httpd-echo/", env!("CARGO_PKG_VERSION"));

/// Content-Type de toda respuesta de eco
pub const ECHO_CONTENT_TYPE: &str = "text/rfc822-headers; charset=UTF-8";

/// Formatea una fecha como IMF-fixdate (RFC 7231)
///
/// # Ejemplo
/// ```
/// use chrono::{TimeZone, Utc};
/// use httpd_echo::http::response::http_date;
///
/// let time = Utc.with_ymd_and_hms(1994, 11, 6, 8, 49, 37).unwrap();
/// assert_eq!(http_date(time), "Sun, 06 Nov 1994 08:49:37 GMT");
/// ```
pub fn http_date(time: DateTime<Utc>) -> String {
    time.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Representa una respuesta HTTP/1.0
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,

    /// Headers en orden de emisión
    headers: Vec<(String, String)>,

    body: Vec<u8>,
}

impl Response {
    /// Crea una respuesta con los headers que todo servidor HTTP/1.0 emite
    /// (`Server` y `Date`)
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: vec![
                ("Server".to_string(), SERVER_NAME.to_string()),
                ("Date".to_string(), http_date(Utc::now())),
            ],
            body: Vec::new(),
        }
    }

    /// Cabecera de la respuesta de eco
    ///
    /// El status es 200 sin importar lo que contenga el request: lo que
    /// estuviera mal en él se refleja dentro del mensaje.
    ///
    /// # Ejemplo
    /// ```
    /// use httpd_echo::http::{Response, StatusCode};
    ///
    /// let response = Response::echo();
    /// assert_eq!(response.status(), StatusCode::Ok);
    /// assert_eq!(
    ///     response.header("Content-Type"),
    ///     Some("text/rfc822-headers; charset=UTF-8")
    /// );
    /// ```
    pub fn echo() -> Self {
        Self::new(StatusCode::Ok)
            .with_header("Content-Type", ECHO_CONTENT_TYPE)
            .with_header("Last-Modified", &http_date(Utc::now()))
    }

    /// Respuesta para un request rechazado antes de llegar al eco
    ///
    /// Body de texto plano con el motivo; la conexión se cierra después.
    pub fn error(status: StatusCode, message: &str) -> Self {
        Self::new(status)
            .with_header("Connection", "close")
            .with_header("Content-Type", "text/plain; charset=UTF-8")
            .with_body(&format!("{}: {}\n", status, message))
    }

    /// Agrega un header (o reemplaza el valor si ya existe)
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.add_header(name, value);
        self
    }

    /// Versión mutable de [`Response::with_header`]
    pub fn add_header(&mut self, name: &str, value: &str) {
        match self
            .headers
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
        {
            Some((_, v)) => *v = value.to_string(),
            None => self.headers.push((name.to_string(), value.to_string())),
        }
    }

    /// Establece el body y su `Content-Length`
    pub fn with_body(self, body: &str) -> Self {
        self.with_body_bytes(body.as_bytes().to_vec())
    }

    pub fn with_body_bytes(mut self, body: Vec<u8>) -> Self {
        let length = body.len().to_string();
        self.body = body;
        self.add_header("Content-Length", &length);
        self
    }

    /// Convierte la respuesta a bytes listos para enviar por el socket
    ///
    /// - Status line: `HTTP/1.0 200 OK\r\n`
    /// - Headers: `Header-Name: Value\r\n`
    /// - Línea vacía: `\r\n`
    /// - Body (si existe)
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = format!("HTTP/1.0 {}\r\n", self.status).into_bytes();

        for (name, value) in &self.headers {
            result.extend_from_slice(format!("{}: {}\r\n", name, value).as_bytes());
        }

        result.extend_from_slice(b"\r\n");
        result.extend_from_slice(&self.body);

        result
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Valor de un header (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }
}
