//! # Parsing de Requests HTTP
//! src/http/request.rs
//!
//! Lee la cabecera de un request (request line + headers) desde cualquier
//! `BufRead`. El body NO se consume aquí: queda en el reader para que el
//! lector de body lo tome solo cuando el método lo requiere.
//!
//! ## Formato
//!
//! ```text
//! POST /path?param1=value1 HTTP/1.1\r\n
//! Host: localhost:8000\r\n
//! Content-Length: 5\r\n
//! \r\n
//! hello
//! ```
//!
//! Todo lo que no encaja en el contrato del servidor (métodos desconocidos,
//! versiones no soportadas, líneas gigantes) se rechaza en este punto con un
//! [`ParseError`] que sabe qué código de estado le corresponde.
//!
//! La cabecera NO tiene que ser UTF-8: el request-target se guarda como
//! bytes crudos y los headers se decodifican como ISO-8859-1, que acepta
//! cualquier byte.

use super::{Headers, StatusCode};
use std::borrow::Cow;
use std::io::{self, BufRead, Read};
use std::str::FromStr;
use thiserror::Error;

/// Largo máximo (en bytes) de la request line y de cada línea de header
pub const MAX_LINE_LENGTH: usize = 65536;

/// Cantidad máxima de headers por request
pub const MAX_HEADERS: usize = 100;

/// Métodos HTTP soportados
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    GET,
    HEAD,
    OPTIONS,
    DELETE,
    POST,
    PUT,
    PATCH,
}

impl Method {
    /// Todos los métodos que acepta el servidor
    pub const ALL: [Method; 7] = [
        Method::GET,
        Method::HEAD,
        Method::OPTIONS,
        Method::DELETE,
        Method::POST,
        Method::PUT,
        Method::PATCH,
    ];

    /// Convierte el método a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
            Method::OPTIONS => "OPTIONS",
            Method::DELETE => "DELETE",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::PATCH => "PATCH",
        }
    }
}

impl FromStr for Method {
    type Err = ParseError;

    /// Los métodos HTTP distinguen mayúsculas: `get` no es `GET`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| ParseError::UnsupportedMethod(s.to_string()))
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errores que pueden ocurrir al leer la cabecera del request
#[derive(Debug, Error)]
pub enum ParseError {
    /// La conexión se cerró sin enviar nada, o la request line vino vacía
    #[error("Empty request")]
    EmptyRequest,

    #[error("Request line too long")]
    RequestLineTooLong,

    #[error("Bad request syntax ({0:?})")]
    InvalidRequestLine(String),

    #[error("Unsupported method ({0:?})")]
    UnsupportedMethod(String),

    #[error("Bad request version ({0:?})")]
    InvalidHttpVersion(String),

    #[error("Invalid HTTP version ({0})")]
    UnsupportedHttpVersion(String),

    #[error("Invalid header: {0:?}")]
    InvalidHeader(String),

    #[error("Header line too long")]
    HeaderLineTooLong,

    #[error("Too many headers")]
    TooManyHeaders,

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ParseError {
    /// Código con el que se rechaza el request
    ///
    /// `None` significa que no hay a quién responder: el cliente cerró la
    /// conexión o el socket falló.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ParseError::EmptyRequest | ParseError::Io(_) => None,
            ParseError::RequestLineTooLong => Some(StatusCode::UriTooLong),
            ParseError::HeaderLineTooLong | ParseError::TooManyHeaders => {
                Some(StatusCode::RequestHeaderFieldsTooLarge)
            }
            ParseError::UnsupportedMethod(_) => Some(StatusCode::NotImplemented),
            ParseError::UnsupportedHttpVersion(_) => Some(StatusCode::HttpVersionNotSupported),
            ParseError::InvalidRequestLine(_)
            | ParseError::InvalidHttpVersion(_)
            | ParseError::InvalidHeader(_) => Some(StatusCode::BadRequest),
        }
    }
}

/// Cabecera de un request HTTP ya parseada
#[derive(Debug, Clone)]
pub struct Request {
    /// Método HTTP (uno de los siete soportados)
    method: Method,

    /// Request-target tal cual llegó (bytes), con query string incluida
    path: Vec<u8>,

    /// Versión HTTP ("HTTP/1.0", "HTTP/1.1")
    version: String,

    /// Headers en orden de llegada
    headers: Headers,
}

impl Request {
    /// Lee la request line y los headers desde el reader
    ///
    /// Se detiene en la línea vacía que separa headers del body (o en EOF),
    /// así que lo que quede en el reader es el body.
    pub fn read_from<R: BufRead>(reader: &mut R) -> Result<Self, ParseError> {
        let line = read_line(reader, ParseError::RequestLineTooLong)?
            .ok_or(ParseError::EmptyRequest)?;

        let (method, path, version) = Self::parse_request_line(&line)?;
        let headers = Self::parse_headers(reader)?;

        Ok(Request {
            method,
            path,
            version,
            headers,
        })
    }

    /// Parsea un request completo desde bytes en memoria
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use httpd_echo::http::{Method, Request};
    ///
    /// let raw = b"GET /foo?a=1 HTTP/1.0\r\nHost: localhost\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.method(), Method::GET);
    /// assert_eq!(request.path(), b"/foo?a=1");
    /// assert_eq!(request.header("host"), Some("localhost"));
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        let mut reader = buffer;
        Self::read_from(&mut reader)
    }

    /// Formato: `METHOD /path?query HTTP/1.x`
    fn parse_request_line(line: &[u8]) -> Result<(Method, Vec<u8>, String), ParseError> {
        let parts: Vec<&[u8]> = line
            .split(|b| b.is_ascii_whitespace())
            .filter(|part| !part.is_empty())
            .collect();

        if parts.is_empty() {
            return Err(ParseError::EmptyRequest);
        }
        if parts.len() != 3 {
            return Err(ParseError::InvalidRequestLine(latin1(line)));
        }

        // La versión se valida antes que el método: un HTTP/2 con método
        // raro es 505, no 501
        let version = latin1(parts[2]);
        Self::check_version(&version)?;

        let method = latin1(parts[0]).parse::<Method>()?;

        Ok((method, parts[1].to_vec(), version))
    }

    /// Acepta cualquier `HTTP/1.x`; `HTTP/2.0` en adelante es 505
    fn check_version(version: &str) -> Result<(), ParseError> {
        let invalid = || ParseError::InvalidHttpVersion(version.to_string());

        let number = version.strip_prefix("HTTP/").ok_or_else(invalid)?;
        let (major, minor) = number.split_once('.').ok_or_else(invalid)?;

        let is_number = |s: &str| !s.is_empty() && s.len() <= 10 && s.bytes().all(|b| b.is_ascii_digit());
        if !is_number(major) || !is_number(minor) {
            return Err(invalid());
        }

        let major: u64 = major.parse().map_err(|_| invalid())?;
        match major {
            1 => Ok(()),
            0 => Err(invalid()),
            _ => Err(ParseError::UnsupportedHttpVersion(version.to_string())),
        }
    }

    /// Lee headers `Name: Value` hasta la línea vacía
    ///
    /// Una línea que empieza con espacio o tab continúa el header anterior.
    fn parse_headers<R: BufRead>(reader: &mut R) -> Result<Headers, ParseError> {
        let mut headers = Headers::new();

        while let Some(line) = read_line(reader, ParseError::HeaderLineTooLong)? {
            let line = latin1(&line);
            if line.is_empty() {
                break;
            }

            if line.starts_with([' ', '\t']) {
                if !headers.continue_last(line.trim()) {
                    return Err(ParseError::InvalidHeader(line));
                }
                continue;
            }

            if headers.len() >= MAX_HEADERS {
                return Err(ParseError::TooManyHeaders);
            }

            match line.split_once(':') {
                Some((name, value)) => headers.append(name.trim(), value.trim()),
                None => return Err(ParseError::InvalidHeader(line)),
            }
        }

        Ok(headers)
    }

    // === Métodos públicos para acceder a los campos ===

    pub fn method(&self) -> Method {
        self.method
    }

    /// Request-target sin tocar (incluye la query string)
    pub fn path(&self) -> &[u8] {
        &self.path
    }

    /// Request-target como texto; los bytes que no son UTF-8 se reemplazan
    pub fn path_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.path)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Primer valor de un header (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// Request line reconstruida, útil para logs
    pub fn request_line(&self) -> String {
        format!("{} {} {}", self.method, self.path_lossy(), self.version)
    }
}

/// Lee una línea terminada en `\n` respetando [`MAX_LINE_LENGTH`]
///
/// Retorna `None` en EOF. El terminador (`\r\n` o `\n`) se descarta.
fn read_line<R: BufRead>(reader: &mut R, too_long: ParseError) -> Result<Option<Vec<u8>>, ParseError> {
    let mut buf = Vec::new();
    let read = reader
        .by_ref()
        .take(MAX_LINE_LENGTH as u64 + 1)
        .read_until(b'\n', &mut buf)?;

    if read == 0 {
        return Ok(None);
    }
    if buf.len() > MAX_LINE_LENGTH {
        return Err(too_long);
    }

    while matches!(buf.last(), Some(b'\n' | b'\r')) {
        buf.pop();
    }

    Ok(Some(buf))
}

/// ISO-8859-1: cada byte es el code point del mismo valor
fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}
