//! # Módulo HTTP
//! src/http/mod.rs
//!
//! Capa de transporte mínima, implementada sin librerías de alto nivel:
//!
//! - Lectura de la cabecera del request (request line + headers)
//! - Rechazo en el borde de todo lo que no es un request soportado
//! - Construcción de la cabecera de la respuesta
//! - Códigos de estado
//!
//! ### Formato de Request
//!
//! ```text
//! GET /path?query=value HTTP/1.0\r\n
//! Header-Name: Header-Value\r\n
//! \r\n
//! ```
//!
//! El servidor siempre responde en HTTP/1.0 y cierra la conexión al
//! terminar, así que la respuesta de eco no necesita `Content-Length`.

pub mod headers;
pub mod request;
pub mod response;
pub mod status;

pub use headers::Headers;
pub use request::{Method, ParseError, Request};
pub use response::Response;
pub use status::StatusCode;
