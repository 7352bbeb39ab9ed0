//! # Módulo de Eco
//! src/echo/mod.rs
//!
//! Traduce un request a un mensaje legible:
//!
//! ```text
//! Request → assemble() → EchoMessage → (read_payload)? → bytes
//! ```
//!
//! - `message`: el mensaje y su serialización
//! - `query`: reconstrucción de la URL y parsing de la query string
//! - `assembler`: campos `Method`, `Path` y query parameters
//! - `body`: lectura del body según `Content-Length`

pub mod assembler;
pub mod body;
pub mod message;
pub mod query;

pub use assembler::assemble;
pub use body::{read_payload, ContentLengthError};
pub use message::{EchoMessage, Payload};
