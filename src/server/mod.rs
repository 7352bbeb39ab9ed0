//! # Módulo del Servidor
//! src/server/mod.rs
//!
//! 1. Abre el socket de escucha (`binder`)
//! 2. Acepta conexiones entrantes (`tcp`)
//! 3. Atiende cada conexión con su propio handler (`handler`)

pub mod binder;
pub mod handler;
pub mod tcp;

pub use binder::{PortSelection, ServerBinding, ServerName};
pub use handler::ConnectionHandler;
pub use tcp::Server;
