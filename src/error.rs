//! # Errores del Servidor
//! src/error.rs
//!
//! Errores fatales de arranque. Una vez que el servidor está escuchando,
//! ningún request puede producir uno de estos.

use crate::server::binder::MAX_PORT;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    /// La búsqueda automática pasó de 65535 sin encontrar un puerto libre
    #[error("No available port found on {address} from {start} to {}", MAX_PORT)]
    PortExhausted { address: String, start: u16 },

    /// Falló el bind y no tiene sentido reintentar con otro puerto
    #[error("Could not bind {address}:{port}: {source}")]
    Bind {
        address: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),
}
