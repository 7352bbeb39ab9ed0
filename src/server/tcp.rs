//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Acepta conexiones y atiende cada una en su propio thread. El único valor
//! compartido entre threads es el `ServerName`, que es inmutable.

use super::binder::{self, ServerBinding};
use super::handler::ConnectionHandler;
use super::ServerName;
use crate::config::Config;
use crate::error::ServerError;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::thread;
use tracing::{info, warn};

/// Servidor HTTP de eco
pub struct Server {
    binding: ServerBinding,
}

impl Server {
    /// Abre el socket según la configuración
    ///
    /// Falla si el puerto explícito no está disponible o si la búsqueda
    /// automática se queda sin puertos.
    pub fn bind(config: &Config) -> Result<Self, ServerError> {
        config.validate().map_err(ServerError::Config)?;

        let binding = binder::bind(&config.address, config.port_selection())?;
        info!(address = %binding.host(), port = binding.port(), "listening");

        Ok(Self { binding })
    }

    pub fn port(&self) -> u16 {
        self.binding.port()
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.binding.local_addr()
    }

    pub fn server_name(&self) -> ServerName {
        self.binding.server_name()
    }

    /// Loop de aceptación: un thread por conexión
    ///
    /// Bloquea el thread actual mientras el socket siga abierto.
    pub fn run(&self) -> io::Result<()> {
        let server_name = Arc::new(self.binding.server_name());

        for stream in self.binding.listener().incoming() {
            match stream {
                Ok(stream) => {
                    let handler = ConnectionHandler::new(stream, Arc::clone(&server_name));
                    thread::spawn(move || handler.run());
                }
                Err(e) => {
                    warn!(error = %e, "failed to accept connection");
                }
            }
        }

        Ok(())
    }
}
