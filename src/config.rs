//! # Configuración del Servidor
//! src/config.rs
//!
//! Argumentos CLI con respaldo en variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./httpd-echo --address 0.0.0.0 --port 9000
//! ./httpd-echo -a localhost          # primer puerto libre desde 8000
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTPD_ECHO_PORT=9000 HTTPD_ECHO_LOG=debug ./httpd-echo
//! ```

use crate::server::binder::{PortSelection, DEFAULT_PORT};
use clap::Parser;
use tracing::Level;

/// Configuración del servidor de eco
#[derive(Debug, Clone, Parser)]
#[command(name = "httpd-echo")]
#[command(about = "A simple HTTP server that echoes the request in the response")]
#[command(version)]
pub struct Config {
    /// Hostname or IP address to accept requests on
    #[arg(short, long, default_value = "localhost", env = "HTTPD_ECHO_ADDRESS")]
    pub address: String,

    /// Port to accept requests on. If not specified, use the first available port after 8000
    #[arg(short, long, env = "HTTPD_ECHO_PORT")]
    pub port: Option<u16>,

    /// Log level: trace, debug, info, warn or error
    #[arg(long = "log-level", default_value = "info", env = "HTTPD_ECHO_LOG")]
    pub log_level: String,
}

impl Config {
    /// Crea la configuración parseando los argumentos del proceso
    pub fn new() -> Self {
        Config::parse()
    }

    /// Puerto explícito o búsqueda desde 8000
    ///
    /// # Ejemplo
    /// ```rust
    /// use httpd_echo::config::Config;
    /// use httpd_echo::server::PortSelection;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.port_selection(), PortSelection::Search { start: 8000 });
    /// ```
    pub fn port_selection(&self) -> PortSelection {
        match self.port {
            Some(port) => PortSelection::Explicit(port),
            None => PortSelection::Search {
                start: DEFAULT_PORT,
            },
        }
    }

    /// Nivel máximo de log para el subscriber
    pub fn max_level(&self) -> Result<Level, String> {
        self.log_level
            .parse::<Level>()
            .map_err(|_| format!("Unknown log level: {}", self.log_level))
    }

    /// Valida la configuración
    pub fn validate(&self) -> Result<(), String> {
        if self.address.trim().is_empty() {
            return Err("Address must not be empty".to_string());
        }

        self.max_level()?;

        Ok(())
    }
}

impl Default for Config {
    /// Mismos valores que la CLI sin argumentos
    fn default() -> Self {
        Self {
            address: "localhost".to_string(),
            port: None,
            log_level: "info".to_string(),
        }
    }
}
