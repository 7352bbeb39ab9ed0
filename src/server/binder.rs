//! # Bind del Puerto
//! src/server/binder.rs
//!
//! Abre el socket de escucha. Con un puerto explícito hay un solo intento;
//! sin puerto se busca el primero libre desde 8000:
//!
//! ```text
//! 8000 ocupado → 8001 ocupado → 8002 libre ✓
//! ```
//!
//! Cada intento produce un [`BindAttempt`] y el loop decide si seguir. Solo
//! "puerto ocupado" hace avanzar la búsqueda; cualquier otro error (host que
//! no resuelve, permisos) se propaga de inmediato.

use crate::error::ServerError;
use std::io;
use std::net::{SocketAddr, TcpListener};
use tracing::debug;

/// Primer puerto que prueba la búsqueda automática
pub const DEFAULT_PORT: u16 = 8000;

/// Último puerto válido
pub const MAX_PORT: u16 = 65535;

/// Puerto pedido por el usuario o búsqueda automática
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortSelection {
    Explicit(u16),
    Search { start: u16 },
}

/// Resultado de un intento de bind
#[derive(Debug)]
pub enum BindAttempt {
    Bound(TcpListener),

    /// El puerto ya tiene un listener
    Occupied(io::Error),

    Failed(io::Error),
}

/// Host y puerto que anuncia el servidor
///
/// Es lo único que un handler necesita del servidor para reconstruir la URL
/// del request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerName {
    host: String,
    port: u16,
}

impl ServerName {
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            host: host.to_string(),
            port,
        }
    }

    /// `host:port`, con corchetes si el host es una IPv6 literal
    pub fn authority(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

/// Socket de escucha junto con la dirección pedida y el puerto obtenido
#[derive(Debug)]
pub struct ServerBinding {
    host: String,
    port: u16,
    listener: TcpListener,
}

impl ServerBinding {
    fn new(host: &str, listener: TcpListener) -> Result<Self, ServerError> {
        let port = listener
            .local_addr()
            .map_err(|source| ServerError::Bind {
                address: host.to_string(),
                port: 0,
                source,
            })?
            .port();

        Ok(Self {
            host: host.to_string(),
            port,
            listener,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Puerto real (resuelto por el sistema si se pidió el 0)
    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn listener(&self) -> &TcpListener {
        &self.listener
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub fn server_name(&self) -> ServerName {
        ServerName::new(&self.host, self.port)
    }
}

/// Un solo intento de bind sobre `host:port`
pub fn try_bind(host: &str, port: u16) -> BindAttempt {
    match TcpListener::bind((host, port)) {
        Ok(listener) => BindAttempt::Bound(listener),
        Err(err) if err.kind() == io::ErrorKind::AddrInUse => BindAttempt::Occupied(err),
        Err(err) => BindAttempt::Failed(err),
    }
}

/// Abre el socket según la selección de puerto
///
/// # Ejemplo
/// ```
/// use httpd_echo::server::binder::{bind, PortSelection};
///
/// let binding = bind("127.0.0.1", PortSelection::Explicit(0)).unwrap();
/// assert_ne!(binding.port(), 0);
/// ```
pub fn bind(host: &str, selection: PortSelection) -> Result<ServerBinding, ServerError> {
    match selection {
        PortSelection::Explicit(port) => match try_bind(host, port) {
            BindAttempt::Bound(listener) => ServerBinding::new(host, listener),
            BindAttempt::Occupied(source) | BindAttempt::Failed(source) => Err(ServerError::Bind {
                address: host.to_string(),
                port,
                source,
            }),
        },
        PortSelection::Search { start } => search(host, start, MAX_PORT),
    }
}

/// Prueba `start..=last` en orden hasta que un bind funcione
pub(crate) fn search(host: &str, start: u16, last: u16) -> Result<ServerBinding, ServerError> {
    for port in start..=last {
        match try_bind(host, port) {
            BindAttempt::Bound(listener) => return ServerBinding::new(host, listener),
            BindAttempt::Occupied(_) => debug!(port, "port in use, trying next"),
            BindAttempt::Failed(source) => {
                return Err(ServerError::Bind {
                    address: host.to_string(),
                    port,
                    source,
                })
            }
        }
    }

    Err(ServerError::PortExhausted {
        address: host.to_string(),
        start,
    })
}
