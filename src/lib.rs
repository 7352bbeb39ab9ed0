//! # httpd-echo
//! src/lib.rs
//!
//! Servidor HTTP de diagnóstico: a cada request le responde con una copia
//! legible de lo que recibió (método, path, query parameters y, para los
//! métodos que lo llevan, el body). Sirve para ver exactamente qué manda un
//! cliente, un proxy o un balanceador.
//!
//! ## Arquitectura
//!
//! - `http`: lectura de requests y cabecera de la respuesta
//! - `dispatch`: método → modo (con o sin body)
//! - `echo`: armado y serialización del mensaje de eco
//! - `server`: bind del puerto, loop de aceptación y handler por conexión
//! - `config`: CLI y variables de entorno
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use httpd_echo::config::Config;
//! use httpd_echo::server::Server;
//!
//! let config = Config::default();
//! let server = Server::bind(&config).expect("no free port");
//! server.run().expect("accept loop failed");
//! ```

pub mod config;
pub mod dispatch;
pub mod echo;
pub mod error;
pub mod http;
pub mod server;

pub use error::ServerError;
