//! # Handler por Conexión
//! src/server/handler.rs
//!
//! Cada conexión aceptada recibe su propio `ConnectionHandler`, construido
//! con todo lo que necesita: el stream, la dirección del peer y el nombre
//! del servidor. No hay estado compartido mutable entre handlers.
//!
//! ```text
//! Start → Assemble → (ReadBody)? → WriteHeaders → WriteBody → Drain → End
//! ```
//!
//! Antes de soltar el socket se cierra la mitad de escritura y se descarta
//! lo que el cliente mandó y nadie leyó: cerrar con bytes pendientes en el
//! buffer de recepción hace que el kernel mande un RST y la respuesta se
//! pierda.

use crate::dispatch::Mode;
use crate::echo::{self, EchoMessage};
use crate::http::{ParseError, Request, Response, StatusCode};
use crate::server::ServerName;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::net::{Shutdown, TcpStream};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Máximo de bytes sobrantes que se descartan antes de cerrar
const DRAIN_LIMIT: u64 = 1024 * 1024;

/// Espera máxima por cada lectura del drenaje
const DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

/// Qué pasó con una conexión, para el log
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Request reflejado (o rechazado en el borde) con este status
    Responded { request_line: String, status: StatusCode },

    /// El cliente cerró sin mandar un request
    Closed,
}

pub struct ConnectionHandler {
    stream: TcpStream,
    peer: String,
    server: Arc<ServerName>,
}

impl ConnectionHandler {
    pub fn new(stream: TcpStream, server: Arc<ServerName>) -> Self {
        let peer = stream
            .peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        Self {
            stream,
            peer,
            server,
        }
    }

    pub fn peer(&self) -> &str {
        &self.peer
    }

    /// Atiende la conexión completa y la cierra
    pub fn run(self) {
        match self.handle() {
            Ok(Outcome::Responded { request_line, status }) => {
                info!(peer = %self.peer, status = status.as_u16(), "\"{}\"", request_line);
            }
            Ok(Outcome::Closed) => debug!(peer = %self.peer, "connection closed without request"),
            Err(err) => warn!(peer = %self.peer, error = %err, "connection failed"),
        }
    }

    fn handle(&self) -> io::Result<Outcome> {
        let mut reader = BufReader::new(self.stream.try_clone()?);
        let mut writer = &self.stream;

        let outcome = exchange(&mut reader, &mut writer, &self.server)?;
        self.drain(reader);

        Ok(outcome)
    }

    /// Cierra la escritura y consume lo que quede del request
    fn drain<R: Read>(&self, reader: R) {
        if let Err(err) = self.stream.shutdown(Shutdown::Write) {
            debug!(peer = %self.peer, error = %err, "shutdown failed");
            return;
        }
        if let Err(err) = self.stream.set_read_timeout(Some(DRAIN_TIMEOUT)) {
            debug!(peer = %self.peer, error = %err, "could not set drain timeout");
            return;
        }

        match io::copy(&mut reader.take(DRAIN_LIMIT), &mut io::sink()) {
            Ok(0) => {}
            Ok(discarded) => debug!(peer = %self.peer, discarded, "discarded unread request bytes"),
            Err(err) => debug!(peer = %self.peer, error = %err, "drain stopped"),
        }
    }
}

/// Lee un request del reader y escribe la respuesta en el writer
///
/// Separado del socket para poder probarlo con buffers en memoria.
pub fn exchange<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    server: &ServerName,
) -> io::Result<Outcome> {
    let request = match Request::read_from(reader) {
        Ok(request) => request,
        Err(err) => {
            let Some(status) = err.status() else {
                return match err {
                    ParseError::Io(source) => Err(source),
                    _ => Ok(Outcome::Closed),
                };
            };

            debug!(error = %err, "request rejected");
            writer.write_all(&Response::error(status, &err.to_string()).to_bytes())?;
            writer.flush()?;

            return Ok(Outcome::Responded {
                request_line: err.to_string(),
                status,
            });
        }
    };

    respond(&request, reader, writer, server)?;

    Ok(Outcome::Responded {
        request_line: request.request_line(),
        status: StatusCode::Ok,
    })
}

/// Escribe la respuesta de eco de un request ya parseado
///
/// El body (si el método lo lleva) se lee de `body`.
pub fn respond<R: BufRead, W: Write>(
    request: &Request,
    body: &mut R,
    writer: &mut W,
    server: &ServerName,
) -> io::Result<()> {
    match Mode::of(request.method()) {
        Mode::Bodyless => {
            write_head(writer)?;
            let message = echo::assemble(request, server);
            write_message(writer, &message)?;
        }
        Mode::Bodied => {
            let mut message = echo::assemble(request, server);
            message.set_payload(echo::read_payload(request.headers(), body));
            write_head(writer)?;
            write_message(writer, &message)?;
        }
    }

    writer.flush()
}

fn write_head<W: Write>(writer: &mut W) -> io::Result<()> {
    writer.write_all(&Response::echo().to_bytes())
}

fn write_message<W: Write>(writer: &mut W, message: &EchoMessage) -> io::Result<()> {
    writer.write_all(&message.to_bytes())
}
