//! # Mensaje de Eco
//! src/echo/message.rs
//!
//! Representación del request como un mensaje estilo RFC 822: una lista
//! ordenada de campos `Name: Value` seguida, opcionalmente, de un payload.
//!
//! ```text
//! Method: POST
//! Path: /foo?a=1
//! a: 1
//!
//! hello
//! ```

use crate::http::Method;

/// Contenido que va después de los campos
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Bytes del body tal cual llegaron
    Body(Vec<u8>),

    /// Texto que describe por qué no se pudo leer el body
    Error(String),
}

impl Payload {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Payload::Body(bytes) => bytes,
            Payload::Error(text) => text.as_bytes(),
        }
    }
}

/// Mensaje que describe un request
///
/// Los dos primeros campos son siempre `Method` y `Path`; el constructor es
/// la única forma de crear uno, así que ese orden no se puede romper. Los
/// valores son bytes: `Path` se copia del request sin decodificar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EchoMessage {
    fields: Vec<(String, Vec<u8>)>,
    payload: Option<Payload>,
}

impl EchoMessage {
    /// Crea el mensaje con sus dos campos fijos
    ///
    /// # Ejemplo
    /// ```
    /// use httpd_echo::echo::EchoMessage;
    /// use httpd_echo::http::Method;
    ///
    /// let message = EchoMessage::new(Method::GET, b"/foo?a=1");
    /// assert_eq!(message.get("method"), Some(&b"GET"[..]));
    /// assert_eq!(message.get("Path"), Some(&b"/foo?a=1"[..]));
    /// ```
    pub fn new(method: Method, path: &[u8]) -> Self {
        Self {
            fields: vec![
                ("Method".to_string(), method.as_str().as_bytes().to_vec()),
                ("Path".to_string(), path.to_vec()),
            ],
            payload: None,
        }
    }

    /// Agrega un campo al final (después de los existentes)
    pub fn add_field(&mut self, name: &str, value: &str) {
        self.fields.push((name.to_string(), value.as_bytes().to_vec()));
    }

    pub fn set_payload(&mut self, payload: Payload) {
        self.payload = Some(payload);
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_slice()))
    }

    /// Valor del primer campo con ese nombre (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.fields()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }

    /// Cuántos campos llevan ese nombre (case-insensitive)
    pub fn count(&self, name: &str) -> usize {
        self.fields()
            .filter(|(n, _)| n.eq_ignore_ascii_case(name))
            .count()
    }

    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    /// Serializa el mensaje
    ///
    /// Un campo por línea, una línea vacía y después el payload. Los saltos
    /// de línea dentro de un valor se pliegan como líneas de continuación
    /// (`\n `) para que el contenido del request no pueda inventar campos.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();

        for (name, value) in &self.fields {
            out.extend_from_slice(field_name(name).as_bytes());
            out.extend_from_slice(b": ");
            out.extend_from_slice(&fold_value(value));
            out.push(b'\n');
        }

        out.push(b'\n');

        if let Some(payload) = &self.payload {
            out.extend_from_slice(payload.as_bytes());
        }

        out
    }
}

fn field_name(name: &str) -> String {
    name.replace(['\r', '\n'], " ")
}

/// `\r\n`, `\r` y `\n` pasan a ser `\n ` (línea de continuación)
fn fold_value(value: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(value.len());
    let mut bytes = value.iter().copied().peekable();

    while let Some(byte) = bytes.next() {
        match byte {
            b'\r' => {
                bytes.next_if_eq(&b'\n');
                out.extend_from_slice(b"\n ");
            }
            b'\n' => out.extend_from_slice(b"\n "),
            other => out.push(other),
        }
    }

    out
}
