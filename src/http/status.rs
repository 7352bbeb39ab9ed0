//! # Códigos de Estado HTTP
//! src/http/status.rs
//!
//! Los requests que llegan al eco siempre se responden con 200. El resto de
//! códigos solo aparecen cuando la capa de transporte rechaza un request que
//! ni siquiera se puede parsear:
//!
//! - **2xx**: Éxito (200 OK)
//! - **4xx**: Error del cliente (400, 414, 431)
//! - **5xx**: Error del servidor (501, 505)

/// Representa los códigos de estado HTTP que emite el servidor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK - Todo request válido se refleja con este código
    Ok = 200,

    /// 400 Bad Request - Request line o headers malformados
    BadRequest = 400,

    /// 414 URI Too Long - La request line supera el límite de bytes
    UriTooLong = 414,

    /// 431 Request Header Fields Too Large - Demasiados headers o líneas muy largas
    RequestHeaderFieldsTooLarge = 431,

    /// 501 Not Implemented - Método fuera del conjunto soportado
    NotImplemented = 501,

    /// 505 HTTP Version Not Supported - HTTP/2 o superior
    HttpVersionNotSupported = 505,
}

impl StatusCode {
    /// Convierte el código a su valor numérico
    ///
    /// # Ejemplo
    /// ```
    /// use httpd_echo::http::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// ```
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }

    /// Retorna el texto de razón (reason phrase) asociado al código
    ///
    /// # Ejemplo
    /// ```
    /// use httpd_echo::http::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::NotImplemented.reason_phrase(), "Not Implemented");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::UriTooLong => "URI Too Long",
            StatusCode::RequestHeaderFieldsTooLarge => "Request Header Fields Too Large",
            StatusCode::NotImplemented => "Not Implemented",
            StatusCode::HttpVersionNotSupported => "HTTP Version Not Supported",
        }
    }
}

impl std::fmt::Display for StatusCode {
    /// Formato: "200 OK"
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason_phrase())
    }
}
