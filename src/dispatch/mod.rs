//! # Despacho por Método
//! src/dispatch/mod.rs
//!
//! Los siete métodos soportados se agrupan en dos modos:
//!
//! ```text
//! GET, HEAD, OPTIONS, DELETE → Bodyless
//! POST, PUT, PATCH           → Bodied
//! ```
//!
//! Cualquier otro método lo rechaza el parser de requests con 501, así que
//! acá el `match` es exhaustivo sobre un conjunto cerrado.

use crate::http::Method;

/// Cómo se maneja un request según su método
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Headers, mensaje sin leer body
    Bodyless,

    /// Mensaje, lectura del body, headers
    Bodied,
}

impl Mode {
    /// Modo que corresponde a un método
    ///
    /// # Ejemplo
    /// ```
    /// use httpd_echo::dispatch::Mode;
    /// use httpd_echo::http::Method;
    ///
    /// assert_eq!(Mode::of(Method::HEAD), Mode::Bodyless);
    /// assert_eq!(Mode::of(Method::PATCH), Mode::Bodied);
    /// ```
    pub fn of(method: Method) -> Self {
        match method {
            Method::GET | Method::HEAD | Method::OPTIONS | Method::DELETE => Mode::Bodyless,
            Method::POST | Method::PUT | Method::PATCH => Mode::Bodied,
        }
    }

    pub fn reads_body(&self) -> bool {
        matches!(self, Mode::Bodied)
    }
}
