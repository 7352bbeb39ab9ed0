//! # Headers HTTP
//! src/http/headers.rs
//!
//! Colección de headers que conserva el orden de llegada, admite varios
//! valores por nombre y busca sin distinguir mayúsculas de minúsculas.

/// Headers de un request en el orden en que llegaron
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    /// Crea una colección vacía
    pub fn new() -> Self {
        Self::default()
    }

    /// Agrega un header al final, sin reemplazar valores previos
    pub fn append(&mut self, name: &str, value: &str) {
        self.entries.push((name.to_string(), value.to_string()));
    }

    /// Primer valor asociado al nombre (case-insensitive)
    ///
    /// # Ejemplo
    /// ```
    /// use httpd_echo::http::Headers;
    ///
    /// let mut headers = Headers::new();
    /// headers.append("Content-Length", "5");
    /// assert_eq!(headers.get("content-length"), Some("5"));
    /// ```
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Extiende el valor del último header (líneas de continuación)
    ///
    /// Retorna `false` si todavía no hay ningún header que extender.
    pub(crate) fn continue_last(&mut self, more: &str) -> bool {
        match self.entries.last_mut() {
            Some((_, value)) => {
                if !value.is_empty() {
                    value.push(' ');
                }
                value.push_str(more);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
