//! # Armado del Mensaje
//! src/echo/assembler.rs
//!
//! `Method` y `Path` primero, después un campo por cada query parameter
//! distinto. El payload (si corresponde) lo agrega el lector de body.
//!
//! `Path` lleva los bytes crudos del request; la query se parsea sobre su
//! versión en texto (los bytes no UTF-8 se reemplazan).

use super::query;
use super::EchoMessage;
use crate::http::Request;
use crate::server::ServerName;

/// Construye el mensaje de eco de un request
///
/// # Ejemplo
/// ```
/// use httpd_echo::echo::assemble;
/// use httpd_echo::http::Request;
/// use httpd_echo::server::ServerName;
///
/// let request = Request::parse(b"GET /foo?a=1&b=2 HTTP/1.0\r\n\r\n").unwrap();
/// let message = assemble(&request, &ServerName::new("localhost", 8000));
///
/// assert_eq!(message.to_bytes(), b"Method: GET\nPath: /foo?a=1&b=2\na: 1\nb: 2\n\n");
/// ```
pub fn assemble(request: &Request, server: &ServerName) -> EchoMessage {
    let mut message = EchoMessage::new(request.method(), request.path());

    let url = query::request_url(server, &request.path_lossy());
    for (key, value) in query::parse_query(query::query_component(&url)) {
        message.add_field(&key, &value);
    }

    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::Method;

    fn server() -> ServerName {
        ServerName::new("localhost", 8000)
    }

    fn message_for(raw: &[u8]) -> EchoMessage {
        let request = Request::parse(raw).unwrap();
        assemble(&request, &server())
    }

    #[test]
    fn test_method_and_path_come_first() {
        for method in Method::ALL {
            let raw = format!("{} /x?z=1 HTTP/1.0\r\n\r\n", method);
            let message = message_for(raw.as_bytes());

            let fields: Vec<(&str, &[u8])> = message.fields().collect();
            assert_eq!(fields[0], ("Method", method.as_str().as_bytes()));
            assert_eq!(fields[1], ("Path", &b"/x?z=1"[..]));
        }
    }

    #[test]
    fn test_query_fields_follow_in_order() {
        let message = message_for(b"GET /foo?a=1&b=2 HTTP/1.0\r\n\r\n");

        let fields: Vec<(&str, &[u8])> = message.fields().collect();
        assert_eq!(
            fields,
            vec![
                ("Method", &b"GET"[..]),
                ("Path", &b"/foo?a=1&b=2"[..]),
                ("a", &b"1"[..]),
                ("b", &b"2"[..]),
            ]
        );
        assert_eq!(message.get("A"), Some(&b"1"[..]));
        assert_eq!(message.get("B"), Some(&b"2"[..]));
    }

    #[test]
    fn test_duplicate_key_keeps_first() {
        let message = message_for(b"GET /foo?a=1&a=9 HTTP/1.0\r\n\r\n");

        assert_eq!(message.count("a"), 1);
        assert_eq!(message.get("a"), Some(&b"1"[..]));
    }

    #[test]
    fn test_path_is_not_decoded() {
        let message = message_for(b"GET /a%20b?x=%41 HTTP/1.0\r\n\r\n");

        assert_eq!(message.get("Path"), Some(&b"/a%20b?x=%41"[..]));
        assert_eq!(message.get("x"), Some(&b"A"[..]));
    }

    #[test]
    fn test_latin1_path_is_copied_raw() {
        let message = message_for(b"GET /caf\xe9?q=1 HTTP/1.0\r\n\r\n");

        assert_eq!(message.get("Path"), Some(&b"/caf\xe9?q=1"[..]));
        assert_eq!(message.get("q"), Some(&b"1"[..]));
    }

    #[test]
    fn test_no_payload_from_assembler() {
        let message = message_for(b"POST /submit HTTP/1.0\r\nContent-Length: 3\r\n\r\nabc");

        assert!(message.payload().is_none());
    }

    #[test]
    fn test_same_request_twice_is_identical() {
        let raw = b"GET /foo?a=1&b=2&a=3 HTTP/1.0\r\n\r\n";
        assert_eq!(message_for(raw), message_for(raw));
    }
}
