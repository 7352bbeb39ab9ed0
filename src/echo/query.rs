//! # Query Parameters
//! src/echo/query.rs
//!
//! Reconstruye la URL completa del request y extrae sus query parameters en
//! el orden en que aparecen.
//!
//! Reglas de parsing:
//! - Los pares se separan por `&`; clave y valor por el primer `=`
//! - `+` es un espacio y `%XX` un byte (UTF-8, lo inválido se reemplaza)
//! - Pares sin valor (`a=` o `a`) se descartan
//! - Si una clave se repite, gana la primera aparición

use crate::server::ServerName;

/// URL absoluta del request: `http://host:port` + path
///
/// # Ejemplo
/// ```
/// use httpd_echo::echo::query::request_url;
/// use httpd_echo::server::ServerName;
///
/// let server = ServerName::new("localhost", 8000);
/// assert_eq!(request_url(&server, "/foo?a=1"), "http://localhost:8000/foo?a=1");
/// ```
pub fn request_url(server: &ServerName, path: &str) -> String {
    format!("http://{}{}", server.authority(), path)
}

/// Componente query de una URL (sin `?` y sin fragmento)
pub fn query_component(url: &str) -> &str {
    let without_fragment = url.split_once('#').map_or(url, |(head, _)| head);

    without_fragment
        .split_once('?')
        .map_or("", |(_, query)| query)
}

/// Parsea una query string a pares `(clave, primer valor)` ordenados
///
/// # Ejemplo
/// ```
/// use httpd_echo::echo::query::parse_query;
///
/// let params = parse_query("a=1&b=hello+world&a=9");
/// assert_eq!(params, vec![
///     ("a".to_string(), "1".to_string()),
///     ("b".to_string(), "hello world".to_string()),
/// ]);
/// ```
pub fn parse_query(query: &str) -> Vec<(String, String)> {
    let mut params: Vec<(String, String)> = Vec::new();

    for pair in query.split('&') {
        if pair.is_empty() {
            continue;
        }

        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        if value.is_empty() {
            continue;
        }

        let key = url_decode(key);
        if params.iter().any(|(existing, _)| *existing == key) {
            continue;
        }

        params.push((key, url_decode(value)));
    }

    params
}

/// Decodifica `+` y secuencias `%XX`
///
/// Las secuencias mal formadas (`%zz`, `%4`) se dejan tal cual.
pub fn url_decode(s: &str) -> String {
    let replaced = s.replace('+', " ");
    let bytes = replaced.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());

    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let high = bytes.get(i + 1).and_then(|b| hex_value(*b));
            let low = bytes.get(i + 2).and_then(|b| hex_value(*b));
            if let (Some(high), Some(low)) = (high, low) {
                out.push(high << 4 | low);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }

    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(byte: u8) -> Option<u8> {
    (byte as char).to_digit(16).map(|digit| digit as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(list: &[(&str, &str)]) -> Vec<(String, String)> {
        list.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_request_url() {
        let server = ServerName::new("example.test", 8042);
        assert_eq!(request_url(&server, "/a?b=c"), "http://example.test:8042/a?b=c");
    }

    #[test]
    fn test_request_url_ipv6_host() {
        let server = ServerName::new("::1", 8000);
        assert_eq!(request_url(&server, "/"), "http://[::1]:8000/");
    }

    #[test]
    fn test_query_component() {
        assert_eq!(query_component("http://h:1/foo?a=1&b=2"), "a=1&b=2");
        assert_eq!(query_component("http://h:1/foo"), "");
        assert_eq!(query_component("http://h:1/foo?a=1#frag"), "a=1");
        assert_eq!(query_component("http://h:1/foo#frag?a=1"), "");
        assert_eq!(query_component("http://h:1/foo?a=1?b=2"), "a=1?b=2");
    }

    #[test]
    fn test_parse_query_keeps_order() {
        assert_eq!(parse_query("b=2&a=1&c=3"), pairs(&[("b", "2"), ("a", "1"), ("c", "3")]));
    }

    #[test]
    fn test_first_value_wins() {
        assert_eq!(parse_query("a=1&a=9"), pairs(&[("a", "1")]));
        assert_eq!(parse_query("a=1&b=2&a=3&b=4"), pairs(&[("a", "1"), ("b", "2")]));
    }

    #[test]
    fn test_blank_values_are_dropped() {
        assert_eq!(parse_query("a=&b&c=3"), pairs(&[("c", "3")]));
        assert_eq!(parse_query("&&"), pairs(&[]));
        assert_eq!(parse_query(""), pairs(&[]));
    }

    #[test]
    fn test_blank_first_value_does_not_shadow_later() {
        assert_eq!(parse_query("a=&a=2"), pairs(&[("a", "2")]));
    }

    #[test]
    fn test_keys_are_not_normalized() {
        assert_eq!(parse_query("Key=1&key=2"), pairs(&[("Key", "1"), ("key", "2")]));
    }

    #[test]
    fn test_value_with_equals_sign() {
        assert_eq!(parse_query("expr=a=b"), pairs(&[("expr", "a=b")]));
    }

    #[test]
    fn test_url_decode() {
        assert_eq!(url_decode("hello%20world"), "hello world");
        assert_eq!(url_decode("a+b"), "a b");
        assert_eq!(url_decode("%2B"), "+");
        assert_eq!(url_decode("caf%C3%A9"), "café");
    }

    #[test]
    fn test_url_decode_malformed_escapes() {
        assert_eq!(url_decode("100%"), "100%");
        assert_eq!(url_decode("%zz"), "%zz");
        assert_eq!(url_decode("%4"), "%4");
        assert_eq!(url_decode("%FF"), "\u{FFFD}");
    }

    #[test]
    fn test_decoded_keys_are_deduplicated() {
        assert_eq!(parse_query("a%20b=1&a+b=2"), pairs(&[("a b", "1")]));
    }
}
