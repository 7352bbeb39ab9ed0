//! Tests de integración para el servidor de eco
//! tests/integration_test.rs
//!
//! Cada test levanta su propio servidor en un puerto efímero de 127.0.0.1
//! y le habla HTTP crudo por `TcpStream`.

use httpd_echo::config::Config;
use httpd_echo::server::Server;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::thread;
use std::time::Duration;

/// Helper: arranca un servidor en background y retorna su dirección
fn start_server() -> SocketAddr {
    let config = Config {
        address: "127.0.0.1".to_string(),
        port: Some(0),
        ..Config::default()
    };

    let server = Server::bind(&config).expect("Failed to bind server");
    let addr = server.local_addr().expect("Failed to read local address");
    thread::spawn(move || server.run());

    addr
}

/// Helper: envía bytes crudos y retorna la response completa
fn send_raw(addr: SocketAddr, raw: &[u8]) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let mut stream = TcpStream::connect(addr)?;

    stream.set_read_timeout(Some(Duration::from_secs(5)))?;
    stream.set_write_timeout(Some(Duration::from_secs(5)))?;

    stream.write_all(raw)?;
    stream.flush()?;

    let mut response = Vec::new();
    stream.read_to_end(&mut response)?;

    Ok(response)
}

fn send_request(addr: SocketAddr, raw: &str) -> String {
    let response = send_raw(addr, raw.as_bytes()).expect("Failed to send request");
    String::from_utf8_lossy(&response).into_owned()
}

/// Helper: separa headers y body de la response
fn split_response(response: &str) -> (&str, &str) {
    response.split_once("\r\n\r\n").unwrap_or((response, ""))
}

/// Helper: los campos del mensaje de eco (antes de la línea vacía)
fn echo_fields(body: &str) -> Vec<(String, String)> {
    body.split("\n\n")
        .next()
        .unwrap_or("")
        .lines()
        .filter_map(|line| line.split_once(": "))
        .map(|(n, v)| (n.to_string(), v.to_string()))
        .collect()
}

fn header_value<'a>(head: &'a str, name: &str) -> Option<&'a str> {
    head.lines()
        .filter_map(|line| line.split_once(": "))
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, v)| v)
}

#[test]
fn test_every_method_gets_200_and_its_name() {
    let addr = start_server();

    for method in ["GET", "HEAD", "OPTIONS", "DELETE", "POST", "PUT", "PATCH"] {
        let response = send_request(
            addr,
            &format!("{} /check HTTP/1.0\r\nContent-Length: 0\r\n\r\n", method),
        );
        let (head, body) = split_response(&response);

        assert!(head.starts_with("HTTP/1.0 200 OK"), "{} got: {}", method, head);
        let fields = echo_fields(body);
        assert_eq!(fields[0], ("Method".to_string(), method.to_string()));
    }
}

#[test]
fn test_response_headers() {
    let addr = start_server();
    let response = send_request(addr, "GET / HTTP/1.0\r\n\r\n");
    let (head, _) = split_response(&response);

    assert_eq!(
        header_value(head, "Content-Type"),
        Some("text/rfc822-headers; charset=UTF-8")
    );
    let last_modified = header_value(head, "Last-Modified").expect("Last-Modified missing");
    assert!(last_modified.ends_with(" GMT"), "got: {}", last_modified);
}

#[test]
fn test_path_is_echoed_verbatim() {
    let addr = start_server();
    let path = "/a%20b/c?x=%41&y=hello+world&z";
    let response = send_request(addr, &format!("GET {} HTTP/1.1\r\nHost: test\r\n\r\n", path));
    let (_, body) = split_response(&response);

    let fields = echo_fields(body);
    assert_eq!(fields[1], ("Path".to_string(), path.to_string()));
    assert_eq!(fields[2], ("x".to_string(), "A".to_string()));
    assert_eq!(fields[3], ("y".to_string(), "hello world".to_string()));
    assert_eq!(fields.len(), 4);
}

#[test]
fn test_query_parameters_in_order() {
    let addr = start_server();
    let response = send_request(addr, "GET /foo?a=1&b=2 HTTP/1.0\r\n\r\n");
    let (_, body) = split_response(&response);

    assert_eq!(body, "Method: GET\nPath: /foo?a=1&b=2\na: 1\nb: 2\n\n");
}

#[test]
fn test_duplicate_query_key_first_wins() {
    let addr = start_server();
    let response = send_request(addr, "GET /foo?a=1&a=9 HTTP/1.0\r\n\r\n");
    let (_, body) = split_response(&response);

    let fields = echo_fields(body);
    let a_fields: Vec<_> = fields.iter().filter(|(n, _)| n.eq_ignore_ascii_case("a")).collect();
    assert_eq!(a_fields.len(), 1);
    assert_eq!(a_fields[0].1, "1");
}

#[test]
fn test_post_body_is_echoed_exactly() {
    let addr = start_server();
    let payload: Vec<u8> = vec![b'{', 0x00, 0xFF, b'\r', b'\n', b'}'];

    let mut raw = format!("POST /submit HTTP/1.0\r\nContent-Length: {}\r\n\r\n", payload.len()).into_bytes();
    raw.extend_from_slice(&payload);

    let response = send_raw(addr, &raw).expect("Failed to send request");
    let expected_tail = [b"Method: POST\nPath: /submit\n\n".as_slice(), payload.as_slice()].concat();

    assert!(response.starts_with(b"HTTP/1.0 200 OK"));
    assert!(response.ends_with(&expected_tail));
}

#[test]
fn test_post_without_content_length() {
    let addr = start_server();
    let response = send_request(addr, "POST /submit HTTP/1.0\r\n\r\n");
    let (head, body) = split_response(&response);

    assert!(head.starts_with("HTTP/1.0 200 OK"));
    let payload = body.split_once("\n\n").map(|(_, p)| p).unwrap_or("");
    assert!(!payload.is_empty());
    assert!(payload.contains("Content-Length"));
}

#[test]
fn test_put_with_non_numeric_content_length() {
    let addr = start_server();
    let response = send_request(addr, "PUT /x HTTP/1.0\r\nContent-Length: lots\r\n\r\n");
    let (head, body) = split_response(&response);

    assert!(head.starts_with("HTTP/1.0 200 OK"));
    assert!(body.ends_with("\n\nInvalid Content-Length: \"lots\" is not a non-negative integer"));
}

#[test]
fn test_same_request_twice_is_identical() {
    let addr = start_server();
    let raw = "PATCH /item?b=2&a=1 HTTP/1.0\r\nContent-Length: 4\r\n\r\ndata";

    let first = send_request(addr, raw);
    let second = send_request(addr, raw);

    assert_eq!(split_response(&first).1, split_response(&second).1);
}

#[test]
fn test_unsupported_method_rejected() {
    let addr = start_server();
    let response = send_request(addr, "BREW /pot HTTP/1.0\r\n\r\n");

    assert!(response.starts_with("HTTP/1.0 501 Not Implemented"), "got: {}", response);
}

#[test]
fn test_unsupported_version_rejected() {
    let addr = start_server();
    let response = send_request(addr, "GET / HTTP/2.0\r\n\r\n");

    assert!(response.starts_with("HTTP/1.0 505"), "got: {}", response);
}

#[test]
fn test_latin1_header_is_accepted() {
    let addr = start_server();
    let response = send_raw(addr, b"GET /foo?a=1 HTTP/1.0\r\nUser-Agent: caf\xe9\r\n\r\n")
        .expect("Failed to send request");

    assert!(response.starts_with(b"HTTP/1.0 200 OK"));
    assert!(response.ends_with(b"Method: GET\nPath: /foo?a=1\na: 1\n\n"));
}

#[test]
fn test_latin1_path_is_echoed_byte_for_byte() {
    let addr = start_server();
    let response = send_raw(addr, b"GET /caf\xe9 HTTP/1.0\r\n\r\n").expect("Failed to send request");

    assert!(response.starts_with(b"HTTP/1.0 200 OK"));
    assert!(response.ends_with(b"Method: GET\nPath: /caf\xe9\n\n"));
}

#[test]
fn test_get_with_large_body_still_answered() {
    let addr = start_server();
    let body_len = 200_000;

    let mut raw = format!("GET /big HTTP/1.0\r\nContent-Length: {}\r\n\r\n", body_len).into_bytes();
    raw.resize(raw.len() + body_len, b'z');

    let response = send_raw(addr, &raw).expect("Connection was reset");

    assert!(response.starts_with(b"HTTP/1.0 200 OK"));
    assert!(response.ends_with(b"Method: GET\nPath: /big\n\n"));
}

#[test]
fn test_multiple_requests_sequentially() {
    let addr = start_server();

    for i in 0..5 {
        let response = send_request(addr, &format!("GET /seq?i={} HTTP/1.0\r\n\r\n", i));
        assert!(response.contains("200 OK"), "Request {} failed", i);
        assert!(response.ends_with(&format!("i: {}\n\n", i)));
    }
}
