//! # httpd-echo - Entry Point
//! src/main.rs
//!
//! Parsea la configuración, instala el subscriber de logs, abre el socket e
//! inicia el loop de aceptación.

use httpd_echo::config::Config;
use httpd_echo::server::Server;
use tracing::error;

fn main() {
    let config = Config::new();

    let level = match config.max_level() {
        Ok(level) => level,
        Err(e) => {
            eprintln!("💥 Error de configuración: {}", e);
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let server = match Server::bind(&config) {
        Ok(server) => server,
        Err(e) => {
            error!(error = %e, "startup failed");
            eprintln!("💥 Error fatal: {}", e);
            std::process::exit(1);
        }
    };

    println!("httpd-echo {}, Copyright © 2017 rpatterson, 2021 Greg Werbin", env!("CARGO_PKG_VERSION"));
    println!("This program comes with ABSOLUTELY NO WARRANTY.");
    println!("This is Free Software, and you are welcome to redistribute it under certain conditions.");
    println!("Echoing HTTP at http://{} ...", server.server_name().authority());

    if let Err(e) = server.run() {
        error!(error = %e, "accept loop failed");
        std::process::exit(1);
    }
}
