//! Static file server for the landing page
//!
//! Serves the built Leptos WASM bundle from the dist/ directory on port 8080

use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::path::{Path, PathBuf};

fn main() {
    let addr = "127.0.0.1:8080";
    let listener = TcpListener::bind(addr).expect("Failed to bind to port 8080");

    println!("Lomi landing page server running at http://{}", addr);
    println!("Serving from dist/ directory");
    println!("Press Ctrl+C to stop\n");

    for stream in listener.incoming() {
        match stream {
            Ok(stream) => handle_client(stream),
            Err(e) => eprintln!("Connection error: {}", e),
        }
    }
}

fn handle_client(mut stream: TcpStream) {
    let buf_reader = BufReader::new(&mut stream);
    let request_line = match buf_reader.lines().next() {
        Some(Ok(line)) => line,
        _ => {
            eprintln!("Failed to read request line");
            return;
        }
    };

    // Request path without the query string
    let full_path = request_line.split_whitespace().nth(1).unwrap_or("/");
    let path = full_path.split('?').next().unwrap_or("/");

    let (body, content_type, status) = load(path);

    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\n\r\n",
        status,
        content_type,
        body.len()
    );

    if let Err(e) = stream.write_all(response.as_bytes()) {
        eprintln!("Failed to write headers: {}", e);
        return;
    }
    if let Err(e) = stream.write_all(&body) {
        eprintln!("Failed to write body: {}", e);
    }

    let _ = stream.flush();
}

/// Resolve a request path against dist/, falling back to index.html so
/// client-side routes resolve on reload.
fn load(path: &str) -> (Vec<u8>, &'static str, &'static str) {
    let mut file_path = PathBuf::from("dist");
    file_path.push(path.strip_prefix('/').unwrap_or(path));

    if path == "/" || path.is_empty() || file_path.is_dir() || !file_path.exists() {
        file_path = PathBuf::from("dist/index.html");
    }

    match fs::read(&file_path) {
        Ok(contents) => (contents, content_type(&file_path), "200 OK"),
        Err(_) => {
            eprintln!("File not found: {}", file_path.display());
            (
                b"<!DOCTYPE html><html><body><h1>Error: File not found</h1></body></html>".to_vec(),
                "text/html; charset=utf-8",
                "404 NOT FOUND",
            )
        }
    }
}

fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|s| s.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("js") => "application/javascript",
        Some("wasm") => "application/wasm",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}
