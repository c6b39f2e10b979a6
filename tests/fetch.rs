use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

use season_stats::StatsError;
use season_stats::io::fetch::{HttpSource, PageSource};

/// Serves a single request on a loopback port with the given status line and
/// body, returning the URL to hit.
fn serve_once(status_line: &'static str, body: &'static str) -> (String, thread::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("loopback listener");
    let addr = listener.local_addr().expect("listener address");

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("client connected");
        let mut reader = BufReader::new(stream.try_clone().expect("stream cloned"));
        let mut line = String::new();
        loop {
            line.clear();
            let read = reader.read_line(&mut line).expect("request line");
            if read == 0 || line == "\r\n" {
                break;
            }
        }
        let response = format!(
            "{status_line}\r\nContent-Type: text/html\r\nContent-Length: {}\r\n\
             Connection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).expect("response written");
        stream.flush().expect("response flushed");
    });

    (format!("http://{addr}/2026-ratings.html"), handle)
}

#[test]
fn non_success_status_is_an_extraction_error() {
    let (url, server) = serve_once("HTTP/1.1 404 Not Found", "missing");
    let source = HttpSource::new(Duration::from_secs(5)).expect("client built");

    let error = source
        .fetch_page(&url, "2026-ratings.html")
        .expect_err("page is missing");
    server.join().expect("server finished");

    match error {
        StatsError::Extraction { location, reason } => {
            assert_eq!(location, url);
            assert!(reason.contains("404"), "reason was {reason}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn successful_response_returns_the_markup() {
    let (url, server) = serve_once("HTTP/1.1 200 OK", "<table id=\"ratings\"></table>");
    let source = HttpSource::new(Duration::from_secs(5)).expect("client built");

    let body = source
        .fetch_page(&url, "2026-ratings.html")
        .expect("page fetched");
    server.join().expect("server finished");

    assert_eq!(body, "<table id=\"ratings\"></table>");
}
