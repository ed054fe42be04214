//! Throwaway HTTP server for exercising the clients without real APIs.

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::JoinHandle;
use std::time::Duration;

/// Serves exactly one request on an ephemeral localhost port.
pub struct CannedServer {
    pub base_url: String,
    handle: JoinHandle<String>,
}

impl CannedServer {
    /// Answers the first request with `status` and a JSON `body`.
    pub fn respond(status: u16, body: &str) -> Self {
        let body = body.to_string();
        Self::spawn(move |mut stream, head| {
            let reason = match status {
                200 => "OK",
                401 => "Unauthorized",
                404 => "Not Found",
                500 => "Internal Server Error",
                _ => "Status",
            };
            let response = format!(
                "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                reason,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
            head
        })
    }

    /// Accepts the request and then says nothing for `hold`.
    pub fn silent(hold: Duration) -> Self {
        Self::spawn(move |_stream, head| {
            std::thread::sleep(hold);
            head
        })
    }

    fn spawn<F>(handler: F) -> Self
    where
        F: FnOnce(TcpStream, String) -> String + Send + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = std::thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let head = read_head(&stream);
            handler(stream, head)
        });

        Self {
            base_url: format!("http://{}", addr),
            handle,
        }
    }

    /// Waits for the request to be served and returns its request line and headers.
    pub fn request_head(self) -> String {
        self.handle.join().unwrap()
    }
}

fn read_head(stream: &TcpStream) -> String {
    let mut reader = BufReader::new(stream.try_clone().unwrap());
    let mut head = String::new();
    loop {
        let mut line = String::new();
        let read = reader.read_line(&mut line).unwrap();
        if read == 0 || line == "\r\n" {
            break;
        }
        head.push_str(&line);
    }
    head
}
