//! A one-shot HTTP/1.1 server for exercising the network clients.

#![allow(dead_code)]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};

#[derive(Debug)]
pub struct Request {
	pub method: String,
	pub path: String,
	pub headers: Vec<(String, String)>,
	pub body: Vec<u8>,
}

impl Request {
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}
}

fn read_request(stream: &TcpStream) -> Request {
	let mut reader = BufReader::new(stream);

	let mut line = String::new();
	reader.read_line(&mut line).unwrap();
	let mut parts = line.split_whitespace();
	let method = parts.next().unwrap().to_string();
	let path = parts.next().unwrap().to_string();

	let mut headers = Vec::new();
	loop {
		let mut line = String::new();
		reader.read_line(&mut line).unwrap();
		let line = line.trim_end();
		if line.is_empty() {
			break;
		}
		let (key, value) = line.split_once(':').unwrap();
		headers.push((key.trim().to_string(), value.trim().to_string()));
	}

	let length = headers.iter()
		.find(|(key, _)| key.eq_ignore_ascii_case("content-length"))
		.map(|(_, value)| value.parse::<usize>().unwrap())
		.unwrap_or(0);
	let mut body = vec![0; length];
	reader.read_exact(&mut body).unwrap();

	Request { method, path, headers, body }
}

fn write_response(mut stream: TcpStream, status: u16, body: &[u8]) {
	let head = format!("HTTP/1.1 {status} Test\r\nContent-Length: {}\r\nConnection: close\r\n\r\n", body.len());
	stream.write_all(head.as_bytes()).unwrap();
	stream.write_all(body).unwrap();
	stream.flush().unwrap();
}

/// Serves exactly `count` requests, one connection each, and hands back what it saw.
/// The handler sees every request so far, the current one last.
pub fn serve<F>(count: usize, mut handler: F) -> (String, JoinHandle<Vec<Request>>)
where
	F: FnMut(&[Request]) -> (u16, Vec<u8>) + Send + 'static,
{
	let listener = TcpListener::bind("127.0.0.1:0").unwrap();
	let endpoint = format!("http://{}", listener.local_addr().unwrap());

	let handle = thread::spawn(move || {
		let mut requests = Vec::new();
		for _ in 0..count {
			let (stream, _) = listener.accept().unwrap();
			requests.push(read_request(&stream));
			let (status, body) = handler(&requests);
			write_response(stream, status, &body);
		}
		requests
	});

	(endpoint, handle)
}
