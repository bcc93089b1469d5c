//! HTTP download of the archive body.

use anyhow::Result;
use anyhow::bail;
use std::io::Read;

/// An open HTTP response body.
pub struct Download {
    /// Streaming reader over the response body.
    pub body: Box<dyn Read + Send + Sync + 'static>,
    /// Value of the `Content-Length` header, if present and numeric.
    pub content_length: Option<u64>,
}

/// Issues a GET request for `url`.
///
/// Redirects are followed. Any final status other than `200 OK` is an error
/// carrying the status line.
pub fn fetch(url: &str) -> Result<Download> {
    let response = match ureq::get(url).call() {
        Ok(response) => response,
        Err(ureq::Error::Status(code, response)) => {
            bail!("{code} {}", response.status_text());
        }
        Err(err) => return Err(anyhow::Error::new(err).context(format!("GET {url}"))),
    };

    if response.status() != 200 {
        bail!("{} {}", response.status(), response.status_text());
    }

    let content_length = response
        .header("Content-Length")
        .and_then(|len| len.parse().ok());

    Ok(Download {
        body: response.into_reader(),
        content_length,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::net::TcpListener;
    use std::thread;

    /// Serves one canned HTTP response and returns the URL to request.
    fn serve_once(response: &'static [u8]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf);
            stream.write_all(response).unwrap();
        });
        format!("http://{addr}/archive.tar")
    }

    #[test]
    fn test_fetch_ok() {
        let url = serve_once(b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\nConnection: close\r\n\r\nhello");
        let mut download = fetch(&url).unwrap();
        assert_eq!(download.content_length, Some(5));

        let mut body = String::new();
        download.body.read_to_string(&mut body).unwrap();
        assert_eq!(body, "hello");
    }

    #[test]
    fn test_fetch_not_found() {
        let url = serve_once(
            b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        );
        let err = fetch(&url).err().unwrap();
        assert_eq!(err.to_string(), "404 Not Found");
    }

    #[test]
    fn test_fetch_non_200_success_is_error() {
        let url = serve_once(b"HTTP/1.1 204 No Content\r\nConnection: close\r\n\r\n");
        let err = fetch(&url).err().unwrap();
        assert!(err.to_string().starts_with("204"));
    }

    #[test]
    fn test_fetch_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        assert!(fetch(&format!("http://{addr}/a.tar.gz")).is_err());
    }
}
