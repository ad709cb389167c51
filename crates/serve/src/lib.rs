//! > An HTTP server for previewing a site while editing it
//!
//! Every request is handed to a [`Handler`] which decides what to reply with, so the caller can
//! rebuild whatever it needs per request.  It prioritizes small size and compile times over
//! speed, scalability, or security.
//!
//! # Example
//!
//! ```rust,no_run
//! use brage_serve::Reply;
//!
//! let server = brage_serve::Server::new(|path: &str| match path {
//!     "/" => Reply::Html("<h1>Hello</h1>".to_owned()),
//!     _ => Reply::NotFound,
//! });
//!
//! println!("See http://{}", server.addr());
//! println!("Hit CTRL-C to stop");
//!
//! server.serve().unwrap();
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

use std::str::FromStr;
use std::sync::RwLock;
use std::sync::TryLockError;

/// What to send back for a request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    /// A rendered document.
    Html(String),
    /// A file on disk, with the content type guessed from its extension.
    File(std::path::PathBuf),
    NotFound,
    /// Rendering failed; shown to the user as a 500.
    Error(String),
}

/// Produces a [`Reply`] for a normalized request path.
///
/// The path always starts with `/`, has no query string, and has no trailing `/` unless it is
/// the root.
pub trait Handler {
    fn handle(&self, path: &str) -> Reply;
}

impl<F> Handler for F
where
    F: Fn(&str) -> Reply,
{
    fn handle(&self, path: &str) -> Reply {
        self(path)
    }
}

/// Custom server settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerBuilder {
    hostname: Option<String>,
    port: Option<u16>,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self {
            hostname: None,
            port: None,
        }
    }

    /// Override the hostname
    pub fn hostname(&mut self, hostname: impl Into<String>) -> &mut Self {
        self.hostname = Some(hostname.into());
        self
    }

    /// Override the port
    ///
    /// By default, the first available port is selected.
    pub fn port(&mut self, port: u16) -> &mut Self {
        self.port = Some(port);
        self
    }

    /// Create a server
    ///
    /// This is needed for accessing the dynamically assigned port
    pub fn build<H: Handler>(&self, handler: H) -> Server<H> {
        let hostname = self.hostname.as_deref().unwrap_or("localhost");
        let port = self
            .port
            .or_else(|| get_available_port(hostname))
            // Just have `serve` error out
            .unwrap_or(3000);

        Server {
            handler,
            addr: format!("{hostname}:{port}"),
            server: RwLock::new(None),
        }
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Server<H> {
    handler: H,
    addr: String,
    server: RwLock<Option<tiny_http::Server>>,
}

impl<H: Handler> Server<H> {
    /// The address the server is available at
    ///
    /// This is useful for telling users how to access the site since the port is dynamically
    /// assigned by default.
    pub fn addr(&self) -> &str {
        self.addr.as_str()
    }

    /// Whether the server was running at the instant the call happened
    pub fn is_running(&self) -> bool {
        matches!(self.server.read().as_deref(), Ok(Some(_)))
    }

    /// Start the webserver, blocking for as long as requests arrive
    pub fn serve(&self) -> Result<(), Error> {
        match self.server.try_write().as_deref_mut() {
            Ok(server @ None) => {
                *server = Some(tiny_http::Server::http(self.addr()).map_err(Error::new)?);
            }
            Ok(Some(_)) | Err(TryLockError::WouldBlock) => {
                return Err(Error::new("the server is running"));
            }
            Err(error @ TryLockError::Poisoned(_)) => return Err(Error::new(error)),
        }

        {
            let server = self.server.read().map_err(Error::new)?;
            if let Some(server) = server.as_ref() {
                for request in server.incoming_requests() {
                    if let Err(e) = self.respond(request) {
                        log::error!("{e}");
                    }
                }
            }
        }

        *self.server.write().map_err(Error::new)? = None;

        Ok(())
    }

    fn respond(&self, req: tiny_http::Request) -> Result<(), Error> {
        let path = normalize_path(req.url());
        let reply = self.handler.handle(&path);
        log::info!("{} {} => {}", req.method(), req.url(), reply_status(&reply));

        match reply {
            Reply::Html(html) => req.respond(
                tiny_http::Response::from_string(html).with_header(content_type("text/html")?),
            ),
            Reply::File(file_path) => {
                let file = match std::fs::File::open(&file_path) {
                    Ok(file) => file,
                    Err(e) => {
                        log::warn!("Unable to open {}: {e}", file_path.display());
                        return respond_not_found(req);
                    }
                };
                let mut response = tiny_http::Response::from_file(file);
                if let Some(mime) = mime_guess::MimeGuess::from_path(&file_path).first_raw() {
                    response.add_header(content_type(mime)?);
                }
                req.respond(response)
            }
            Reply::NotFound => return respond_not_found(req),
            Reply::Error(message) => req.respond(
                tiny_http::Response::from_string(format!(
                    "<h1>Error</h1>\n<pre>{}</pre>",
                    escape_html(&message)
                ))
                .with_status_code(500)
                .with_header(content_type("text/html")?),
            ),
        }
        .map_err(Error::new)
    }
}

/// Serve Error
#[derive(Debug)]
pub struct Error {
    message: String,
}

impl Error {
    fn new(message: impl ToString) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.message.fmt(fmt)
    }
}

impl std::error::Error for Error {}

/// Strip the query string and trailing slash from a request URL.
pub fn normalize_path(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let path = path.trim_end_matches('/');
    if path.is_empty() {
        "/".to_owned()
    } else if path.starts_with('/') {
        path.to_owned()
    } else {
        format!("/{path}")
    }
}

fn respond_not_found(req: tiny_http::Request) -> Result<(), Error> {
    req.respond(
        tiny_http::Response::from_string("<h1> <center> 404: Page not found </center> </h1>")
            .with_status_code(404)
            .with_header(content_type("text/html")?),
    )
    .map_err(Error::new)
}

fn content_type(mime: &str) -> Result<tiny_http::Header, Error> {
    tiny_http::Header::from_str(&format!("Content-Type: {mime}"))
        .map_err(|()| Error::new(format!("invalid content type `{mime}`")))
}

fn reply_status(reply: &Reply) -> u16 {
    match reply {
        Reply::Html(_) | Reply::File(_) => 200,
        Reply::NotFound => 404,
        Reply::Error(_) => 500,
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn get_available_port(host: &str) -> Option<u16> {
    // Start after "well-known" ports (0-1023) as they require superuser
    // privileges on UNIX-like operating systems.
    (1024..9000).find(|port| port_is_available(host, *port))
}

fn port_is_available(host: &str, port: u16) -> bool {
    std::net::TcpListener::bind((host, port)).is_ok()
}
