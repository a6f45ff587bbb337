//! Byte-range file streaming.
//!
//! [`RangeFile`] is a [`RouteHandler`] that serves one file from disk and honours a single
//! `Range: bytes=start-[end]` request header, which is what HTML5 video players send while
//! seeking.
//!
//! ```rust,no_run
//! use restroute::router::Router;
//! use restroute::streaming::RangeFile;
//! use http::Method;
//!
//! let mut router = Router::new("/media");
//! router.handle(Method::GET, "/intro", RangeFile::new("assets/intro.mp4"));
//! ```

use std::fmt;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use tracing::{debug, error};

use crate::context::RouteContext;
use crate::dispatcher::{HandlerRequest, HandlerResponse, ResponseBody, RouteHandler};

/// Why a `Range` header could not be served
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    /// Not of the form `bytes=start-[end]`
    Malformed { header: String },
    /// Well-formed but outside the file
    Unsatisfiable { start: u64, end: u64, size: u64 },
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeError::Malformed { header } => write!(f, "malformed range header '{}'", header),
            RangeError::Unsatisfiable { start, end, size } => write!(
                f,
                "range {}-{} not satisfiable for {} bytes",
                start, end, size
            ),
        }
    }
}

impl std::error::Error for RangeError {}

/// Parse a single byte range against a file of `size` bytes.
///
/// Returns the inclusive `(start, end)` pair. An omitted end means "to the last byte".
pub fn parse_range(header: &str, size: u64) -> Result<(u64, u64), RangeError> {
    let malformed = || RangeError::Malformed {
        header: header.to_string(),
    };
    let (unit, ranges) = header.split_once('=').ok_or_else(malformed)?;
    if unit.trim() != "bytes" || ranges.contains(',') {
        return Err(malformed());
    }
    let (start, end) = ranges.trim().split_once('-').ok_or_else(malformed)?;
    let start: u64 = start.parse().map_err(|_| malformed())?;
    let end: u64 = if end.is_empty() {
        match size.checked_sub(1) {
            Some(last) => last,
            None => return Err(RangeError::Unsatisfiable { start, end: 0, size }),
        }
    } else {
        end.parse().map_err(|_| malformed())?
    };
    if start > end || end >= size {
        return Err(RangeError::Unsatisfiable { start, end, size });
    }
    Ok((start, end))
}

/// Guess a content type from the file extension
pub fn content_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase()
        .as_str()
    {
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mp3" => "audio/mpeg",
        "html" => "text/html",
        "css" => "text/css",
        "js" => "application/javascript",
        "json" => "application/json",
        "txt" => "text/plain",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        _ => "application/octet-stream",
    }
}

/// Serves a file with byte-range support.
///
/// - no `Range` header: 200 with the whole file
/// - satisfiable range: 206 with `Content-Range: bytes start-end/size`
/// - malformed or out-of-bounds range: 416 `Invalid range`
/// - missing file: 404 `File not found`
///
/// # Limitations
///
/// [`HandlerResponse`] carries its body as an owned buffer, so the requested bytes are read
/// into memory before the response is returned. Without a `Range` header that is the whole
/// file. Serve large media through ranged requests (which is what video players send) or
/// from the host server's own static file handler.
#[derive(Debug, Clone)]
pub struct RangeFile {
    path: PathBuf,
    content_type: Option<String>,
}

impl RangeFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            content_type: None,
        }
    }

    /// Override the extension-based content type
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    #[must_use]
    pub fn content_type(&self) -> &str {
        self.content_type
            .as_deref()
            .unwrap_or_else(|| content_type_for(&self.path))
    }

    fn read_range(file: &mut File, start: u64, len: u64) -> io::Result<Vec<u8>> {
        file.seek(SeekFrom::Start(start))?;
        let mut buf = vec![0u8; len as usize];
        file.read_exact(&mut buf)?;
        Ok(buf)
    }

    fn serve(&self, req: &HandlerRequest, res: &mut HandlerResponse) -> io::Result<()> {
        let mut file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "range file not found");
                res.set_error(404, "File not found");
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        let size = file.metadata()?.len();
        res.set_header("content-type", self.content_type().to_string());

        let Some(range) = req.get_header("range") else {
            let mut body = Vec::with_capacity(size as usize);
            file.read_to_end(&mut body)?;
            res.status = 200;
            res.set_header("content-length", body.len().to_string());
            res.body = ResponseBody::Bytes(body);
            return Ok(());
        };

        let (start, end) = match parse_range(range, size) {
            Ok(r) => r,
            Err(e) => {
                debug!(error = %e, "rejecting range request");
                res.set_header("content-range", format!("bytes */{}", size));
                res.set_error(416, "Invalid range");
                return Ok(());
            }
        };
        let len = end - start + 1;
        let body = Self::read_range(&mut file, start, len)?;
        res.status = 206;
        res.set_header("accept-ranges", "bytes".to_string());
        res.set_header("content-range", format!("bytes {}-{}/{}", start, end, size));
        res.set_header("content-length", len.to_string());
        res.body = ResponseBody::Bytes(body);
        Ok(())
    }
}

impl RouteHandler for RangeFile {
    fn handle(&self, req: &HandlerRequest, res: &mut HandlerResponse, _ctx: &mut RouteContext) {
        if let Err(e) = self.serve(req, res) {
            error!(path = %self.path.display(), error = %e, "failed to stream file");
            res.set_error(500, "Unable to read file");
        }
    }
}
