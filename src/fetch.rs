// src/fetch.rs

// Sheet bytes from a URL (ureq) or a local path. Every fetch goes to the
// origin; nothing is cached here and caches on the way are told not to.

use std::{fmt, fs, io::{self, Read}, path::PathBuf, time::Duration};

use crate::config::consts::USER_AGENT;
use crate::error::LoadError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    Url(String),
    File(PathBuf),
}

impl Source {
    /// `http://` / `https://` → URL, anything else is a path.
    pub fn parse(s: &str) -> Self {
        let t = s.trim();
        let lc = t.to_ascii_lowercase();
        if lc.starts_with("http://") || lc.starts_with("https://") {
            Source::Url(s!(t))
        } else {
            Source::File(PathBuf::from(t))
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Url(u) => f.write_str(u),
            Source::File(p) => write!(f, "{}", p.display()),
        }
    }
}

pub fn fetch_bytes(source: &Source, timeout: Duration) -> Result<Vec<u8>, LoadError> {
    match source {
        Source::Url(url) => http_get(url, timeout),
        Source::File(path) => read_file(path, &source.to_string()),
    }
}

fn http_get(url: &str, timeout: Duration) -> Result<Vec<u8>, LoadError> {
    let agent = ureq::AgentBuilder::new()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build();

    let resp = match agent
        .get(url)
        .set("Cache-Control", "no-cache, no-store")
        .set("Pragma", "no-cache")
        .call()
    {
        Ok(r) => r,
        Err(ureq::Error::Status(code, _)) => {
            return Err(LoadError::ResourceNotFound { resource: s!(url), status: code });
        }
        Err(e) => {
            return Err(LoadError::Transport { resource: s!(url), reason: e.to_string() });
        }
    };

    let status = resp.status();
    if !(200..300).contains(&status) {
        return Err(LoadError::ResourceNotFound { resource: s!(url), status });
    }

    let mut buf = Vec::new();
    resp.into_reader()
        .read_to_end(&mut buf)
        .map_err(|e| LoadError::Io { resource: s!(url), source: e })?;
    logd!("Fetch: GET {} → {} ({} bytes)", url, status, buf.len());
    Ok(buf)
}

fn read_file(path: &PathBuf, resource: &str) -> Result<Vec<u8>, LoadError> {
    match fs::read(path) {
        Ok(bytes) => {
            logd!("Fetch: read {} ({} bytes)", resource, bytes.len());
            Ok(bytes)
        }
        // Same shape as an HTTP miss so callers see one "not found" error.
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(LoadError::ResourceNotFound { resource: s!(resource), status: 404 })
        }
        Err(e) => Err(LoadError::Io { resource: s!(resource), source: e }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_picks_url_or_path() {
        assert_eq!(Source::parse("https://x.test/promos.xlsx"), Source::Url(s!("https://x.test/promos.xlsx")));
        assert_eq!(Source::parse(" HTTP://x.test/a.xlsx "), Source::Url(s!("HTTP://x.test/a.xlsx")));
        assert_eq!(Source::parse("data/promos.xlsx"), Source::File(PathBuf::from("data/promos.xlsx")));
    }

    #[test]
    fn missing_file_reads_as_404() {
        let src = Source::File(PathBuf::from("definitely/not/here/promos.xlsx"));
        match fetch_bytes(&src, Duration::from_secs(1)) {
            Err(LoadError::ResourceNotFound { resource, status }) => {
                assert_eq!(status, 404);
                assert!(resource.ends_with("promos.xlsx"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
