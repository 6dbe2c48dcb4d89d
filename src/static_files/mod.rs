//! Serves the files of one directory, one GET route per file.
//!
//! A single configured file is treated as a template: every occurrence of
//! the template token is replaced with the current time before sending.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::config::StaticFilesConfig;
use crate::http::mime::mime_for_path;
use crate::http::request::{Method, Request};
use crate::http::response::Response;
use crate::routing::{Handler, HandlerTable};

pub struct StaticFileHandler {
    path: PathBuf,
    mime: &'static str,
    template_token: Option<String>,
}

impl StaticFileHandler {
    pub fn new(path: PathBuf) -> Self {
        let mime = mime_for_path(&path);
        Self {
            path,
            mime,
            template_token: None,
        }
    }

    /// Substitute `token` with the current timestamp on every request.
    pub fn with_template(mut self, token: impl Into<String>) -> Self {
        self.template_token = Some(token.into());
        self
    }
}

impl Handler for StaticFileHandler {
    fn handle(&self, _request: &Request, out: &mut dyn Write) -> io::Result<()> {
        let content = match &self.template_token {
            Some(token) => {
                let template = std::fs::read_to_string(&self.path)?;
                let now = OffsetDateTime::now_utc()
                    .format(&Rfc3339)
                    .map_err(io::Error::other)?;
                template.replace(token.as_str(), &now).into_bytes()
            }
            None => std::fs::read(&self.path)?,
        };

        Response::ok(self.mime, content).write_to(out)
    }
}

/// Registers a `GET /<name>` handler for every regular file in `cfg.root`.
///
/// A missing root is not an error; nothing is registered. Returns how many
/// routes were added (already-registered paths keep their handler).
pub fn register_static_files(table: &mut HandlerTable, cfg: &StaticFilesConfig) -> anyhow::Result<usize> {
    if !cfg.root.is_dir() {
        tracing::warn!(root = %cfg.root.display(), "Static root is not a directory, skipping");
        return Ok(0);
    }

    let entries = std::fs::read_dir(&cfg.root)
        .with_context(|| format!("failed to list {}", cfg.root.display()))?;

    let mut registered = 0;
    for entry in entries {
        let entry = entry.with_context(|| format!("failed to list {}", cfg.root.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let Some(name) = file_name(&path) else {
            tracing::warn!(path = %path.display(), "Skipping file with non UTF-8 name");
            continue;
        };

        let mut handler = StaticFileHandler::new(path.clone());
        if name == cfg.template {
            handler = handler.with_template(cfg.template_token.clone());
        }

        if table.register(Method::GET, format!("/{}", name), handler) {
            registered += 1;
        }
    }

    tracing::info!(root = %cfg.root.display(), registered, "Static files registered");
    Ok(registered)
}

fn file_name(path: &Path) -> Option<&str> {
    path.file_name()?.to_str()
}
