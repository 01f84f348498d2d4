// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Page unavailable: {url} ({reason})")]
    PageUnavailable { url: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A data file the analysis needs has not been produced yet.
    #[error("Could not find {}", path.display())]
    MissingFile { path: PathBuf, hint: &'static str },

    /// Two collections that are paired by position have different lengths.
    #[error("{what} mismatch in {context}: {left} vs {right}")]
    Misaligned {
        what: &'static str,
        context: String,
        left: usize,
        right: usize,
    },

    #[error("Login failed: {0}")]
    Login(String),

    #[error("Unknown specialization: {0}")]
    UnknownTrack(String),

    #[error("Input error: {0}")]
    Prompt(String),
}

impl Error {
    /// Actionable follow-up for errors the user can fix by running another step.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Error::MissingFile { hint, .. } => Some(hint),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
