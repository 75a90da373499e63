//! Trace file parsing.
//!
//! A trace file is the JSON body of a `/simulate` response saved to disk.
//! Files ending in `.br` are Brotli-compressed.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use brotli::Decompressor;
use crate::model::Trace;
use crate::traits::TraceReader;

/// Parses a trace from its JSON text.
pub fn parse_trace(json: &str) -> Result<Trace> {
    let trace: Trace = serde_json::from_str(json)
        .context("Trace does not match the expected history/statistics schema")?;
    Ok(trace)
}

/// Reads and parses a trace file, decompressing it if the name ends in `.br`.
pub fn read_trace_file(file_path: &Path) -> Result<Trace> {
    let file = File::open(file_path)
        .with_context(|| format!("Failed to open file: {}", file_path.display()))?;

    let mut reader: Box<dyn Read> = if is_brotli_path(file_path) {
        Box::new(BufReader::new(Decompressor::new(file, 4096)))
    } else {
        Box::new(BufReader::new(file))
    };

    let mut json = String::new();
    reader
        .read_to_string(&mut json)
        .with_context(|| format!("Failed to read file: {}", file_path.display()))?;

    parse_trace(&json).with_context(|| format!("Invalid trace file: {}", file_path.display()))
}

fn is_brotli_path(path: &Path) -> bool {
    path.extension().map(|ext| ext == "br").unwrap_or(false)
}

/// Reads traces previously saved to disk.
pub struct FileTraceReader {
    path: PathBuf,
}

impl FileTraceReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TraceReader for FileTraceReader {
    fn read(&self) -> Result<Trace> {
        tracing::info!(path = %self.path.display(), "reading trace file");
        read_trace_file(&self.path)
    }

    fn describe(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}
