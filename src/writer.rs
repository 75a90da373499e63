use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use anyhow::{Result, Context};
use brotli::enc::BrotliEncoderParams;
use brotli::CompressorWriter;
use crate::model::Trace;

/// Writes traces to disk in the same JSON shape the simulator returns.
pub struct TraceWriter {
    writer: Box<dyn Write>,
    pretty: bool,
    traces_written: usize,
}

impl TraceWriter {
    /// Creates a new TraceWriter for the specified file path.
    ///
    /// Automatically enables Brotli compression if the file path ends with `.br`
    /// (e.g., `trace.json.br`).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use rsched::{TraceWriter, Trace};
    /// # fn main() -> anyhow::Result<()> {
    /// let mut writer = TraceWriter::new("trace.json.br")?;
    /// writer.write_trace(&Trace::default())?;
    /// writer.finish()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(file_path: impl AsRef<Path>) -> Result<Self> {
        let file_path = file_path.as_ref();
        let file = File::create(file_path)
            .with_context(|| format!("Failed to create file: {}", file_path.display()))?;

        let compressed = file_path.extension().map(|ext| ext == "br").unwrap_or(false);
        let writer: Box<dyn Write> = if compressed {
            let buf_writer = BufWriter::new(file);
            let params = BrotliEncoderParams {
                quality: 6,  // Balanced compression
                lgwin: 22,   // Window size
                ..Default::default()
            };
            Box::new(CompressorWriter::with_params(buf_writer, 4096, &params))
        } else {
            Box::new(BufWriter::new(file))
        };

        Ok(TraceWriter {
            writer,
            pretty: false,
            traces_written: 0,
        })
    }

    /// Emits indented JSON instead of a single line.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn write_trace(&mut self, trace: &Trace) -> Result<()> {
        let json = if self.pretty {
            serde_json::to_string_pretty(trace)
        } else {
            serde_json::to_string(trace)
        }
        .context("Failed to serialize trace to JSON")?;

        writeln!(self.writer, "{}", json)
            .context("Failed to write trace")?;

        self.traces_written += 1;
        Ok(())
    }

    pub fn traces_written(&self) -> usize {
        self.traces_written
    }

    /// Flushes and closes the file. Compressed output is only complete after this.
    pub fn finish(mut self) -> Result<()> {
        self.writer.flush().context("Failed to flush writer")?;
        Ok(())
    }
}
