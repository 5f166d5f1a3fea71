//! JSON-lines record sink.
//!
//! Writes each record as one compact JSON object followed by `\n`. Upserts
//! are append-only here: replaying the same bundle appends identical lines,
//! and the consumer keeps the last line per `id`.

use std::io::{BufWriter, Write};
use std::sync::Mutex;

use chainbundle_core::error::SinkError;
use chainbundle_core::record::Record;
use chainbundle_core::sink::RecordSink;

pub struct JsonLinesSink<W: Write + Send> {
    out: Mutex<BufWriter<W>>,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out: Mutex::new(BufWriter::new(out)) }
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> Result<W, SinkError> {
        let out = self.out.into_inner().map_err(|_| SinkError::Poisoned)?;
        out.into_inner().map_err(|e| SinkError::Io(e.into_error()))
    }
}

impl JsonLinesSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> RecordSink for JsonLinesSink<W> {
    fn upsert(&self, record: Record) -> Result<(), SinkError> {
        let mut out = self.out.lock().map_err(|_| SinkError::Poisoned)?;
        serde_json::to_writer(&mut *out, &record)?;
        out.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&self) -> Result<(), SinkError> {
        self.out.lock().map_err(|_| SinkError::Poisoned)?.flush()?;
        Ok(())
    }
}
