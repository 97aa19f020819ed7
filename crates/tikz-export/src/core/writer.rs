//! Streaming renderer for bound documents

use std::io::Write;

use tracing::{debug, span, Level};

use super::{element_lines, Element, ExportError};

/// Writes an element's lines to an output sink as they are produced
pub struct TikzWriter<W: Write> {
    writer: W,
}

impl<W: Write> TikzWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write every line of `element`, each terminated by `\n`
    ///
    /// Returns the number of lines written. An element without lines writes
    /// nothing at all.
    pub fn write<E: Element + ?Sized>(&mut self, element: &E) -> Result<usize, ExportError> {
        let write_span = span!(Level::DEBUG, "write_picture");
        let _enter = write_span.enter();

        let mut count = 0;
        for line in element_lines(element) {
            writeln!(self.writer, "{}", line)?;
            count += 1;
        }
        self.writer.flush()?;

        debug!(lines = count, "Wrote document");
        Ok(count)
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
