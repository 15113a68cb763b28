//! Newline framing for NDJSON stream bodies.

/// Accumulates raw bytes and yields newline-terminated segments.
///
/// Bytes after the last newline stay buffered until a later chunk completes
/// the line, so records split across reads reassemble exactly. Empty
/// segments (newline runs, keep-alive blank lines) are skipped.
#[derive(Debug, Default)]
pub(crate) struct LineSplitter {
    buffer: Vec<u8>,
}

impl LineSplitter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends `chunk` and returns every complete segment, oldest first.
    pub(crate) fn push(&mut self, chunk: &[u8]) -> Vec<Vec<u8>> {
        self.buffer.extend_from_slice(chunk);
        let Some(last) = self.buffer.iter().rposition(|&byte| byte == b'\n') else {
            return Vec::new();
        };
        let rest = self.buffer.split_off(last + 1);
        let complete = std::mem::replace(&mut self.buffer, rest);
        complete
            .split(|&byte| byte == b'\n')
            .filter(|segment| !segment.is_empty())
            .map(<[u8]>::to_vec)
            .collect()
    }

    /// The retained partial line, if any.
    #[cfg(test)]
    pub(crate) fn pending(&self) -> &[u8] {
        &self.buffer
    }
}
