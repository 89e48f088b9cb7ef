//! Newline index for byte offset to 1-based line mapping.
//!
//! One pass over the bytes records every '\n'; lookups binary-search the
//! recorded positions. Offsets on a '\n' belong to the line that newline
//! terminates, which is what line-comment spans need.

#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte positions of every '\n' in the buffer.
    nl_positions: Vec<usize>,
    /// Total byte length of the buffer.
    len: usize,
}

impl LineIndex {
    /// Build an index recording positions of '\n'.
    pub fn build(bytes: &[u8]) -> Self {
        let mut nl_positions = Vec::with_capacity(bytes.len() / 48);
        let mut i = 0usize;

        while let Some(pos) = memchr::memchr(b'\n', &bytes[i..]) {
            let abs = i + pos;
            nl_positions.push(abs);
            i = abs + 1;
        }

        Self {
            nl_positions,
            len: bytes.len(),
        }
    }

    /// Total number of logical lines.
    /// Empty buffer => 0 lines; else (#'\n' + 1).
    pub fn line_count(&self) -> usize {
        if self.len == 0 {
            0
        } else {
            self.nl_positions.len() + 1
        }
    }

    /// 1-based line number of the given byte offset.
    /// Counts the newlines strictly before `byte`; exact even when the final
    /// line has no terminating '\n'.
    pub fn line_of(&self, byte: usize) -> u32 {
        let before = self.nl_positions.partition_point(|&nl| nl < byte);
        (before + 1) as u32
    }
}
