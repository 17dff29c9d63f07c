//! Line-oriented output sink shared by the trace, the disassembler and the
//! state reporters.

/// Sink for every human-readable line the simulator emits.
///
/// The run loop, the environment calls, the linear disassembler and the
/// reporters all write to one sink in a fixed order, so embedders and
/// tests capture a full session deterministically.
pub trait TraceSink {
    /// Appends one line. `text` carries no trailing newline.
    fn line(&mut self, text: &str);
}

/// Growable in-memory sink; the CLI writes its buffer out in one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringSink {
    buf: String,
}

impl StringSink {
    /// Empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything captured so far, newline-terminated per line.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Consumes the sink and returns the captured text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.buf
    }
}

impl TraceSink for StringSink {
    fn line(&mut self, text: &str) {
        self.buf.push_str(text);
        self.buf.push('\n');
    }
}

impl TraceSink for Vec<String> {
    fn line(&mut self, text: &str) {
        self.push(text.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::{StringSink, TraceSink};

    #[test]
    fn string_sink_terminates_every_line() {
        let mut sink = StringSink::new();
        sink.line("first");
        sink.line("");
        sink.line("third");
        assert_eq!(sink.as_str(), "first\n\nthird\n");
    }

    #[test]
    fn vec_sink_preserves_emission_order() {
        let mut sink: Vec<String> = Vec::new();
        sink.line("a");
        sink.line("b");
        assert_eq!(sink, ["a", "b"]);
    }
}
