//! Brace-aware line writer for generated Go code.
//!
//! Lines ending in `{` open a level and lines starting with `}` close one,
//! so callers write unindented lines and get gofmt-style tab indentation.
//! Blank lines collapse to one and never follow an opening or precede a
//! closing brace.

#[derive(Debug, Default)]
pub struct GoWriter {
    out: String,
    depth: usize,
    pending_blank: bool,
    after_open: bool,
}

impl GoWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write one line of code
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref().trim();
        let closes = text.starts_with('}');
        if closes {
            self.depth = self.depth.saturating_sub(1);
        }
        if self.pending_blank && !closes && !self.after_open && !self.out.is_empty() {
            self.out.push('\n');
        }
        self.pending_blank = false;

        for _ in 0..self.depth {
            self.out.push('\t');
        }
        self.out.push_str(text);
        self.out.push('\n');

        self.after_open = text.ends_with('{');
        if self.after_open {
            self.depth += 1;
        }
    }

    /// Request a blank line before the next line
    pub fn blank(&mut self) {
        self.pending_blank = true;
    }

    /// Write each line of a block
    pub fn lines<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.line(line);
        }
    }

    pub fn finish(self) -> String {
        self.out
    }
}

#[cfg(test)]
#[path = "writer/writer_tests.rs"]
mod writer_tests;
