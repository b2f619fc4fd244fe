/// Line buffer with a stack of indentation levels.
#[derive(Debug, Clone)]
pub struct CodeWriter {
    lines: Vec<String>,
    indent_unit: String,
    depth: usize,
}

impl CodeWriter {
    pub fn new(indent_unit: impl Into<String>) -> Self {
        Self {
            lines: Vec::new(),
            indent_unit: indent_unit.into(),
            depth: 0,
        }
    }

    pub fn indent(&mut self) {
        self.depth += 1;
    }

    pub fn outdent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Append a line at the current indentation. Empty lines carry no indent.
    pub fn write_line(&mut self, line: &str) {
        if line.is_empty() {
            self.lines.push(String::new());
        } else {
            self.lines
                .push(format!("{}{}", self.indent_unit.repeat(self.depth), line));
        }
    }

    pub fn blank_line(&mut self) {
        self.write_line("");
    }

    /// Buffered text with every line newline-terminated.
    pub fn into_text(self) -> String {
        let mut text = String::with_capacity(self.lines.iter().map(|l| l.len() + 1).sum());
        for line in self.lines {
            text.push_str(&line);
            text.push('\n');
        }
        text
    }
}
