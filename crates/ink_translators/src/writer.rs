//! Line oriented output with indentation

/// Accumulates rendered source one line at a time
#[derive(Debug)]
pub struct SourceWriter {
    indent: &'static str,
    depth: usize,
    output: String,
}

impl SourceWriter {
    /// Creates a writer that indents each level with `indent`
    pub fn new(indent: &'static str) -> Self {
        Self {
            indent,
            depth: 0,
            output: String::new(),
        }
    }

    /// Writes a line at the current depth
    pub fn line(&mut self, line: impl AsRef<str>) {
        for _ in 0..self.depth {
            self.output.push_str(self.indent);
        }
        self.output.push_str(line.as_ref());
        self.output.push('\n');
    }

    /// Writes a line that opens a block, then indents
    pub fn open(&mut self, line: impl AsRef<str>) {
        self.line(line);
        self.depth += 1;
    }

    /// Dedents, then writes the line that closes a block
    pub fn close(&mut self, line: impl AsRef<str>) {
        self.depth = self.depth.saturating_sub(1);
        self.line(line);
    }

    /// Closes a block and opens the next one on the same line, like `} else {`
    pub fn reopen(&mut self, line: impl AsRef<str>) {
        self.depth = self.depth.saturating_sub(1);
        self.open(line);
    }

    /// Writes an empty line, unless nothing has been written or the last line is already empty
    pub fn blank_line(&mut self) {
        if !self.output.is_empty() && !self.output.ends_with("\n\n") {
            self.output.push('\n');
        }
    }

    /// How many blocks are currently open
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The written source, ending with exactly one newline
    pub fn finish(self) -> String {
        let trimmed = self.output.trim_end();
        if trimmed.is_empty() {
            String::new()
        } else {
            format!("{trimmed}\n")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn nested_blocks() {
        let mut writer = SourceWriter::new("  ");
        writer.open("if (a) {");
        writer.line("b();");
        writer.reopen("} else {");
        writer.open("while (c) {");
        writer.line("d();");
        writer.close("}");
        writer.close("}");
        assert_eq!(
            writer.finish(),
            "if (a) {\n  b();\n} else {\n  while (c) {\n    d();\n  }\n}\n"
        );
    }

    #[test]
    fn blank_lines_do_not_stack() {
        let mut writer = SourceWriter::new("    ");
        writer.blank_line();
        writer.line("a");
        writer.blank_line();
        writer.blank_line();
        writer.line("b");
        writer.blank_line();
        assert_eq!(writer.finish(), "a\n\nb\n");
    }
}
