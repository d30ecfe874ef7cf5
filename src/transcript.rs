//! Line-oriented progress log shown to the operator.

const SEPARATOR_WIDTH: usize = 80;

#[derive(Debug, Default)]
pub struct Transcript {
    lines: Vec<String>,
    echo: bool,
}

impl Transcript {
    /// Prints each line to stdout as it is recorded.
    pub fn echoing() -> Self {
        Self {
            lines: Vec::new(),
            echo: true,
        }
    }

    pub fn captured() -> Self {
        Self::default()
    }

    pub fn line(&mut self, line: impl Into<String>) {
        let line = line.into();
        if self.echo {
            println!("{}", line);
        }
        self.lines.push(line);
    }

    pub fn blank(&mut self) {
        self.line("");
    }

    pub fn separator(&mut self) {
        self.line("-".repeat(SEPARATOR_WIDTH));
    }

    pub fn heading(&mut self, title: &str) {
        self.line(title);
        self.separator();
    }

    /// Appends lines produced elsewhere (e.g. by a pool worker).
    pub fn extend<I: IntoIterator<Item = String>>(&mut self, lines: I) {
        for line in lines {
            self.line(line);
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn last(&self) -> Option<&str> {
        self.lines.last().map(|s| s.as_str())
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.contains(needle))
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}
