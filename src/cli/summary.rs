/// How a single lookup was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A non-empty translation was found
    Translated,
    /// The phrase was already registered but has no translation yet
    Pending,
    /// The phrase was seen for the first time and registered
    Registered,
    /// The phrase was empty and passed through untouched
    Empty,
}

pub struct TranslationSummary {
    total: usize,
    translated: usize,
    pending: usize,
    registered: usize,
    empty: usize,
}

impl TranslationSummary {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            translated: 0,
            pending: 0,
            registered: 0,
            empty: 0,
        }
    }

    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Translated => self.translated += 1,
            Outcome::Pending => self.pending += 1,
            Outcome::Registered => self.registered += 1,
            Outcome::Empty => self.empty += 1,
        }
    }

    pub fn lines(&self) -> Vec<String> {
        vec![
            "=".repeat(60),
            "Summary:".to_string(),
            format!("  Phrases:     {}", self.total),
            format!("  Translated:  {}", self.translated),
            format!("  Pending:     {}", self.pending),
            format!("  Registered:  {}", self.registered),
            format!("  Empty:       {}", self.empty),
            "=".repeat(60),
        ]
    }

    /// Prints the summary to stderr so stdout only carries translations
    pub fn finish(&self) {
        for line in self.lines() {
            eprintln!("{}", line);
        }
    }
}
