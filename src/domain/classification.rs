use super::SentimentLabel;

/// Fallback line shown when there is nothing to classify.
pub const NO_INPUT_MESSAGE: &str = "No input found";

/// One (label, confidence) pair as reported by the model.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassificationResult {
    pub label: String,
    pub confidence: f64,
}

impl ClassificationResult {
    pub fn new(label: impl Into<String>, confidence: f64) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}

/// Unordered model output for a single inference call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClassificationOutput {
    results: Vec<ClassificationResult>,
}

impl ClassificationOutput {
    pub fn new(results: Vec<ClassificationResult>) -> Self {
        Self { results }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassificationResult> {
        self.results.iter()
    }
}

impl From<Vec<ClassificationResult>> for ClassificationOutput {
    fn from(results: Vec<ClassificationResult>) -> Self {
        Self::new(results)
    }
}

impl FromIterator<ClassificationResult> for ClassificationOutput {
    fn from_iter<I: IntoIterator<Item = ClassificationResult>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Scores keyed by sentiment rather than by position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SentimentScores {
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
}

impl SentimentScores {
    pub fn get(&self, label: SentimentLabel) -> f64 {
        match label {
            SentimentLabel::Positive => self.positive,
            SentimentLabel::Neutral => self.neutral,
            SentimentLabel::Negative => self.negative,
        }
    }
}

/// Display lines in the fixed order Positive, Neutral, Negative.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormattedResult {
    lines: [String; 3],
}

impl FormattedResult {
    pub fn from_scores(scores: &SentimentScores) -> Self {
        let lines = SentimentLabel::ALL
            .map(|label| format!("{}: {}", label.display_name(), scores.get(label)));
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines.into()
    }
}

/// What the result page is asked to show.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Scores(FormattedResult),
    NoInput,
}

impl Verdict {
    pub fn into_lines(self) -> Vec<String> {
        match self {
            Self::Scores(result) => result.into_lines(),
            Self::NoInput => vec![NO_INPUT_MESSAGE.to_string()],
        }
    }
}
