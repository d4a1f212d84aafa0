pub mod classification;
pub mod label;

pub use classification::{
    ClassificationOutput, ClassificationResult, FormattedResult, NO_INPUT_MESSAGE,
    SentimentScores, Verdict,
};
pub use label::SentimentLabel;
