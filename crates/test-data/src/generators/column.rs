//! Column value generators.

use std::ops::Range;

use fake::Fake;
use fake::faker::company::en::CompanyName;
use fake::faker::lorem::en::{Paragraph, Sentence};
use rand::Rng;
use rooms::ColumnKind;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::row::Value;

/// Produces a fake value for one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnGenerator {
    /// Company-like name, e.g. "Schmitt and Sons".
    CompanyName,
    /// A paragraph of lorem ipsum with a sentence count drawn from `sentences`.
    LoremIpsum { sentences: Range<usize> },
    /// A single lorem ipsum sentence with a word count drawn from `words`.
    Sentence { words: Range<usize> },
    /// Random (version 4) UUID drawn from the seeded generator.
    Uuid,
    /// The current time.
    Now,
    /// The same text for every row.
    Constant(String),
}

impl ColumnGenerator {
    pub fn lorem_ipsum() -> Self {
        Self::LoremIpsum { sentences: 3..6 }
    }

    pub fn sentence() -> Self {
        Self::Sentence { words: 4..10 }
    }

    /// Generator used for columns the plan does not mention.
    pub fn default_for(kind: ColumnKind) -> Self {
        match kind {
            ColumnKind::Uuid => Self::Uuid,
            ColumnKind::Text => Self::sentence(),
            ColumnKind::Timestamp => Self::Now,
        }
    }

    /// Whether values from this generator can be stored in a column of `kind`.
    pub fn produces(&self, kind: ColumnKind) -> bool {
        matches!(
            (self, kind),
            (Self::Uuid, ColumnKind::Uuid)
                | (Self::Now, ColumnKind::Timestamp)
                | (
                    Self::CompanyName
                        | Self::LoremIpsum { .. }
                        | Self::Sentence { .. }
                        | Self::Constant(_),
                    ColumnKind::Text
                )
        )
    }

    pub fn generate(&self, rng: &mut impl Rng) -> Value {
        match self {
            Self::CompanyName => Value::Text(CompanyName().fake_with_rng(rng)),
            Self::LoremIpsum { sentences } => {
                Value::Text(Paragraph(non_empty(sentences)).fake_with_rng(rng))
            }
            Self::Sentence { words } => Value::Text(Sentence(non_empty(words)).fake_with_rng(rng)),
            Self::Uuid => Value::Uuid(uuid::Builder::from_random_bytes(rng.r#gen()).into_uuid()),
            Self::Now => Value::Timestamp(OffsetDateTime::now_utc()),
            Self::Constant(text) => Value::Text(text.clone()),
        }
    }
}

// fake panics on an empty range, and a zero draw yields empty text.
fn non_empty(range: &Range<usize>) -> Range<usize> {
    let start = range.start.max(1);
    start..range.end.max(start + 1)
}
