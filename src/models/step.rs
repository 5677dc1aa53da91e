use super::question::Artwork;

/// Poster resolved from a question's artwork for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Poster {
    Captioned(String),
    /// Nothing displayable; rendered as an empty frame.
    Blank,
}

impl Poster {
    pub fn resolve(artwork: &Artwork) -> Self {
        match artwork {
            Artwork::Named(name) if !name.trim().is_empty() => Poster::Captioned(name.trim().to_string()),
            _ => Poster::Blank,
        }
    }
}

/// Display projection of a single question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepViewModel {
    pub poster: Poster,
    pub question: String,
    /// Position in the round, formatted as `current/total`.
    pub question_number: String,
}
