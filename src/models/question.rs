use serde::Deserialize;

/// Artwork shown alongside a question.
///
/// Questions built from the movie catalogue carry the poster name; questions
/// loaded from a file may carry raw image bytes instead.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Artwork {
    Named(String),
    Bytes(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Question {
    pub artwork: Artwork,
    pub text: String,
    pub correct_answer: bool,
}

impl Question {
    pub fn new(artwork: Artwork, text: impl Into<String>, correct_answer: bool) -> Self {
        Self {
            artwork,
            text: text.into(),
            correct_answer,
        }
    }
}

/// A catalogue entry the movie question factory draws from.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Movie {
    pub title: String,
    pub rating: f32,
    /// Poster name; the title is used when absent.
    #[serde(default)]
    pub poster: Option<String>,
}

impl Movie {
    pub fn poster_name(&self) -> &str {
        self.poster.as_deref().unwrap_or(&self.title)
    }
}
