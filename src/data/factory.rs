//! Question suppliers.
//!
//! A supplier is loaded once per attempt with [`QuestionFactory::load_data`]
//! and then asked for one question at a time. The app delivers whatever it
//! returns through its event channel, so callers never see a question
//! synchronously with the request.

use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::loader::{load_movies_from_json, parse_movies, LoadError, BUNDLED_MOVIES};
use crate::models::{Artwork, Movie, Question};

const MIN_RATING_THRESHOLD: u8 = 5;
const MAX_RATING_THRESHOLD: u8 = 8;

pub trait QuestionFactory: Send {
    /// Load (or reload) the content questions are drawn from.
    ///
    /// Returns the number of entries available.
    fn load_data(&mut self) -> Result<usize, LoadError>;

    /// Produce the next question, or `None` when nothing is loaded or the
    /// supply has run out.
    fn request_next_question(&mut self) -> Option<Question>;
}

/// Where the movie catalogue comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogueSource {
    Bundled,
    File(PathBuf),
}

/// Generates rating questions from a movie catalogue.
///
/// Each question picks a random movie and a random threshold and asks
/// whether the movie's rating is above it.
pub struct MovieQuestionFactory {
    source: CatalogueSource,
    movies: Vec<Movie>,
    rng: StdRng,
}

impl MovieQuestionFactory {
    pub fn new(source: CatalogueSource) -> Self {
        Self::with_rng(source, StdRng::from_os_rng())
    }

    pub fn with_rng(source: CatalogueSource, rng: StdRng) -> Self {
        Self {
            source,
            movies: Vec::new(),
            rng,
        }
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }
}

impl QuestionFactory for MovieQuestionFactory {
    fn load_data(&mut self) -> Result<usize, LoadError> {
        let movies = match &self.source {
            CatalogueSource::Bundled => parse_movies(BUNDLED_MOVIES, "bundled catalogue")?,
            CatalogueSource::File(path) => load_movies_from_json(path)?,
        };

        info!(count = movies.len(), source = ?self.source, "movie catalogue loaded");
        self.movies = movies;
        Ok(self.movies.len())
    }

    fn request_next_question(&mut self) -> Option<Question> {
        if self.movies.is_empty() {
            return None;
        }

        let index = self.rng.random_range(0..self.movies.len());
        let threshold = self
            .rng
            .random_range(MIN_RATING_THRESHOLD..=MAX_RATING_THRESHOLD);
        let movie = &self.movies[index];
        debug!(title = %movie.title, threshold, "generated question");

        Some(Question::new(
            Artwork::Named(movie.poster_name().to_string()),
            format!("Is the rating of this movie greater than {}?", threshold),
            movie.rating > f32::from(threshold),
        ))
    }
}

/// Serves a fixed list of questions in order, wrapping around at the end.
pub struct StaticQuestionFactory {
    questions: Vec<Question>,
    cursor: usize,
}

impl StaticQuestionFactory {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            cursor: 0,
        }
    }
}

impl QuestionFactory for StaticQuestionFactory {
    fn load_data(&mut self) -> Result<usize, LoadError> {
        if self.questions.is_empty() {
            return Err(LoadError::Empty("question list".to_string()));
        }
        self.cursor = 0;
        Ok(self.questions.len())
    }

    fn request_next_question(&mut self) -> Option<Question> {
        if self.questions.is_empty() {
            return None;
        }

        let question = self.questions[self.cursor % self.questions.len()].clone();
        self.cursor = (self.cursor + 1) % self.questions.len();
        Some(question)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn seeded(source: CatalogueSource) -> MovieQuestionFactory {
        MovieQuestionFactory::with_rng(source, StdRng::seed_from_u64(7))
    }

    #[test]
    fn test_no_questions_before_load() {
        let mut factory = seeded(CatalogueSource::Bundled);
        assert!(factory.request_next_question().is_none());
    }

    #[test]
    fn test_generated_answer_matches_rating() {
        let mut factory = seeded(CatalogueSource::Bundled);
        assert_eq!(factory.load_data().unwrap(), 10);

        for _ in 0..50 {
            let question = factory.request_next_question().unwrap();
            let Artwork::Named(title) = &question.artwork else {
                panic!("expected named artwork");
            };
            let movie = factory
                .movies()
                .iter()
                .find(|m| &m.title == title)
                .unwrap();
            let threshold: f32 = question
                .text
                .trim_end_matches('?')
                .rsplit(' ')
                .next()
                .unwrap()
                .parse()
                .unwrap();

            assert!((5.0..=8.0).contains(&threshold));
            assert_eq!(question.correct_answer, movie.rating > threshold);
        }
    }

    #[test]
    fn test_load_from_file_uses_poster_name() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{ "title": "Heat", "rating": 8.3, "poster": "heat_1995" }}]"#
        )
        .unwrap();

        let mut factory = seeded(CatalogueSource::File(file.path().to_path_buf()));
        assert_eq!(factory.load_data().unwrap(), 1);
        let question = factory.request_next_question().unwrap();
        assert_eq!(question.artwork, Artwork::Named("heat_1995".to_string()));
        assert!(question.correct_answer);
    }

    #[test]
    fn test_load_failure_is_reported() {
        let mut factory = seeded(CatalogueSource::File(PathBuf::from("/nonexistent.json")));
        assert!(matches!(factory.load_data(), Err(LoadError::Read { .. })));
        assert!(factory.request_next_question().is_none());
    }

    #[test]
    fn test_static_factory_wraps_around() {
        let questions = vec![
            Question::new(Artwork::Named("A".into()), "first", true),
            Question::new(Artwork::Named("B".into()), "second", false),
        ];
        let mut factory = StaticQuestionFactory::new(questions);
        factory.load_data().unwrap();

        let texts: Vec<String> = (0..3)
            .map(|_| factory.request_next_question().unwrap().text)
            .collect();
        assert_eq!(texts, ["first", "second", "first"]);
    }

    #[test]
    fn test_static_factory_rejects_empty_list() {
        let mut factory = StaticQuestionFactory::new(Vec::new());
        assert!(matches!(factory.load_data(), Err(LoadError::Empty(_))));
    }
}
