use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::{Movie, Question};

/// Catalogue compiled into the binary, used when no `--movies` file is given.
pub const BUNDLED_MOVIES: &str = include_str!("movies.json");

/// Error loading quiz content.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("{0} must contain at least one entry")]
    Empty(String),
    #[error("no more questions available")]
    Exhausted,
}

pub fn load_movies_from_json<P: AsRef<Path>>(path: P) -> Result<Vec<Movie>, LoadError> {
    let path = path.as_ref();
    let content = read(path)?;
    parse_movies(&content, &path.display().to_string())
}

/// Parse a movie catalogue. `origin` names the source in error messages.
pub fn parse_movies(json: &str, origin: &str) -> Result<Vec<Movie>, LoadError> {
    let movies: Vec<Movie> = serde_json::from_str(json).map_err(|source| LoadError::Parse {
        origin: origin.to_string(),
        source,
    })?;

    if movies.is_empty() {
        return Err(LoadError::Empty(origin.to_string()));
    }

    Ok(movies)
}

pub fn load_questions_from_json<P: AsRef<Path>>(path: P) -> Result<Vec<Question>, LoadError> {
    let path = path.as_ref();
    let content = read(path)?;

    let questions: Vec<Question> =
        serde_json::from_str(&content).map_err(|source| LoadError::Parse {
            origin: path.display().to_string(),
            source,
        })?;

    if questions.is_empty() {
        return Err(LoadError::Empty(path.display().to_string()));
    }

    Ok(questions)
}

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Artwork;
    use std::io::Write;

    #[test]
    fn test_bundled_catalogue_parses() {
        let movies = parse_movies(BUNDLED_MOVIES, "bundled").unwrap();
        assert_eq!(movies.len(), 10);
        assert_eq!(movies[0].title, "The Godfather");
        assert_eq!(movies[0].poster_name(), "The Godfather");
    }

    #[test]
    fn test_empty_catalogue_is_rejected() {
        let err = parse_movies("[]", "movies.json").unwrap_err();
        assert!(matches!(err, LoadError::Empty(_)));
        assert_eq!(err.to_string(), "movies.json must contain at least one entry");
    }

    #[test]
    fn test_malformed_catalogue_is_rejected() {
        let err = parse_movies("{ not json", "movies.json").unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_movies_from_json("/nonexistent/movies.json").unwrap_err();
        assert!(matches!(err, LoadError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/movies.json"));
    }

    #[test]
    fn test_load_questions_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{ "artwork": "Vivarium", "text": "Is the rating greater than 6?", "correct_answer": false }},
                {{ "artwork": [1, 2, 3], "text": "Is the rating greater than 5?", "correct_answer": true }}
            ]"#
        )
        .unwrap();

        let questions = load_questions_from_json(file.path()).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].artwork, Artwork::Named("Vivarium".to_string()));
        assert_eq!(questions[1].artwork, Artwork::Bytes(vec![1, 2, 3]));
        assert!(questions[1].correct_answer);
    }
}
