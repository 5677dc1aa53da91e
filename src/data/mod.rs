mod factory;
mod loader;

pub use factory::{CatalogueSource, MovieQuestionFactory, QuestionFactory, StaticQuestionFactory};
pub use loader::{load_movies_from_json, load_questions_from_json, LoadError};
