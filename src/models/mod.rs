mod game_result;
mod question;
mod step;

pub use game_result::GameResult;
pub use question::{Artwork, Movie, Question};
pub use step::{Poster, StepViewModel};
