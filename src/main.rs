use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use movie_quiz::{logging, Config, QuestionSource, Quiz};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Movie catalogue JSON file (defaults to the bundled catalogue)
    #[arg(short, long, env = "MOVIE_QUIZ_MOVIES", conflicts_with = "questions")]
    movies: Option<PathBuf>,

    /// JSON file with a fixed list of questions
    #[arg(long, env = "MOVIE_QUIZ_QUESTIONS")]
    questions: Option<PathBuf>,

    /// Where best-game statistics are kept
    #[arg(short, long, env = "MOVIE_QUIZ_STATS")]
    stats: Option<PathBuf>,

    /// Number of questions per round
    #[arg(short = 'n', long, default_value_t = 10, value_parser = clap::value_parser!(u16).range(1..))]
    questions_amount: u16,

    /// Pause after each answer, in milliseconds
    #[arg(long, default_value_t = 1000)]
    feedback_delay_ms: u64,

    /// Log file (defaults to movie-quiz.log next to the statistics file)
    #[arg(long, env = "MOVIE_QUIZ_LOG")]
    log_file: Option<PathBuf>,

    /// Log filter, overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        let stats_path = args.stats.unwrap_or_else(Config::default_stats_path);
        let source = match (args.questions, args.movies) {
            (Some(path), _) => QuestionSource::Questions(path),
            (None, Some(path)) => QuestionSource::Movies(path),
            (None, None) => QuestionSource::BundledMovies,
        };

        Config {
            source,
            log_file: args
                .log_file
                .unwrap_or_else(|| Config::log_file_beside(&stats_path)),
            stats_path,
            questions_amount: usize::from(args.questions_amount),
            feedback_delay: Duration::from_millis(args.feedback_delay_ms),
            log_filter: args.log_level,
        }
    }
}

#[tokio::main]
async fn main() {
    let config = Config::from(Args::parse());

    let log_guard = match logging::init(&config.log_file, &config.log_filter) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Logging disabled: {}", e);
            None
        }
    };

    let result = match Quiz::from_config(&config) {
        Ok(quiz) => quiz.run().await,
        Err(e) => Err(e),
    };
    drop(log_guard);

    if let Err(e) = result {
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}
