mod app;

use app::MyApp;
use sign_quiz::{Config, LocalContentProvider, QuizSession, SqliteStore};
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::load_from_dir(".").expect("Failed to load config");
    let store = SqliteStore::open(&config.database_path).expect("Failed to initialize database");
    let provider =
        LocalContentProvider::from_config(&config).expect("Failed to load the video library");

    if provider.library().is_empty() {
        tracing::warn!(
            path = %config.video_dir.display(),
            "no words found; add one folder of clips per word"
        );
    }

    let session = QuizSession::from_config(provider, store, &config)
        .expect("Failed to restore saved progress");

    tracing::info!(level = session.progress().current_level(), "sign quiz starting");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([640.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Sign Language Quiz",
        options,
        Box::new(|_cc| Ok(Box::new(MyApp::new(session)))),
    )
}
