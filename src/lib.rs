pub mod ai;
pub mod config;
pub mod content;
pub mod interview;
pub mod progress;
pub mod sdk;
pub mod session;
pub mod speech;
pub mod store;

pub use ai::AiService;
pub use config::Settings;
pub use content::{AssetLoader, ContentRepository};
pub use interview::{InterviewController, InterviewReport};
pub use progress::ProgressTracker;
pub use sdk::VoiceInterviewSdk;
pub use speech::{ConsoleEngine, SpeechManager};
pub use store::Database;
