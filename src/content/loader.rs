use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::de::DeserializeOwned;

use super::models::{Domain, InterviewQuestion, InterviewTopic};

pub const DOMAINS_FILE: &str = "domains.json";
pub const INTERVIEW_TOPICS_FILE: &str = "interview_topics.json";
pub const INTERVIEW_QUESTIONS_FILE: &str = "interview_questions.json";

/// Reads bundled JSON content from the asset directory.
///
/// Content loading is best-effort: a missing or malformed file is logged and
/// treated as empty so the rest of the app keeps working.
#[derive(Debug, Clone)]
pub struct AssetLoader {
    asset_dir: PathBuf,
}

impl AssetLoader {
    pub fn new<P: AsRef<Path>>(asset_dir: P) -> Self {
        Self {
            asset_dir: asset_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load_domains(&self) -> Vec<Domain> {
        self.load_list(DOMAINS_FILE)
    }

    pub fn load_interview_topics(&self) -> Vec<InterviewTopic> {
        self.load_list(INTERVIEW_TOPICS_FILE)
    }

    pub fn load_interview_questions(&self) -> Vec<InterviewQuestion> {
        self.load_list(INTERVIEW_QUESTIONS_FILE)
    }

    fn load_list<T: DeserializeOwned>(&self, file_name: &str) -> Vec<T> {
        let path = self.asset_dir.join(file_name);

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Asset file {} not readable: {}", path.display(), e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<T>>(&raw) {
            Ok(items) => {
                info!("Loaded {} entries from {}", items.len(), file_name);
                items
            }
            Err(e) => {
                warn!("Asset file {} malformed: {}", path.display(), e);
                Vec::new()
            }
        }
    }
}
