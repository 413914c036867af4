//! End-to-end run of the voice-interview loop: JSON assets on disk, a real
//! SQLite file, a scripted speech channel and the offline model fallback.

use prepmate::speech::ScriptedEngine;
use prepmate::{AssetLoader, ContentRepository, Database, ProgressTracker, Settings, VoiceInterviewSdk};

fn write_assets(dir: &std::path::Path) {
    let topics = r#"[
        {
            "id": "backend-engineer",
            "name": "Backend Engineering",
            "role": "Backend Engineer",
            "description": "APIs and distributed services",
            "question_count": 3
        }
    ]"#;
    let questions = r#"[
        {
            "id": "be-1",
            "topic_id": "backend-engineer",
            "number": 1,
            "text": "Walk me through a backend service you designed end to end.",
            "category": "introduction"
        }
    ]"#;
    std::fs::write(dir.join("interview_topics.json"), topics).unwrap();
    std::fs::write(dir.join("interview_questions.json"), questions).unwrap();
}

#[tokio::test]
async fn full_interview_session_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    write_assets(dir.path());

    let settings = Settings {
        question_count: Some(3),
        asset_dir: dir.path().to_string_lossy().into_owned(),
        db_path: dir.path().join("prep.db").to_string_lossy().into_owned(),
        ..Settings::default()
    };

    let content = ContentRepository::load(&AssetLoader::new(&settings.asset_dir));
    assert_eq!(content.interview_topics().len(), 1);

    let store = Database::open(&settings.db_path).unwrap();
    let engine = ScriptedEngine::new(vec![
        "I built an order service with Rust and Postgres.".into(),
        "I would use keyset pagination over offsets.".into(),
        "I bisected a deploy and rolled back the bad config.".into(),
    ]);

    let mut sdk = VoiceInterviewSdk::new(settings, content, store, Box::new(engine));
    let session_id = sdk.start_session("backend-engineer").unwrap();
    let report = sdk.run_to_completion().await.unwrap();

    assert_eq!(report.session_id, session_id);
    assert_eq!(report.turns.len(), 3);
    // First question comes from the seeded content, not the model.
    assert_eq!(
        report.turns[0].question,
        "Walk me through a backend service you designed end to end."
    );
    assert!(report.turns.iter().all(|t| (1u8..=10).contains(&t.score)));
    assert!(!report.summary.closing.is_empty());

    // Turns were persisted in the SQLite file, in question order.
    let persisted = sdk.store().interview_responses(&session_id).unwrap();
    assert_eq!(persisted.len(), 3);
    assert_eq!(persisted[1].question_number, 2);
    assert_eq!(
        persisted[1].transcript,
        "I would use keyset pagination over offsets."
    );
}

#[tokio::test]
async fn progress_and_interview_share_one_store() {
    let dir = tempfile::tempdir().unwrap();
    write_assets(dir.path());

    let settings = Settings {
        question_count: Some(1),
        asset_dir: dir.path().to_string_lossy().into_owned(),
        db_path: dir.path().join("prep.db").to_string_lossy().into_owned(),
        ..Settings::default()
    };
    let content = ContentRepository::load(&AssetLoader::new(&settings.asset_dir));
    let store = Database::open(&settings.db_path).unwrap();

    {
        let tracker = ProgressTracker::new(&store);
        tracker.tick_streak().unwrap();
        tracker.toggle_bookmark("rust-own-1", "ownership").unwrap();
        tracker.record_quiz("ownership", 2, 2).unwrap();
    }

    let engine = ScriptedEngine::new(vec!["A short answer.".into()]);
    let mut sdk = VoiceInterviewSdk::new(settings, content, store, Box::new(engine));
    sdk.start_session("backend-engineer").unwrap();
    sdk.run_to_completion().await.unwrap();

    let tracker = ProgressTracker::new(sdk.store());
    assert_eq!(tracker.bookmarks().unwrap().len(), 1);
    let history = tracker.quiz_history(5).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].score_percent, 100);
    assert_eq!(tracker.tick_streak().unwrap().current, 1);
}
