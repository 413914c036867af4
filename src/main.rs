use anyhow::Result;
use log::info;

use prepmate::{
    AssetLoader, ConsoleEngine, ContentRepository, Database, ProgressTracker, Settings,
    VoiceInterviewSdk,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let settings = Settings::load()?;
    info!("PrepMate starting (model: {})", settings.model);

    let content = ContentRepository::load(&AssetLoader::new(&settings.asset_dir));
    let store = Database::open(&settings.db_path)?;

    let streak = ProgressTracker::new(&store).tick_streak()?;
    println!("🔥 Streak: {} day(s) (best {})", streak.current, streak.longest);

    let topics = content.interview_topics().to_vec();
    if topics.is_empty() {
        println!("No interview topics found under '{}'.", settings.asset_dir);
        return Ok(());
    }

    println!("\nAvailable mock interviews:");
    for topic in &topics {
        println!("  {} - {} ({})", topic.id, topic.name, topic.role);
    }

    println!("\nWarm-up: {}", prepmate::ai::practice_question().text);

    // Pick the first topic; the terminal demo keeps the selection simple.
    let topic_id = topics[0].id.clone();
    println!("\nStarting mock interview: {}\n", topics[0].name);

    let mut sdk = VoiceInterviewSdk::new(settings, content, store, Box::new(ConsoleEngine::new()));
    sdk.start_session(&topic_id)?;
    let report = sdk.run_to_completion().await?;

    println!("\n===== Interview report =====");
    for turn in &report.turns {
        println!("Q{}. {} - {}/10", turn.number, turn.question, turn.score);
    }
    println!(
        "\nOverall: {}/10 in {}s\n{}",
        report.summary.overall_score, report.total_secs, report.summary.closing
    );

    Ok(())
}
