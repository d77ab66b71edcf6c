use dotenvy::dotenv;
use sqlx::sqlite::SqlitePoolOptions;
use std::env;

use koorplein::services::targeting_service;

// One-off maintenance: recompute the stored voice-type closures of a choir
// after its voice hierarchy changed, and top up attendance placeholders.
#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL moet in .env staan");
    let pool = SqlitePoolOptions::new()
        .connect(&db_url)
        .await
        .expect("Kan niet verbinden met DB");

    let choir_id = env::var("CHOIR_ID").expect("CHOIR_ID moet gezet zijn");

    match targeting_service::reexpand_choir_targets(&pool, &choir_id).await {
        Ok(report) => {
            println!(
                "target reexpand: events={}/{}, posts={}/{}, attendance_rows_created={}",
                report.events_updated,
                report.events_checked,
                report.posts_updated,
                report.posts_checked,
                report.attendance_rows_created
            );
        }
        Err(e) => {
            eprintln!("target reexpand failed: {}", e);
            std::process::exit(1);
        }
    }
}
