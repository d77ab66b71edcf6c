use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use dotenvy::dotenv;
use http::header::{HeaderValue, CACHE_CONTROL};
use sqlx::sqlite::SqlitePoolOptions;
use std::env;
use std::net::SocketAddr;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::set_header::SetResponseHeaderLayer;

use koorplein::web::middleware::auth as auth_middleware;
use koorplein::web::routes::{chats, events, feed, health, targeting};

#[tokio::main]
async fn main() {
    // Laad .env bestand
    dotenv().ok();

    // 1. Start logging
    tracing_subscriber::fmt::init();

    // 2. Verbind met de Database
    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL moet in .env staan");
    println!("Verbinden met database: {}", db_url);

    let pool = SqlitePoolOptions::new()
        .connect(&db_url)
        .await
        .expect("Kan niet verbinden met DB");

    // 3. Protected routes onder één middleware layer
    let protected_routes = Router::new()
        .route(
            "/api/events",
            get(events::list_events_handler).post(events::create_event_handler),
        )
        .route(
            "/api/events/:event_id/targeting",
            post(events::update_targeting_handler),
        )
        .route(
            "/api/events/:event_id/attendance",
            get(events::attendance_roster_handler).post(events::mark_attendance_handler),
        )
        .route(
            "/api/events/:event_id/attendance/summary",
            get(events::attendance_summary_handler),
        )
        .route("/api/events/:event_id/rsvp", post(events::rsvp_handler))
        .route("/api/targeting/preview", post(targeting::preview_handler))
        .route(
            "/api/feed",
            get(feed::list_feed_handler).post(feed::create_post_handler),
        )
        .route("/api/chats", get(chats::list_chats_handler))
        .route("/api/chats/:chat_id/can-send", get(chats::can_send_handler))
        .layer(middleware::from_fn_with_state(
            pool.clone(),
            auth_middleware::require_member,
        ));

    let app = Router::new()
        .route("/api/health", get(health::health_handler))
        .merge(protected_routes)
        // API responses nooit cachen
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(CatchPanicLayer::new())
        // State
        .with_state(pool);

    // 4. Start de server (met fallback poort)
    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .expect("Kan host/port niet parsen");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!(
                "⚠️  Kon niet binden op {}: {}. Probeer fallback {}:{}",
                addr,
                e,
                host,
                port + 1
            );
            let fallback: SocketAddr = format!("{}:{}", host, port + 1)
                .parse()
                .expect("Kan fallback niet parsen");
            tokio::net::TcpListener::bind(fallback)
                .await
                .expect("Kan niet binden op fallback poort")
        }
    };

    let bound_addr = listener.local_addr().unwrap();
    println!("🚀 Koorplein API draait op http://{}", bound_addr);

    axum::serve(listener, app).await.unwrap();
}
