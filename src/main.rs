use std::sync::Arc;

use tokio::net::TcpListener;

use emojibridge::config::Config;
use emojibridge::slack::SlackClient;
use emojibridge::state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "emojibridge=debug,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env();
    print_banner(&config);

    let slack = Arc::new(SlackClient::new(
        config.slack_token.clone(),
        config.slack_team_id.clone(),
    ));
    let state = AppState::new(slack, config.token_hint(), config.static_dir.clone());

    let app = emojibridge::routes::router(state);

    let listener = TcpListener::bind(("0.0.0.0", config.port))
        .await
        .expect("failed to bind");

    let actual_port = listener
        .local_addr()
        .expect("failed to get local address")
        .port();
    eprintln!("  \x1b[32m→ listening on 0.0.0.0:{actual_port}\x1b[0m");
    eprintln!();

    axum::serve(listener, app).await.expect("server error");
}

fn print_banner(config: &Config) {
    let version = env!("CARGO_PKG_VERSION");

    eprintln!();
    eprintln!("  \x1b[1;36memojibridge\x1b[0m \x1b[2mv{version}\x1b[0m");
    eprintln!();
    eprintln!("  \x1b[2mport\x1b[0m         {}", config.port);
    eprintln!("  \x1b[2mtoken\x1b[0m        {}", config.token_hint());
    eprintln!(
        "  \x1b[2mteam\x1b[0m         {}",
        if config.slack_team_id.is_empty() {
            "(unset)"
        } else {
            config.slack_team_id.as_str()
        }
    );
    if let Some(ref dir) = config.static_dir {
        eprintln!("  \x1b[2mstatic\x1b[0m       {}", dir.display());
    }

    if config.slack_token.is_empty() {
        eprintln!();
        eprintln!("  \x1b[33m! SLACK_TOKEN is not set; slack calls will fail\x1b[0m");
    }

    eprintln!();
}
