use clap::Parser;
use quizdrop::{names, AppState};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// The address to bind to.
    #[arg(short, long, env, default_value = names::DEFAULT_ADDRESS)]
    address: String,

    /// Mark cookies `Secure` (serve behind HTTPS).
    #[arg(long, env)]
    secure_cookies: bool,

    /// Number of quiz sessions kept in memory before the oldest are dropped.
    #[arg(long, env, default_value_t = names::DEFAULT_MAX_SESSIONS)]
    max_sessions: usize,

    /// Largest accepted quiz upload, in bytes.
    #[arg(long, env, default_value_t = names::DEFAULT_MAX_UPLOAD_BYTES)]
    max_upload_bytes: usize,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "tracing=info,quizdrop=debug".to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .init();

    let args = Args::parse();

    let state = AppState {
        secure_cookies: args.secure_cookies,
        max_upload_bytes: args.max_upload_bytes,
        ..AppState::new(args.max_sessions)
    };
    let routes = quizdrop::router(state);

    let address = args.address.parse::<std::net::SocketAddr>()?;
    let listener = tokio::net::TcpListener::bind(address).await?;
    tracing::info!("listening on http://{address}");
    axum::serve(listener, routes).await?;

    Ok(())
}
