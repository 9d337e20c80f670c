use tracing_subscriber::EnvFilter;

/// Application-level constants
pub const APP_NAME: &str = "Caresight";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default backend base URL when no override is configured.
pub const DEFAULT_API_BASE: &str = "http://localhost:8080/api";

/// Environment variable that overrides the backend base URL.
pub const API_BASE_ENV: &str = "CARESIGHT_API_BASE";

/// Default log filter when RUST_LOG is not set
pub fn default_log_filter() -> &'static str {
    "caresight=info"
}

/// Resolve the backend base URL: env override, else the default.
/// A trailing slash is stripped so endpoint paths can always start with `/`.
pub fn api_base_url() -> String {
    let base = std::env::var(API_BASE_ENV).unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
    base.trim_end_matches('/').to_string()
}

/// Initialize tracing once at startup. Honors `RUST_LOG` when set.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", APP_NAME, APP_VERSION);
}
