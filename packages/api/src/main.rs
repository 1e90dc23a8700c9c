use lambda_http::Error;
use std::env::{self, set_var};
use tracing::info;
use tracing_subscriber::EnvFilter;

use api::config::Config;

fn init_tracing(on_lambda: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if on_lambda {
        // CloudWatch ingests one JSON object per line
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .without_time()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let on_lambda = env::var("AWS_LAMBDA_RUNTIME_API").is_ok();
    init_tracing(on_lambda);

    let config = Config::from_env()?;
    let app = api::app(api::build_state(&config).await);

    if on_lambda {
        set_var("AWS_LAMBDA_HTTP_IGNORE_STAGE_IN_PATH", "true");
        info!("Starting Lambda runtime");
        lambda_http::run(app).await
    } else {
        let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
        info!("Listening on {}", config.bind_addr);
        axum::serve(listener, app).await?;
        Ok(())
    }
}
