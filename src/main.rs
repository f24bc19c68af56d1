#![deny(clippy::implicit_return)]
#![allow(clippy::needless_return)]

mod application;
mod configuration;
mod domain;
mod infrastructure;

use std::env;
use std::process;

use anyhow::Error;
use yansi::Paint;

use crate::application::app;
use crate::application::cli;
use crate::application::cli::CommandError;
use crate::configuration::cache_dir;
use crate::domain::services::SessionStore;
use crate::infrastructure::api::ApiManager;
use crate::infrastructure::prompts::ConfirmerManager;

fn handle_error(err: Error) {
    if let Some(command_err) = err.downcast_ref::<CommandError>() {
        eprintln!("{}", Paint::red(command_err));
        process::exit(1);
    }

    eprintln!(
        "{}",
        Paint::red(format!(
            "dogcodes failed with the following app version and error.\n\nVersion: {}\nCommit: {}\nError: {}",
            env!("CARGO_PKG_VERSION"),
            env!("VERGEN_GIT_DESCRIBE"),
            err
        ))
    );

    if env::var("RUST_BACKTRACE").is_ok() {
        eprintln!("\n{:?}", err);
    } else {
        let args = env::args().collect::<Vec<String>>().join(" ");
        eprintln!("\nRunning the following can help explain further what the issue is:");
        eprintln!("\nRUST_BACKTRACE=1 RUST_LOG=dogcodes {args}");
    }

    process::exit(1);
}

#[tokio::main]
async fn main() {
    better_panic::Settings::auto().install();

    let debug_log_dir = env::var("DOGCODES_LOG_DIR")
        .unwrap_or_else(|_| return cache_dir().to_string_lossy().to_string());

    let file_appender = tracing_appender::rolling::never(debug_log_dir, "debug.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    if env::var("RUST_LOG")
        .unwrap_or_else(|_| return "".to_string())
        .contains("dogcodes")
    {
        tracing_subscriber::fmt()
            .json()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(writer)
            .init();
    }

    let interactive = match cli::parse().await {
        Ok(interactive) => interactive,
        Err(err) => {
            handle_error(err);
            return;
        }
    };
    if !interactive {
        process::exit(0);
    }

    let res = app::start(
        ApiManager::get(),
        SessionStore::default(),
        ConfirmerManager::get(false),
    )
    .await;

    if let Err(err) = res {
        handle_error(err);
    }

    process::exit(0);
}
