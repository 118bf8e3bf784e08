//! Load broker settings from flags, `RABBITMQ_*` variables and
//! `./config.json`, in that order of priority.
//!
//! ```text
//! RABBITMQ_PASSWORD=secret cargo run --example rabbitmq -- --host broker.local --username guest
//! ```

use std::io::{self, Write};
use std::process::ExitCode;

use schemars::JsonSchema;
use serde::Deserialize;
use strata_config::{EnvProvider, FileProvider, FlagProvider, StrataError, load};

/// Connection settings for a RabbitMQ broker.
#[derive(Debug, Deserialize, JsonSchema)]
struct RabbitMq {
    host: String,
    username: String,
    password: String,
    #[serde(default = "default_port")]
    port: u16,
}

const fn default_port() -> u16 {
    5671
}

fn run() -> Result<RabbitMq, StrataError> {
    let flags = FlagProvider::from_env();
    let env = EnvProvider::new().prefixed("RABBITMQ_");
    let file = FileProvider::json("./config.json").must_exist(false);
    load(&[&flags, &env, &file])
}

fn main() -> ExitCode {
    match run() {
        Ok(rabbitmq) => {
            let mut stdout = io::stdout().lock();
            if writeln!(stdout, "{rabbitmq:#?}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            if let Some(display) = err.display_request() {
                display.exit();
            }
            let mut stderr = io::stderr().lock();
            let _ignored = writeln!(stderr, "error: {err}");
            ExitCode::FAILURE
        }
    }
}
