#![deny(missing_docs)]
//! This crate provides a standardized initialization process for the lambda binaries in this
//! workspace, so that every function gets the same dotenv, panic and tracing behaviour.

use tracing_subscriber::EnvFilter;

mod environment;

pub use environment::Environment;

/// The filter applied when `RUST_LOG` is unset or invalid
const DEFAULT_FILTER: &str = "info";

/// unit struct which defines the behaviour for instantiation
#[derive(Debug)]
pub struct Entrypoint {
    env: Environment,
}

impl Default for Entrypoint {
    fn default() -> Self {
        Entrypoint {
            env: Environment::new_or_prod(),
        }
    }
}

/// sentinel struct which guarantees that we called [Entrypoint::init]
#[derive(Debug)]
pub struct InitializedEntrypoint(Environment);

impl InitializedEntrypoint {
    /// the environment the binary was initialized for
    pub fn environment(&self) -> Environment {
        self.0
    }
}

impl Entrypoint {
    /// consume self, initialize this binary, and return a proof that it was initialized [InitializedEntrypoint]
    pub fn init(self) -> InitializedEntrypoint {
        dotenv::dotenv().ok();
        std::panic::set_hook(Box::new(tracing_panic::panic_hook));

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        match self.env {
            Environment::Local => {
                tracing_subscriber::fmt()
                    .with_ansi(true)
                    .with_env_filter(filter)
                    .with_file(true)
                    .with_line_number(true)
                    .pretty()
                    .init();
            }
            Environment::Production | Environment::Develop => {
                // cloudwatch does not render ansi and is easier to query as flat json
                tracing_subscriber::fmt()
                    .with_ansi(false)
                    .with_env_filter(filter)
                    .with_file(true)
                    .with_line_number(true)
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .flatten_event(true)
                    .init();
            }
        }

        InitializedEntrypoint(self.env)
    }
}
