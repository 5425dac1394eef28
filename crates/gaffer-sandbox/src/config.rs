use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Result};
use gaffer_engine::logging::LoggingConfig;
use gaffer_engine::time::SchedulerConfig;
use gaffer_engine::window::RuntimeConfig;

/// Environment variable consulted when no demo is given on the command line.
pub const DEMO_ENV: &str = "GAFFER_DEMO";

/// Which demo the sandbox runs.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum DemoKind {
    Spinner,
    #[default]
    Boxes,
}

impl DemoKind {
    /// Picks the demo from the first argument, then `env`, then the default.
    pub fn select<I>(mut args: I, env: Option<String>) -> Result<Self>
    where
        I: Iterator<Item = String>,
    {
        match args.next().or(env) {
            Some(name) => name.parse(),
            None => Ok(Self::default()),
        }
    }
}

impl FromStr for DemoKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spinner" => Ok(DemoKind::Spinner),
            "boxes" => Ok(DemoKind::Boxes),
            other => bail!("unknown demo `{other}` (expected `spinner` or `boxes`)"),
        }
    }
}

impl fmt::Display for DemoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DemoKind::Spinner => f.write_str("spinner"),
            DemoKind::Boxes => f.write_str("boxes"),
        }
    }
}

/// Everything the sandbox binary needs to start.
#[derive(Debug, Clone)]
pub struct SandboxConfig {
    pub demo: DemoKind,
    pub runtime: RuntimeConfig,
    pub scheduler: SchedulerConfig,
    pub logging: LoggingConfig,
}

impl SandboxConfig {
    pub fn new(demo: DemoKind) -> Self {
        Self {
            demo,
            runtime: RuntimeConfig {
                title: format!("gaffer sandbox: {demo}"),
                ..RuntimeConfig::default()
            },
            scheduler: SchedulerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Reads the demo from the process arguments and [`DEMO_ENV`].
    pub fn from_env() -> Result<Self> {
        let demo = DemoKind::select(std::env::args().skip(1), std::env::var(DEMO_ENV).ok())?;
        Ok(Self::new(demo))
    }
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self::new(DemoKind::default())
    }
}
