use std::sync::Once;

use env_logger::Env;

/// Logger setup. `filter` uses `env_logger` directive syntax and wins over
/// `RUST_LOG`; without either, the level is `info`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: None, write_style: env_logger::WriteStyle::Auto }
    }
}

// wgpu logs every resource it creates at info.
const NOISY: [&str; 3] = ["wgpu_core", "wgpu_hal", "naga"];

static INIT: Once = Once::new();

/// Installs the global logger. Later calls do nothing.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let env_set = std::env::var_os("RUST_LOG").is_some();
        let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));

        match &config.filter {
            Some(filter) => {
                builder.parse_filters(filter);
            }
            None if !env_set => {
                for module in NOISY {
                    builder.filter_module(module, log::LevelFilter::Warn);
                }
            }
            None => {}
        }

        builder.write_style(config.write_style).init();
        log::debug!("logger ready");
    });
}
