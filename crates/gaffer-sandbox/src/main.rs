use gaffer_engine::device::GpuInit;
use gaffer_engine::logging::init_logging;
use gaffer_engine::window::Runtime;
use gaffer_sandbox::{SandboxApp, SandboxConfig};

fn run() -> anyhow::Result<()> {
    let config = SandboxConfig::from_env()?;
    init_logging(config.logging.clone());

    log::info!("starting `{}` demo", config.demo);
    let app = SandboxApp::new(config.demo, config.scheduler);
    Runtime::run(config.runtime, GpuInit::default(), app)
}

fn main() {
    if let Err(e) = run() {
        // Logging may not be up yet if the arguments were rejected.
        init_logging(Default::default());
        log::error!("{e:#}");
        std::process::exit(1);
    }
}
