use std::process::ExitCode;

use redx_engine::core::{run, AppConfig, InitError};
use redx_engine::logging::{init_logging, LoggingConfig};
use redx_engine::window::WinitBackend;

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    let config = AppConfig::from_env();

    let mut backend = match WinitBackend::new(config.gpu.clone()) {
        Ok(backend) => backend,
        Err(err) => {
            let err = InitError::Platform(err);
            log::error!("{err}");
            return ExitCode::from(err.exit_code());
        }
    };

    let mut driver = config
        .loop_mode
        .driver::<WinitBackend>(config.poll_interval);

    match run(&mut backend, driver.as_mut(), &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
