use crate::device::Backend;
use crate::scheduler::{poll_tick, LoopDriver, LoopState};

use super::{AppConfig, GraphicsContext, InitError};

/// Everything the program mutates: the surfaces and the loop state.
///
/// Owned by [`run`] and lent to the loop driver one tick at a time.
pub struct AppState<D, C> {
    pub context: GraphicsContext<D, C>,
    pub loop_state: LoopState,
}

impl<D, C> AppState<D, C> {
    pub fn new(context: GraphicsContext<D, C>) -> Self {
        Self {
            context,
            loop_state: LoopState::Running,
        }
    }
}

/// Runs the program against `backend`: initialize, render once, poll until
/// quit under `driver`, tear down.
///
/// The backend is shut down on every path, including startup failure.
pub fn run<B>(
    backend: &mut B,
    driver: &mut dyn LoopDriver<B>,
    config: &AppConfig,
) -> Result<(), InitError>
where
    B: Backend,
{
    let context = match GraphicsContext::initialize(backend, &config.window) {
        Ok(context) => context,
        Err(err) => {
            backend.shutdown();
            return Err(err);
        }
    };

    let mut state = AppState::new(context);
    state.context.render_fixed_shape(config.thickness);

    log::info!("entering {} loop", driver.name());
    let loop_state = &mut state.loop_state;
    driver.drive(backend, &mut |b| poll_tick(loop_state, b));
    log::info!("loop finished ({:?})", state.loop_state);

    state.context.teardown(backend);
    backend.shutdown();
    Ok(())
}
