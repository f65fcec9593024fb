use log::{error, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::board::MoveGenerator;
use crate::coach::{Engine, EngineMove};
use crate::error::{EngineError, Result};
use crate::search::SearchLimits;

/// An engine move being computed on its own thread.
///
/// The worker owns its copy of the position and the engine, so the caller's
/// thread stays free. `cancel` raises the abort flag the searcher polls; the
/// result is then [`EngineError::SearchAbandoned`].
pub struct BackgroundSearch {
    abort: Arc<AtomicBool>,
    handle: JoinHandle<Result<Option<EngineMove>>>,
}

impl BackgroundSearch {
    pub fn spawn<G>(mut engine: Engine, mut position: G, limits: SearchLimits) -> Self
    where
        G: MoveGenerator + Send + 'static,
    {
        let abort = Arc::new(AtomicBool::new(false));
        let limits = limits.with_abort(abort.clone());
        let handle = thread::spawn(move || engine.best_move_within(&mut position, &limits));
        Self { abort, handle }
    }

    pub fn cancel(&self) {
        self.abort.store(true, Ordering::Relaxed);
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the worker. A panicked worker is reported as
    /// [`EngineError::SearchPanicked`].
    pub fn join(self) -> Result<Option<EngineMove>> {
        match self.handle.join() {
            Ok(Ok(found)) => Ok(found),
            Ok(Err(e)) => {
                warn!("background search stopped: {e}");
                Err(e)
            }
            Err(_) => {
                error!("background search thread panicked");
                Err(EngineError::SearchPanicked)
            }
        }
    }
}
