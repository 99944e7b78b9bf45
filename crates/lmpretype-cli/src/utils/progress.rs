use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use lmpretype::engine::progress::{Progress, ProgressCallback, Stage};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 80;

/// Shows the current stage of a retype run as a spinner on stderr.
#[derive(Clone)]
pub struct CliProgressHandler {
    pb: Arc<Mutex<ProgressBar>>,
}

impl CliProgressHandler {
    pub fn new(hidden: bool) -> Self {
        let pb = ProgressBar::new_spinner()
            .with_style(Self::spinner_style())
            .with_message("Initializing...");
        if hidden {
            pb.set_draw_target(ProgressDrawTarget::hidden());
        } else {
            pb.set_draw_target(ProgressDrawTarget::stderr());
        }
        pb.finish_and_clear();

        Self {
            pb: Arc::new(Mutex::new(pb)),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let pb_clone = self.pb.clone();

        Box::new(move |progress: Progress| {
            let Ok(pb_guard) = pb_clone.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::StageEntered(Stage::Done) => {
                    pb_guard.disable_steady_tick();
                    pb_guard.finish_and_clear();
                }
                Progress::StageEntered(stage) => {
                    if pb_guard.is_finished() {
                        pb_guard.reset();
                        pb_guard.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                    }
                    pb_guard.set_message(stage.description());
                }
                Progress::Failed { stage, reason } => {
                    pb_guard.disable_steady_tick();
                    pb_guard.abandon_with_message(format!("✗ {} failed: {}", stage, reason));
                }
                Progress::Message(msg) => {
                    if !pb_guard.is_finished() {
                        pb_guard.println(format!("  {}", msg));
                    } else {
                        pb_guard.set_message(msg);
                    }
                }
            }
        })
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn handler_initializes_in_a_finished_state() {
        let handler = CliProgressHandler::new(true);
        let pb = handler.pb.lock().unwrap();
        assert!(pb.is_finished());
    }

    #[test]
    fn callback_follows_stages() {
        let handler = CliProgressHandler::new(true);
        let callback = handler.get_callback();

        callback(Progress::StageEntered(Stage::Reading));
        {
            let pb = handler.pb.lock().unwrap();
            assert_eq!(pb.message(), "Reading input");
            assert!(!pb.is_finished());
        }

        callback(Progress::StageEntered(Stage::MappingBuilt));
        {
            let pb = handler.pb.lock().unwrap();
            assert_eq!(pb.message(), "Built type mapping");
        }

        callback(Progress::StageEntered(Stage::Done));
        assert!(handler.pb.lock().unwrap().is_finished());
    }

    #[test]
    fn failure_abandons_the_spinner() {
        let handler = CliProgressHandler::new(true);
        let callback = handler.get_callback();

        callback(Progress::StageEntered(Stage::Reading));
        callback(Progress::Failed {
            stage: Stage::SectionsLocated,
            reason: "no Atoms".to_string(),
        });

        let pb = handler.pb.lock().unwrap();
        assert!(pb.is_finished());
        assert!(pb.message().contains("no Atoms"));
    }

    #[test]
    fn message_on_finished_spinner_replaces_message() {
        let handler = CliProgressHandler::new(true);
        let callback = handler.get_callback();
        callback(Progress::Message("hello".to_string()));
        assert_eq!(handler.pb.lock().unwrap().message(), "hello");
    }

    #[test]
    fn callback_is_usable_from_other_threads() {
        let handler = CliProgressHandler::new(true);
        let callback = Arc::new(handler.get_callback());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cb = Arc::clone(&callback);
                thread::spawn(move || cb(Progress::StageEntered(Stage::Writing)))
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(handler.pb.lock().unwrap().message(), "Writing output");
    }
}
