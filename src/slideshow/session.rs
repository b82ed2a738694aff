//! One mounted slideshow: state, auto-advance timer, and input handling

use serde::Serialize;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};

use super::{Input, SlideshowState, Transition};
use crate::helpers::asset_url;

/// Where the client goes on exit unless told otherwise
pub const EXIT_REDIRECT: &str = "/";

/// Message pushed to the view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Update {
    /// Show an image; a new generation restarts the progress bar
    Frame {
        index: usize,
        total: usize,
        image: Option<String>,
        generation: u64,
    },
    /// Navigate away from the slideshow
    Exit { redirect: String },
}

/// A running slideshow bound to one view
pub struct SlideshowSession {
    state: SlideshowState,
    dir_path: String,
    interval: Duration,
    exit_redirect: String,
}

impl SlideshowSession {
    pub fn new(state: SlideshowState, dir_path: impl Into<String>, interval: Duration) -> Self {
        Self {
            state,
            dir_path: dir_path.into(),
            interval,
            exit_redirect: EXIT_REDIRECT.to_string(),
        }
    }

    /// Send the client somewhere other than `/` on exit
    pub fn with_exit_redirect(mut self, redirect: impl Into<String>) -> Self {
        self.exit_redirect = redirect.into();
        self
    }

    /// Current frame as sent to the view
    pub fn frame(&self) -> Update {
        Update::Frame {
            index: self.state.current_index(),
            total: self.state.len(),
            image: self
                .state
                .current()
                .map(|name| asset_url(&self.dir_path, name)),
            generation: self.state.generation(),
        }
    }

    /// Drive the slideshow until exit or until either channel closes.
    ///
    /// Timer ticks and inputs are handled one at a time by the same
    /// transition function, and every move restarts the countdown, so a
    /// stale timer can never fire right after a manual step.
    pub async fn run(mut self, mut inputs: mpsc::Receiver<Input>, updates: mpsc::Sender<Update>) {
        if updates.send(self.frame()).await.is_err() {
            return;
        }

        let mut deadline = Instant::now() + self.interval;

        loop {
            let input = tokio::select! {
                _ = sleep_until(deadline), if !self.state.is_empty() => Input::Tick,
                input = inputs.recv() => match input {
                    Some(input) => input,
                    None => break,
                },
            };

            match self.state.apply(input) {
                Transition::Moved { index, generation } => {
                    tracing::debug!("Slideshow at {} (generation {})", index, generation);
                    deadline = Instant::now() + self.interval;
                    if updates.send(self.frame()).await.is_err() {
                        break;
                    }
                }
                Transition::Ignored => {}
                Transition::Exit => {
                    let _ = updates
                        .send(Update::Exit {
                            redirect: self.exit_redirect.clone(),
                        })
                        .await;
                    break;
                }
            }
        }

        tracing::debug!("Slideshow session ended");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    const INTERVAL: Duration = Duration::from_secs(10);

    fn start(images: &[&str]) -> (mpsc::Sender<Input>, mpsc::Receiver<Update>, tokio::task::JoinHandle<()>) {
        let state = SlideshowState::from_ordered(images.iter().map(|s| s.to_string()).collect());
        let session = SlideshowSession::new(state, "images/grass", INTERVAL);
        let (input_tx, input_rx) = mpsc::channel(8);
        let (update_tx, update_rx) = mpsc::channel(8);
        let handle = tokio::spawn(session.run(input_rx, update_tx));
        (input_tx, update_rx, handle)
    }

    fn generation(update: &Update) -> u64 {
        match update {
            Update::Frame { generation, .. } => *generation,
            other => panic!("expected frame, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_frame_then_auto_advance() {
        let (_inputs, mut updates, _handle) = start(&["a.jpg", "b c.jpg"]);
        let begin = Instant::now();

        let first = updates.recv().await.unwrap();
        assert_eq!(
            first,
            Update::Frame {
                index: 0,
                total: 2,
                image: Some("/images/grass/a.jpg".to_string()),
                generation: 0,
            }
        );

        let second = updates.recv().await.unwrap();
        assert_eq!(begin.elapsed(), INTERVAL);
        assert_eq!(
            second,
            Update::Frame {
                index: 1,
                total: 2,
                image: Some("/images/grass/b%20c.jpg".to_string()),
                generation: 1,
            }
        );

        // Wraps back to the first image
        let third = updates.recv().await.unwrap();
        assert!(matches!(third, Update::Frame { index: 0, generation: 2, .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_step_restarts_countdown() {
        let (inputs, mut updates, _handle) = start(&["a", "b", "c"]);
        let begin = Instant::now();
        updates.recv().await.unwrap();

        tokio::time::sleep(Duration::from_secs(4)).await;
        inputs.send(Input::Next).await.unwrap();
        let manual = updates.recv().await.unwrap();
        assert!(matches!(manual, Update::Frame { index: 1, generation: 1, .. }));

        // The next automatic step comes a full interval after the manual one
        let auto = updates.recv().await.unwrap();
        assert_eq!(begin.elapsed(), Duration::from_secs(14));
        assert!(matches!(auto, Update::Frame { index: 2, generation: 2, .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_previous_wraps_and_bumps_generation() {
        let (inputs, mut updates, _handle) = start(&["a", "b", "c"]);
        updates.recv().await.unwrap();

        inputs.send(Input::Previous).await.unwrap();
        let update = updates.recv().await.unwrap();
        assert!(matches!(update, Update::Frame { index: 2, .. }));
        assert_eq!(generation(&update), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exit_redirects_and_stops() {
        let (inputs, mut updates, handle) = start(&["a", "b"]);
        updates.recv().await.unwrap();

        inputs.send(Input::Exit).await.unwrap();
        assert_eq!(
            updates.recv().await.unwrap(),
            Update::Exit {
                redirect: "/".to_string()
            }
        );
        handle.await.unwrap();
        assert!(updates.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_exit_uses_configured_redirect() {
        let state = SlideshowState::from_ordered(vec!["a".to_string()]);
        let session =
            SlideshowSession::new(state, "blog/images", INTERVAL).with_exit_redirect("/blog/");
        let (input_tx, input_rx) = mpsc::channel(8);
        let (update_tx, mut update_rx) = mpsc::channel(8);
        tokio::spawn(session.run(input_rx, update_tx));

        let first = update_rx.recv().await.unwrap();
        assert!(matches!(first, Update::Frame { image: Some(ref url), .. } if url == "/blog/images/a"));

        input_tx.send(Input::Exit).await.unwrap();
        assert_eq!(
            update_rx.recv().await.unwrap(),
            Update::Exit {
                redirect: "/blog/".to_string()
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_unmount_stops_timer() {
        let (inputs, mut updates, handle) = start(&["a", "b"]);
        updates.recv().await.unwrap();

        drop(inputs);
        handle.await.unwrap();
        assert!(updates.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_slideshow_never_ticks() {
        let (inputs, mut updates, _handle) = start(&[]);

        let first = updates.recv().await.unwrap();
        assert_eq!(
            first,
            Update::Frame {
                index: 0,
                total: 0,
                image: None,
                generation: 0,
            }
        );

        inputs.send(Input::Next).await.unwrap();
        let waited = timeout(INTERVAL * 3, updates.recv()).await;
        assert!(waited.is_err());
    }

    #[test]
    fn test_update_json_shape() {
        let json = serde_json::to_value(Update::Exit {
            redirect: "/".to_string(),
        })
        .unwrap();
        assert_eq!(json["type"], "exit");
        assert_eq!(json["redirect"], "/");
    }
}
