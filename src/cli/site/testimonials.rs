use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tracing::debug;

/// How long each testimonial stays on screen.
pub const ROTATION_PERIOD: Duration = Duration::from_secs(2);

/// Index into a fixed list that wraps back to the start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    len: usize,
    index: usize,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self { len, index: 0 }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn advance(&mut self) -> usize {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
        self.index
    }
}

/// A carousel advanced by a background timer.
///
/// The timer task lives as long as the rotation; stopping or dropping it
/// aborts the task.
pub struct Rotation {
    rx: mpsc::Receiver<usize>,
    task: JoinHandle<()>,
}

impl Rotation {
    pub fn start(len: usize, period: Duration) -> Self {
        let (tx, rx) = mpsc::channel(1);
        let task = tokio::spawn(async move {
            let mut carousel = Carousel::new(len);
            let mut ticker = interval_at(Instant::now() + period, period);
            loop {
                ticker.tick().await;
                carousel.advance();
                if tx.send(carousel.index()).await.is_err() {
                    break;
                }
            }
            debug!("Testimonial rotation finished");
        });

        Self { rx, task }
    }

    /// Waits for the next index. `None` once the rotation is stopped.
    pub async fn next(&mut self) -> Option<usize> {
        self.rx.recv().await
    }

    pub fn stop(&mut self) {
        self.task.abort();
    }
}

impl Drop for Rotation {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carousel_wraps() {
        let mut carousel = Carousel::new(3);
        assert_eq!(carousel.index(), 0);
        assert_eq!(carousel.advance(), 1);
        assert_eq!(carousel.advance(), 2);
        assert_eq!(carousel.advance(), 0);
    }

    #[test]
    fn empty_carousel_stays_put() {
        let mut carousel = Carousel::new(0);
        assert_eq!(carousel.advance(), 0);
    }

    #[tokio::test]
    async fn rotation_publishes_wrapping_indices() {
        let mut rotation = Rotation::start(3, Duration::from_millis(10));
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(rotation.next().await.unwrap());
        }
        assert_eq!(seen, [1, 2, 0, 1]);
    }

    #[tokio::test]
    async fn stopped_rotation_ends() {
        let mut rotation = Rotation::start(3, Duration::from_millis(10));
        rotation.next().await.unwrap();
        rotation.stop();

        let drained = tokio::time::timeout(Duration::from_secs(1), async {
            while rotation.next().await.is_some() {}
        })
        .await;
        assert!(drained.is_ok());
    }
}
