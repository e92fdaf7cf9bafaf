//! Browser surface seam
//!
//! The flows drive an externally-owned browser or webview: open it at a
//! URL, read navigation events off it, close it. Everything else about the
//! surface (rendering, cookie jar, process ownership) belongs to the host
//! application, so the contract here is deliberately small.

use async_trait::async_trait;
use tokio::sync::mpsc;
use wa_types::AppResult;

/// Navigation event emitted by an open browser surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// The surface started loading a new URL.
    LoadStart { url: String },
    /// The user closed the surface.
    Exit,
}

/// Options for opening a browser surface.
#[derive(Debug, Clone)]
pub struct SurfaceOptions {
    /// Window target, `_blank` for a fresh window.
    pub target: String,
    /// Show the location bar to the user.
    pub show_location_bar: bool,
    /// Clear session cookies before opening.
    pub clear_session_cache: bool,
    /// Clear the cache before opening.
    pub clear_cache: bool,
}

impl Default for SurfaceOptions {
    /// `_blank` with the location bar hidden and caches cleared.
    fn default() -> Self {
        Self {
            target: "_blank".to_string(),
            show_location_bar: false,
            clear_session_cache: true,
            clear_cache: true,
        }
    }
}

/// Host-owned browser surface capable of opening an authorization page.
#[async_trait]
pub trait BrowserSurface: Send + Sync {
    /// Open the surface at `url` and return a session carrying its
    /// navigation event stream.
    async fn open(&self, url: &str, options: &SurfaceOptions) -> AppResult<SurfaceSession>;
}

/// Handle for closing an open surface.
pub trait SurfaceControl: Send {
    fn close(&mut self);
}

/// One open browser surface: its navigation events plus the close handle.
///
/// `close` is idempotent and also runs on drop, so no flow path can leave a
/// surface dangling.
pub struct SurfaceSession {
    events: mpsc::UnboundedReceiver<SurfaceEvent>,
    control: Box<dyn SurfaceControl>,
    closed: bool,
}

impl SurfaceSession {
    pub fn new(
        events: mpsc::UnboundedReceiver<SurfaceEvent>,
        control: Box<dyn SurfaceControl>,
    ) -> Self {
        Self {
            events,
            control,
            closed: false,
        }
    }

    /// Next navigation event; `None` once the surface is gone and the
    /// channel has drained.
    pub async fn next_event(&mut self) -> Option<SurfaceEvent> {
        self.events.recv().await
    }

    pub fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.control.close();
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Drop for SurfaceSession {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingControl {
        closes: Arc<AtomicUsize>,
    }

    impl SurfaceControl for CountingControl {
        fn close(&mut self) {
            self.closes.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn session_with_counter() -> (SurfaceSession, Arc<AtomicUsize>) {
        let (_tx, rx) = mpsc::unbounded_channel();
        let closes = Arc::new(AtomicUsize::new(0));
        let session = SurfaceSession::new(
            rx,
            Box::new(CountingControl {
                closes: closes.clone(),
            }),
        );
        (session, closes)
    }

    #[test]
    fn test_close_is_idempotent() {
        let (mut session, closes) = session_with_counter();
        session.close();
        session.close();
        assert_eq!(closes.load(Ordering::SeqCst), 1);
        assert!(session.is_closed());
    }

    #[test]
    fn test_drop_closes_unclosed_session() {
        let (session, closes) = session_with_counter();
        drop(session);
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drop_after_close_does_not_double_close() {
        let (mut session, closes) = session_with_counter();
        session.close();
        drop(session);
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_events_delivered_in_order() {
        let (tx, rx) = mpsc::unbounded_channel();
        let closes = Arc::new(AtomicUsize::new(0));
        let mut session = SurfaceSession::new(
            rx,
            Box::new(CountingControl {
                closes: closes.clone(),
            }),
        );

        tx.send(SurfaceEvent::LoadStart {
            url: "https://example.com".to_string(),
        })
        .unwrap();
        tx.send(SurfaceEvent::Exit).unwrap();
        drop(tx);

        assert_eq!(
            session.next_event().await,
            Some(SurfaceEvent::LoadStart {
                url: "https://example.com".to_string()
            })
        );
        assert_eq!(session.next_event().await, Some(SurfaceEvent::Exit));
        assert_eq!(session.next_event().await, None);
    }
}
