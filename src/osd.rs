//! Overlay handle ownership so each surface is created, updated, and released exactly once.

use std::rc::Rc;

use anyhow::Result;

/// Rendering backend for overlay surfaces keyed by integer id.
pub trait OsdBackend {
    fn update(&self, id: u64, payload: &str) -> Result<()>;
    fn remove(&self, id: u64) -> Result<()>;
}

/// Exclusive owner of one overlay surface.
///
/// Release happens at most once, either explicitly or on drop; pushing to a
/// released handle is a no-op. Backend failures are logged and swallowed so a
/// dying player connection cannot take the dispatch loop down mid-teardown.
pub struct OsdHandle {
    id: u64,
    backend: Rc<dyn OsdBackend>,
    payload: String,
    released: bool,
}

impl OsdHandle {
    pub fn new(id: u64, backend: Rc<dyn OsdBackend>) -> Self {
        Self {
            id,
            backend,
            payload: String::new(),
            released: false,
        }
    }

    /// Replace the surface content and push it to the backend.
    pub fn set_payload(&mut self, payload: String) {
        if self.released {
            return;
        }
        self.payload = payload;
        self.push();
    }

    /// Re-push the current content unchanged.
    pub fn refresh(&mut self) {
        if !self.released {
            self.push();
        }
    }

    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Err(err) = self.backend.remove(self.id) {
            tracing::debug!(id = self.id, "overlay remove failed: {err:#}");
        }
    }

    fn push(&self) {
        if let Err(err) = self.backend.update(self.id, &self.payload) {
            tracing::debug!(id = self.id, "overlay update failed: {err:#}");
        }
    }
}

impl Drop for OsdHandle {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(any(test, feature = "mutants"))]
pub mod fake {
    //! Recording backend double for overlay tests.

    use std::cell::RefCell;

    use anyhow::Result;

    use super::OsdBackend;

    #[derive(Debug, Default)]
    pub struct FakeOsd {
        pub updates: RefCell<Vec<(u64, String)>>,
        pub removed: RefCell<Vec<u64>>,
    }

    impl FakeOsd {
        pub fn new() -> Self {
            Self::default()
        }

        /// Number of pushes seen for the given overlay id.
        pub fn update_count(&self, id: u64) -> usize {
            self.updates
                .borrow()
                .iter()
                .filter(|(seen, _)| *seen == id)
                .count()
        }

        pub fn last_payload(&self, id: u64) -> Option<String> {
            self.updates
                .borrow()
                .iter()
                .rev()
                .find(|(seen, _)| *seen == id)
                .map(|(_, payload)| payload.clone())
        }
    }

    impl OsdBackend for FakeOsd {
        fn update(&self, id: u64, payload: &str) -> Result<()> {
            self.updates.borrow_mut().push((id, payload.to_string()));
            Ok(())
        }

        fn remove(&self, id: u64) -> Result<()> {
            self.removed.borrow_mut().push(id);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fake::FakeOsd;
    use super::*;

    #[test]
    fn set_payload_pushes_to_backend() {
        let backend = Rc::new(FakeOsd::new());
        let mut handle = OsdHandle::new(3, backend.clone());
        handle.set_payload("hello".to_string());
        assert_eq!(backend.last_payload(3).as_deref(), Some("hello"));
    }

    #[test]
    fn release_removes_exactly_once() {
        let backend = Rc::new(FakeOsd::new());
        let mut handle = OsdHandle::new(1, backend.clone());
        handle.set_payload("x".to_string());
        handle.release();
        handle.release();
        assert_eq!(*backend.removed.borrow(), vec![1]);
    }

    #[test]
    fn drop_releases_and_does_not_double_remove() {
        let backend = Rc::new(FakeOsd::new());
        {
            let mut handle = OsdHandle::new(2, backend.clone());
            handle.set_payload("x".to_string());
            handle.release();
        }
        assert_eq!(*backend.removed.borrow(), vec![2]);
    }

    #[test]
    fn released_handle_ignores_updates() {
        let backend = Rc::new(FakeOsd::new());
        let mut handle = OsdHandle::new(7, backend.clone());
        handle.release();
        handle.set_payload("late".to_string());
        handle.refresh();
        assert_eq!(backend.update_count(7), 0);
    }
}
