use std::ops::{Deref, DerefMut};

use crossbeam_channel::{bounded, Receiver, Sender};

use super::speech_recognizer::SpeechRecognizer;

/// Fixed-size pool of recognizer handles shared across workers.
///
/// Handles are created by the caller, injected at construction, and
/// owned by the pool for its lifetime. `acquire` blocks until a handle
/// frees; the returned guard gives exclusive access and sends the handle
/// back when dropped, so a failing caller still returns what it
/// borrowed. At most `capacity` handles are ever out at once.
pub struct RecognizerPool {
    slots: Receiver<Box<dyn SpeechRecognizer>>,
    returns: Sender<Box<dyn SpeechRecognizer>>,
    capacity: usize,
}

impl RecognizerPool {
    pub fn new(recognizers: Vec<Box<dyn SpeechRecognizer>>) -> Self {
        let capacity = recognizers.len();
        let (returns, slots) = bounded(capacity);
        for recognizer in recognizers {
            // The channel was sized to hold every handle
            returns.send(recognizer).unwrap();
        }
        Self {
            slots,
            returns,
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Borrow a handle, blocking until one is free.
    pub fn acquire(&self) -> PooledRecognizer<'_> {
        // The pool itself keeps a sender alive, so recv cannot fail
        // while `&self` exists
        let inner = self.slots.recv().unwrap();
        PooledRecognizer {
            inner: Some(inner),
            returns: &self.returns,
        }
    }
}

/// Exclusive borrow of a pooled recognizer.
///
/// Dropping the guard resets the handle (best effort) and returns it to
/// the pool's available set.
pub struct PooledRecognizer<'a> {
    inner: Option<Box<dyn SpeechRecognizer>>,
    returns: &'a Sender<Box<dyn SpeechRecognizer>>,
}

impl Deref for PooledRecognizer<'_> {
    type Target = dyn SpeechRecognizer;

    fn deref(&self) -> &Self::Target {
        self.inner.as_deref().unwrap()
    }
}

impl DerefMut for PooledRecognizer<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.inner.as_deref_mut().unwrap()
    }
}

impl Drop for PooledRecognizer<'_> {
    fn drop(&mut self) {
        if let Some(mut recognizer) = self.inner.take() {
            let _ = recognizer.reset();
            let _ = self.returns.send(recognizer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognition::domain::word_alignment::WordAlignment;
    use std::error::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    struct InstrumentedRecognizer {
        in_use: Arc<AtomicUsize>,
        max_in_use: Arc<AtomicUsize>,
        resets: Arc<AtomicUsize>,
        active: bool,
    }

    impl InstrumentedRecognizer {
        fn new(
            in_use: Arc<AtomicUsize>,
            max_in_use: Arc<AtomicUsize>,
            resets: Arc<AtomicUsize>,
        ) -> Self {
            Self {
                in_use,
                max_in_use,
                resets,
                active: false,
            }
        }
    }

    impl SpeechRecognizer for InstrumentedRecognizer {
        fn push_audio(&mut self, _: &[f32]) -> Result<(), Box<dyn Error>> {
            assert!(!self.active, "handle pushed to while already in use");
            self.active = true;
            let now = self.in_use.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_use.fetch_max(now, Ordering::SeqCst);
            Ok(())
        }

        fn final_alignments(&mut self) -> Result<Vec<WordAlignment>, Box<dyn Error>> {
            Ok(Vec::new())
        }

        fn reset(&mut self) -> Result<(), Box<dyn Error>> {
            if self.active {
                self.active = false;
                self.in_use.fetch_sub(1, Ordering::SeqCst);
                self.resets.fetch_add(1, Ordering::SeqCst);
            }
            Ok(())
        }
    }

    fn instrumented_pool(
        size: usize,
    ) -> (
        RecognizerPool,
        Arc<AtomicUsize>,
        Arc<AtomicUsize>,
        Arc<AtomicUsize>,
    ) {
        let in_use = Arc::new(AtomicUsize::new(0));
        let max_in_use = Arc::new(AtomicUsize::new(0));
        let resets = Arc::new(AtomicUsize::new(0));
        let recognizers: Vec<Box<dyn SpeechRecognizer>> = (0..size)
            .map(|_| {
                Box::new(InstrumentedRecognizer::new(
                    in_use.clone(),
                    max_in_use.clone(),
                    resets.clone(),
                )) as Box<dyn SpeechRecognizer>
            })
            .collect();
        (RecognizerPool::new(recognizers), in_use, max_in_use, resets)
    }

    #[test]
    fn test_capacity_reports_injected_handle_count() {
        let (pool, _, _, _) = instrumented_pool(3);
        assert_eq!(pool.capacity(), 3);
    }

    #[test]
    fn test_acquire_gives_exclusive_handle() {
        let (pool, in_use, _, _) = instrumented_pool(2);
        let mut a = pool.acquire();
        let mut b = pool.acquire();
        a.push_audio(&[0.0]).unwrap();
        b.push_audio(&[0.0]).unwrap();
        assert_eq!(in_use.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_dropped_guard_returns_handle_to_pool() {
        let (pool, _, _, _) = instrumented_pool(1);
        {
            let mut guard = pool.acquire();
            guard.push_audio(&[0.0]).unwrap();
        }
        // Would block forever if the handle never came back
        let _guard = pool.acquire();
    }

    #[test]
    fn test_handle_is_reset_before_reentering_pool() {
        let (pool, in_use, _, resets) = instrumented_pool(1);
        {
            let mut guard = pool.acquire();
            guard.push_audio(&[0.0]).unwrap();
        }
        let _guard = pool.acquire();
        assert_eq!(resets.load(Ordering::SeqCst), 1);
        assert_eq!(in_use.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_concurrent_in_use_never_exceeds_capacity() {
        let (pool, _, max_in_use, _) = instrumented_pool(2);
        let pool = Arc::new(pool);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let pool = pool.clone();
                thread::spawn(move || {
                    for _ in 0..5 {
                        let mut guard = pool.acquire();
                        guard.push_audio(&[0.0]).unwrap();
                        thread::sleep(Duration::from_millis(1));
                        guard.reset().unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let observed = max_in_use.load(Ordering::SeqCst);
        assert!(observed <= 2, "saw {observed} handles in use at once");
        assert!(observed >= 1);
    }
}
