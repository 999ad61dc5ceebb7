//! Boundary contracts for the two external collaborators: where frames come
//! from and how landmarks are found in them.

use gazecue_common::error::GazecueResult;
use gazecue_model::frame::Frame;
use gazecue_model::landmark::LandmarkSet;

/// A finite, ordered stream of frames backed by some resource.
pub trait FrameSource {
    /// What each frame carries for the landmark provider.
    type Payload;

    /// Pull the next frame, or `None` once the stream is exhausted.
    fn next_frame(&mut self) -> GazecueResult<Option<Frame<Self::Payload>>>;

    /// Release the underlying resource. Must tolerate repeated calls.
    fn close(&mut self);

    /// Source name for logging.
    fn name(&self) -> &str {
        "frame-source"
    }
}

/// Maps a frame payload to the landmark sets detected in it.
///
/// Implementations are handed to the pipeline explicitly; there is no
/// process-wide model instance.
pub trait LandmarkProvider<P: ?Sized> {
    /// Zero or more landmark sets, one per detected face.
    fn landmarks(&self, payload: &P) -> Vec<LandmarkSet>;
}

impl<P: ?Sized, L: LandmarkProvider<P> + ?Sized> LandmarkProvider<P> for &L {
    fn landmarks(&self, payload: &P) -> Vec<LandmarkSet> {
        (**self).landmarks(payload)
    }
}

impl<P: ?Sized, L: LandmarkProvider<P> + ?Sized> LandmarkProvider<P> for Box<L> {
    fn landmarks(&self, payload: &P) -> Vec<LandmarkSet> {
        (**self).landmarks(payload)
    }
}

/// Adapts a closure into a [`LandmarkProvider`].
pub struct FnLandmarks<F>(pub F);

impl<P: ?Sized, F> LandmarkProvider<P> for FnLandmarks<F>
where
    F: Fn(&P) -> Vec<LandmarkSet>,
{
    fn landmarks(&self, payload: &P) -> Vec<LandmarkSet> {
        (self.0)(payload)
    }
}

/// Owns an open frame source and closes it when dropped.
///
/// Wrapping the source right after it is opened guarantees `close()` runs on
/// every exit path, including `?` returns and panics inside the loop.
pub struct SourceGuard<S: FrameSource> {
    source: S,
    closed: bool,
}

impl<S: FrameSource> SourceGuard<S> {
    pub fn new(source: S) -> Self {
        tracing::debug!(source = %source.name(), "Frame source acquired");
        Self {
            source,
            closed: false,
        }
    }

    pub fn next_frame(&mut self) -> GazecueResult<Option<Frame<S::Payload>>> {
        self.source.next_frame()
    }

    /// Close now instead of at drop.
    pub fn close(mut self) {
        self.release();
    }

    pub fn get_ref(&self) -> &S {
        &self.source
    }

    fn release(&mut self) {
        if !self.closed {
            self.closed = true;
            self.source.close();
            tracing::debug!(source = %self.source.name(), "Frame source released");
        }
    }
}

impl<S: FrameSource> Drop for SourceGuard<S> {
    fn drop(&mut self) {
        self.release();
    }
}

/// An in-memory frame source over already decoded frames.
#[derive(Debug, Clone)]
pub struct VecSource<P> {
    frames: std::vec::IntoIter<Frame<P>>,
    closed: bool,
}

impl<P> VecSource<P> {
    pub fn new(frames: Vec<Frame<P>>) -> Self {
        Self {
            frames: frames.into_iter(),
            closed: false,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl<P> FrameSource for VecSource<P> {
    type Payload = P;

    fn next_frame(&mut self) -> GazecueResult<Option<Frame<P>>> {
        if self.closed {
            return Ok(None);
        }
        Ok(self.frames.next())
    }

    fn close(&mut self) {
        self.closed = true;
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gazecue_common::error::GazecueError;
    use std::cell::Cell;
    use std::rc::Rc;

    struct CountingSource {
        closes: Rc<Cell<u32>>,
        remaining: u32,
        fail_at: Option<u32>,
    }

    impl FrameSource for CountingSource {
        type Payload = ();

        fn next_frame(&mut self) -> GazecueResult<Option<Frame<()>>> {
            if self.fail_at == Some(self.remaining) {
                return Err(GazecueError::source_unavailable("read failed"));
            }
            if self.remaining == 0 {
                return Ok(None);
            }
            self.remaining -= 1;
            Ok(Some(Frame::new(0, 0.0, ())))
        }

        fn close(&mut self) {
            self.closes.set(self.closes.get() + 1);
        }
    }

    fn drain(guard: &mut SourceGuard<CountingSource>) -> GazecueResult<u32> {
        let mut n = 0;
        while guard.next_frame()?.is_some() {
            n += 1;
        }
        Ok(n)
    }

    #[test]
    fn test_guard_closes_once_on_drop() {
        let closes = Rc::new(Cell::new(0));
        {
            let mut guard = SourceGuard::new(CountingSource {
                closes: closes.clone(),
                remaining: 3,
                fail_at: None,
            });
            assert_eq!(drain(&mut guard).unwrap(), 3);
        }
        assert_eq!(closes.get(), 1);
    }

    #[test]
    fn test_guard_closes_on_error_path() {
        let closes = Rc::new(Cell::new(0));
        let result = {
            let mut guard = SourceGuard::new(CountingSource {
                closes: closes.clone(),
                remaining: 5,
                fail_at: Some(2),
            });
            drain(&mut guard)
        };
        assert!(result.is_err());
        assert_eq!(closes.get(), 1);
    }

    #[test]
    fn test_explicit_close_not_repeated_by_drop() {
        let closes = Rc::new(Cell::new(0));
        let guard = SourceGuard::new(CountingSource {
            closes: closes.clone(),
            remaining: 0,
            fail_at: None,
        });
        guard.close();
        assert_eq!(closes.get(), 1);
    }

    #[test]
    fn test_vec_source_yields_in_order_until_closed() {
        let mut source = VecSource::new(vec![
            Frame::new(0, 0.0, 'a'),
            Frame::new(1, 0.1, 'b'),
            Frame::new(2, 0.2, 'c'),
        ]);
        assert_eq!(source.next_frame().unwrap().unwrap().payload, 'a');
        assert_eq!(source.next_frame().unwrap().unwrap().payload, 'b');
        source.close();
        assert!(source.is_closed());
        assert!(source.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_fn_landmarks_adapter() {
        let provider = FnLandmarks(|n: &u32| vec![LandmarkSet::for_gaze(0.5, 0.5); *n as usize]);
        assert_eq!(provider.landmarks(&2).len(), 2);
        assert!((&provider).landmarks(&0).is_empty());
    }
}
