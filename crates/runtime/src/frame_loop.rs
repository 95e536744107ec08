use crate::frame::Frame;

pub const DEFAULT_DT_S: f64 = 1.0 / 60.0;

/// Free-running per-frame clock owned by a scene host.
///
/// The host's driver (requestAnimationFrame, a native timer, a test) calls
/// [`FrameLoop::tick`]; a stopped loop yields no frames.
#[derive(Debug, Clone)]
pub struct FrameLoop {
    running: bool,
    next: Frame,
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new(DEFAULT_DT_S)
    }
}

impl FrameLoop {
    pub fn new(dt_s: f64) -> Self {
        Self {
            running: false,
            next: Frame::first(dt_s),
        }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames produced so far.
    pub fn frame_count(&self) -> u64 {
        self.next.index
    }

    /// Returns the frame to render, or `None` while stopped.
    pub fn tick(&mut self) -> Option<Frame> {
        if !self.running {
            return None;
        }
        let frame = self.next;
        self.next = frame.next();
        Some(frame)
    }

    /// Stops the loop and rewinds to frame 0.
    pub fn reset(&mut self) {
        self.running = false;
        self.next = Frame::first(self.next.dt_s);
    }
}

#[cfg(test)]
mod tests {
    use super::FrameLoop;

    #[test]
    fn stopped_loop_yields_nothing() {
        let mut l = FrameLoop::new(0.5);
        assert!(l.tick().is_none());
        assert_eq!(l.frame_count(), 0);
    }

    #[test]
    fn running_loop_advances() {
        let mut l = FrameLoop::new(0.5);
        l.start();
        assert_eq!(l.tick().map(|f| f.index), Some(0));
        assert_eq!(l.tick().map(|f| f.index), Some(1));
        l.stop();
        assert!(l.tick().is_none());
        l.start();
        assert_eq!(l.tick().map(|f| f.index), Some(2));
    }

    #[test]
    fn reset_rewinds_and_stops() {
        let mut l = FrameLoop::new(0.5);
        l.start();
        l.tick();
        l.reset();
        assert!(!l.is_running());
        assert_eq!(l.frame_count(), 0);
    }
}
