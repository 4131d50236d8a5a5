/// Explicit stand-in for a `requestAnimationFrame`-style loop.
///
/// Each engine owns one, so either engine can run, pause, or be torn down
/// without affecting the other. The host (or a test) drives frames by calling
/// into the engine; the scheduler only gates whether a frame happens and
/// numbers the ones that do, so tests can step deterministically without a
/// display clock.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    running: bool,
    frames: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
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

    /// Frames executed since creation.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Begin a display frame. Returns the frame index while the loop is
    /// running, `None` when paused or stopped.
    pub fn begin_frame(&mut self) -> Option<u64> {
        if !self.running {
            return None;
        }
        let n = self.frames;
        self.frames = self.frames.wrapping_add(1);
        Some(n)
    }

    /// Run the injected per-frame callback if the loop is running.
    pub fn tick(&mut self, f: impl FnOnce(u64)) -> bool {
        match self.begin_frame() {
            Some(n) => {
                f(n);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stopped_scheduler_skips_frames() {
        let mut sched = FrameScheduler::new();
        assert!(sched.begin_frame().is_none());
        assert!(!sched.tick(|_| panic!("must not run")));
        assert_eq!(sched.frames(), 0);
    }

    #[test]
    fn frames_are_numbered_across_pauses() {
        let mut sched = FrameScheduler::new();
        sched.start();
        assert_eq!(sched.begin_frame(), Some(0));
        assert_eq!(sched.begin_frame(), Some(1));

        sched.stop();
        assert!(sched.begin_frame().is_none());

        sched.start();
        assert_eq!(sched.begin_frame(), Some(2));
        assert_eq!(sched.frames(), 3);
    }

    #[test]
    fn tick_passes_frame_index() {
        let mut sched = FrameScheduler::new();
        sched.start();
        let mut seen = Vec::new();
        for _ in 0..3 {
            sched.tick(|n| seen.push(n));
        }
        assert_eq!(seen, vec![0, 1, 2]);
    }
}
