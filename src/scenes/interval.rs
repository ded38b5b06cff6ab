/// A timed banner ("Wave 3", "GAME OVER") counted in logical frames.
#[derive(Clone, Debug, PartialEq)]
pub struct Interval {
    pub label: String,
    pub frame_counter: u32,
    pub duration: u32,
    pub complete: bool,
}

impl Interval {
    pub fn new(label: impl Into<String>, duration: u32) -> Self {
        Self {
            label: label.into(),
            frame_counter: 0,
            duration,
            complete: false,
        }
    }

    pub fn reset(&mut self) {
        self.frame_counter = 0;
        self.complete = false;
    }

    /// Count one frame.  Returns the frame index while the banner is still
    /// showing; marks the banner complete once `duration` frames have passed.
    pub fn advance(&mut self) -> Option<u32> {
        if self.complete {
            return None;
        }
        let frame = self.frame_counter;
        self.frame_counter += 1;
        if frame < self.duration {
            Some(frame)
        } else {
            self.complete = true;
            None
        }
    }

    pub fn showing(&self) -> bool {
        !self.complete && self.frame_counter <= self.duration
    }
}
