use crate::geometry::{distance_sq, Path, Point};

/// Squared device-pixel distance a pointer must travel before another sample
/// is kept.
pub const MIN_MOTION_SQ: f64 = 6.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DrawMode {
    /// First press starts the stroke, the next press ends it.
    #[default]
    ClickToDraw,
    /// Press starts the stroke, release or leaving the canvas ends it.
    DragToDraw,
}

impl DrawMode {
    pub fn from_click_to_draw(click_to_draw: bool) -> Self {
        if click_to_draw {
            DrawMode::ClickToDraw
        } else {
            DrawMode::DragToDraw
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum CaptureState {
    #[default]
    Idle,
    Capturing,
}

/// Accumulates raw pointer samples into a candidate path.
#[derive(Clone, Debug, Default)]
pub struct CaptureMachine {
    state: CaptureState,
    buffer: Path,
}

impl CaptureMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_capturing(&self) -> bool {
        self.state == CaptureState::Capturing
    }

    /// Points gathered so far, in device space.
    pub fn in_progress(&self) -> &[Point] {
        &self.buffer
    }

    /// True when leaving now would lose work: a stroke is open or more than
    /// one point is buffered.
    pub fn has_pending(&self) -> bool {
        self.is_capturing() || self.buffer.len() > 1
    }

    /// Pointer pressed. In click mode a press while capturing closes the
    /// stroke and returns it.
    pub fn press(&mut self, point: Point, mode: DrawMode) -> Option<Path> {
        if mode == DrawMode::ClickToDraw && self.is_capturing() {
            return self.finish();
        }
        self.state = CaptureState::Capturing;
        self.buffer.clear();
        self.push_filtered(point);
        None
    }

    /// Pointer moved. Returns whether the sample was kept.
    pub fn motion(&mut self, point: Point) -> bool {
        if !self.is_capturing() {
            return false;
        }
        self.push_filtered(point)
    }

    /// Pointer released. Only closes drag strokes.
    pub fn release(&mut self, mode: DrawMode) -> Option<Path> {
        if mode == DrawMode::ClickToDraw || !self.is_capturing() {
            return None;
        }
        self.finish()
    }

    /// Pointer left the surface; same rules as a release.
    pub fn leave(&mut self, mode: DrawMode) -> Option<Path> {
        self.release(mode)
    }

    /// Ends capture unconditionally. The buffer is emptied either way and a
    /// path comes back only if it has at least two points.
    pub fn finish(&mut self) -> Option<Path> {
        self.state = CaptureState::Idle;
        let path = std::mem::take(&mut self.buffer);
        (path.len() >= 2).then_some(path)
    }

    pub fn cancel(&mut self) {
        self.state = CaptureState::Idle;
        self.buffer.clear();
    }

    fn push_filtered(&mut self, point: Point) -> bool {
        if let Some(last) = self.buffer.last() {
            if distance_sq(*last, point) < MIN_MOTION_SQ {
                return false;
            }
        }
        self.buffer.push(point);
        true
    }
}
