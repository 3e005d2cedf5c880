//! Arcball controller
//!
//! Controls:
//! - Left button down: start a gesture at the cursor
//! - Cursor motion while held: drag the gesture
//! - Left button up: commit the gesture
//!
//! Events are queued as they arrive and applied in order by
//! [`ArcballController::update`], once per frame.

use fileorbit_core::OrientationState;
use fileorbit_math::{arcball, Quaternion, Viewport};
use winit::event::{ElementState, MouseButton};

/// One step of a gesture, with the handle already projected
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ArcballEvent {
    Begin(Quaternion),
    Drag(Quaternion),
    End,
}

/// Arcball controller for pointer input
pub struct ArcballController {
    viewport: Viewport,
    cursor: Option<(f32, f32)>,
    dragging: bool,
    pending: Vec<ArcballEvent>,
}

impl ArcballController {
    /// Controller for a surface of the given pixel size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            viewport: Viewport::new(width.max(1) as f32, height.max(1) as f32),
            cursor: None,
            dragging: false,
            pending: Vec::new(),
        }
    }

    /// Track a surface resize
    ///
    /// Zero sizes (minimized windows) are ignored; the old viewport stays.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.viewport = Viewport::new(width as f32, height as f32);
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Whether a gesture is in progress
    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Whether events are waiting for [`update`](Self::update)
    #[inline]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Process mouse button input; only the left button drives the arcball
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        if button != MouseButton::Left {
            return;
        }

        match state {
            ElementState::Pressed if !self.dragging => {
                let handle = self.handle_at_cursor();
                self.pending.push(ArcballEvent::Begin(handle));
                self.dragging = true;
            }
            ElementState::Released if self.dragging => {
                self.pending.push(ArcballEvent::End);
                self.dragging = false;
            }
            _ => {}
        }
    }

    /// Process cursor movement in physical pixels
    pub fn process_cursor_moved(&mut self, x: f64, y: f64) {
        self.cursor = Some((x as f32, y as f32));
        if self.dragging {
            let handle = self.handle_at_cursor();
            self.pending.push(ArcballEvent::Drag(handle));
        }
    }

    /// End any gesture in progress, e.g. when the window loses focus
    pub fn release(&mut self) {
        self.process_mouse_button(MouseButton::Left, ElementState::Released);
    }

    /// Apply queued events to `target` in arrival order
    ///
    /// Returns true if anything was applied.
    pub fn update<T: ArcballTarget + ?Sized>(&mut self, target: &mut T) -> bool {
        if self.pending.is_empty() {
            return false;
        }

        for event in self.pending.drain(..) {
            match event {
                ArcballEvent::Begin(handle) => target.begin_gesture(handle),
                ArcballEvent::Drag(handle) => target.drag_gesture(handle),
                ArcballEvent::End => {
                    target.end_gesture();
                    log::trace!("Arcball gesture committed");
                }
            }
        }
        true
    }

    /// Handle under the cursor; the viewport centre before any motion
    fn handle_at_cursor(&self) -> Quaternion {
        let (x, y) = self.cursor.unwrap_or_else(|| self.viewport.center());
        arcball::project(x, y, self.viewport)
    }
}

/// Something an arcball gesture can rotate
pub trait ArcballTarget {
    fn begin_gesture(&mut self, handle: Quaternion);
    fn drag_gesture(&mut self, handle: Quaternion);
    fn end_gesture(&mut self);
}

impl ArcballTarget for OrientationState {
    fn begin_gesture(&mut self, handle: Quaternion) {
        self.begin(handle);
    }

    fn drag_gesture(&mut self, handle: Quaternion) {
        self.drag_to(handle);
    }

    fn end_gesture(&mut self) {
        self.commit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fileorbit_math::Vec3;

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    /// Records every call it receives
    #[derive(Default)]
    struct Recorder {
        events: Vec<ArcballEvent>,
    }

    impl ArcballTarget for Recorder {
        fn begin_gesture(&mut self, handle: Quaternion) {
            self.events.push(ArcballEvent::Begin(handle));
        }
        fn drag_gesture(&mut self, handle: Quaternion) {
            self.events.push(ArcballEvent::Drag(handle));
        }
        fn end_gesture(&mut self) {
            self.events.push(ArcballEvent::End);
        }
    }

    #[test]
    fn test_motion_without_button_is_ignored() {
        let mut controller = ArcballController::new(640, 480);
        controller.process_cursor_moved(100.0, 100.0);
        controller.process_cursor_moved(200.0, 150.0);
        assert!(!controller.has_pending());

        let mut recorder = Recorder::default();
        assert!(!controller.update(&mut recorder));
        assert!(recorder.events.is_empty());
    }

    #[test]
    fn test_gesture_sequence() {
        let mut controller = ArcballController::new(640, 480);
        controller.process_cursor_moved(320.0, 240.0);
        controller.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        controller.process_cursor_moved(400.0, 240.0);
        controller.process_mouse_button(MouseButton::Left, ElementState::Released);

        let mut recorder = Recorder::default();
        assert!(controller.update(&mut recorder));
        assert_eq!(recorder.events.len(), 3);
        assert_eq!(recorder.events[0], ArcballEvent::Begin(Quaternion::new(0.0, 0.0, 0.0, 1.0)));
        assert!(matches!(recorder.events[1], ArcballEvent::Drag(_)));
        assert_eq!(recorder.events[2], ArcballEvent::End);
        assert!(!controller.has_pending());
    }

    #[test]
    fn test_other_buttons_ignored() {
        let mut controller = ArcballController::new(640, 480);
        controller.process_mouse_button(MouseButton::Right, ElementState::Pressed);
        controller.process_cursor_moved(10.0, 10.0);
        controller.process_mouse_button(MouseButton::Middle, ElementState::Released);
        assert!(!controller.is_dragging());
        assert!(!controller.has_pending());
    }

    #[test]
    fn test_release_without_press_is_ignored() {
        let mut controller = ArcballController::new(640, 480);
        controller.process_mouse_button(MouseButton::Left, ElementState::Released);
        controller.release();
        assert!(!controller.has_pending());
    }

    #[test]
    fn test_press_before_motion_uses_centre() {
        let mut controller = ArcballController::new(800, 600);
        controller.process_mouse_button(MouseButton::Left, ElementState::Pressed);

        let mut recorder = Recorder::default();
        controller.update(&mut recorder);
        assert_eq!(recorder.events, vec![ArcballEvent::Begin(Quaternion::new(0.0, 0.0, 0.0, 1.0))]);
    }

    #[test]
    fn test_drag_rotates_orientation() {
        let mut controller = ArcballController::new(640, 480);
        let mut camera = OrientationState::new();

        controller.process_cursor_moved(320.0, 240.0);
        controller.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        controller.process_cursor_moved(420.0, 240.0);
        controller.update(&mut camera);

        // Live preview, nothing committed yet
        let preview = camera.effective();
        assert_ne!(preview, Quaternion::IDENTITY);
        assert_eq!(camera.committed(), Quaternion::IDENTITY);

        controller.process_mouse_button(MouseButton::Left, ElementState::Released);
        controller.update(&mut camera);
        assert_eq!(camera.committed(), preview.normalized());

        // Dragging right turns +z towards +x
        let v = camera.effective().rotate(Vec3::Z);
        assert!(v.x > 0.0, "got {:?}", v);
        assert!(approx_eq(v.y, 0.0));
    }

    #[test]
    fn test_focus_loss_commits() {
        let mut controller = ArcballController::new(640, 480);
        let mut camera = OrientationState::new();
        controller.process_cursor_moved(100.0, 100.0);
        controller.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        controller.process_cursor_moved(150.0, 120.0);
        controller.release();
        controller.update(&mut camera);

        assert!(!controller.is_dragging());
        assert_eq!(camera.click(), Quaternion::IDENTITY);
        assert_ne!(camera.committed(), Quaternion::IDENTITY);
    }

    #[test]
    fn test_resize() {
        let mut controller = ArcballController::new(640, 480);
        controller.resize(0, 100);
        assert_eq!(controller.viewport(), Viewport::new(640.0, 480.0));
        controller.resize(1024, 768);
        assert_eq!(controller.viewport(), Viewport::new(1024.0, 768.0));
    }
}
