//! Mapping from a scene's logical coordinate space onto an on-screen rect.
//!
//! Scenes are laid out on fixed logical canvases (800x400 for the state view,
//! 800x200 for the timeline). The transform scales them uniformly to fit the
//! space egui gives us and centers the result.

use egui::{Pos2, Rect, Vec2};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasTransform {
    scale: f32,
    origin: Pos2,
}

impl CanvasTransform {
    /// Fits `logical` into `screen`, preserving aspect ratio.
    pub fn fit(logical: Vec2, screen: Rect) -> Self {
        let scale = if logical.x <= 0.0 || logical.y <= 0.0 {
            1.0
        } else {
            (screen.width() / logical.x).min(screen.height() / logical.y).max(0.0)
        };
        let used = logical * scale;
        let origin = screen.min + (screen.size() - used) / 2.0;
        Self { scale, origin }
    }

    #[cfg(test)]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn pos(&self, p: Pos2) -> Pos2 {
        self.origin + p.to_vec2() * self.scale
    }

    pub fn rect(&self, r: Rect) -> Rect {
        Rect::from_min_max(self.pos(r.min), self.pos(r.max))
    }

    pub fn len(&self, l: f32) -> f32 {
        l * self.scale
    }

    /// Screen rect covered by the whole logical canvas.
    pub fn bounds(&self, logical: Vec2) -> Rect {
        Rect::from_min_size(self.origin, logical * self.scale)
    }
}
