//! Shared component rendering context
//!
//! `ComponentContext` carries UI metadata that components may need during
//! rendering, resizing, and event handling: focus, whether the component is
//! drawn as a modal overlay, and which glyph set the terminal can display.

use crate::ui::Glyphs;

#[derive(Debug, Clone, Copy)]
pub struct ComponentContext {
    focused: bool,
    overlay: bool,
    unicode: bool,
}

impl ComponentContext {
    /// Create a new `ComponentContext` with the given focus state.
    pub const fn new(focused: bool) -> Self {
        Self {
            focused,
            overlay: false,
            unicode: true,
        }
    }

    pub const fn focused(&self) -> bool {
        self.focused
    }

    pub const fn overlay(&self) -> bool {
        self.overlay
    }

    pub const fn unicode(&self) -> bool {
        self.unicode
    }

    pub const fn glyphs(&self) -> &'static Glyphs {
        Glyphs::for_mode(self.unicode)
    }

    pub const fn with_focus(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub const fn with_overlay(mut self, overlay: bool) -> Self {
        self.overlay = overlay;
        self
    }

    /// Return a new `ComponentContext` restricted to ASCII glyphs when
    /// `unicode` is false.
    pub const fn with_unicode(mut self, unicode: bool) -> Self {
        self.unicode = unicode;
        self
    }
}

impl Default for ComponentContext {
    fn default() -> Self {
        Self::new(false)
    }
}
