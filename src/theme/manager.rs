//! Theme Manager for SplitMark
//!
//! Tracks the stored theme preference together with the operating system's
//! dark-mode flag, and applies the resulting visuals to the egui context
//! whenever the effective light/dark choice changes.

use eframe::egui::Context;
use log::{debug, info};

use super::ThemeColors;
use crate::config::Theme;

// ─────────────────────────────────────────────────────────────────────────────
// Theme Manager
// ─────────────────────────────────────────────────────────────────────────────

/// Resolves the theme preference and keeps egui's visuals in sync with it.
#[derive(Debug, Clone)]
pub struct ThemeManager {
    /// Stored preference (Light, Dark, or System)
    preference: Theme,
    /// Last reported operating system dark-mode flag
    system_dark: bool,
    /// Light/dark choice most recently applied to the context
    applied_dark: Option<bool>,
}

impl ThemeManager {
    pub fn new(preference: Theme) -> Self {
        info!("ThemeManager initialized with preference: {:?}", preference);
        Self {
            preference,
            system_dark: false,
            applied_dark: None,
        }
    }

    /// The stored preference.
    pub fn preference(&self) -> Theme {
        self.preference
    }

    /// Update the operating system's dark-mode flag. `None` keeps the last
    /// known value.
    ///
    /// A change forces the next [`apply_if_needed`](Self::apply_if_needed)
    /// to reapply, since the windowing layer resets visuals on theme changes.
    pub fn set_system_dark(&mut self, system_dark: Option<bool>) {
        if let Some(dark) = system_dark {
            if dark != self.system_dark {
                debug!("System dark mode changed to: {}", dark);
                self.system_dark = dark;
                self.applied_dark = None;
            }
        }
    }

    /// Whether the dark palette is in effect.
    pub fn is_dark(&self) -> bool {
        self.preference.is_dark(self.system_dark)
    }

    /// Switch to the opposite of what is shown now, storing it as an
    /// explicit preference. Returns the new preference.
    pub fn toggle(&mut self) -> Theme {
        let next = self.preference.toggled(self.system_dark);
        info!("Theme changed from {:?} to {:?}", self.preference, next);
        self.preference = next;
        next
    }

    /// Colors for the effective theme.
    pub fn colors(&self) -> ThemeColors {
        ThemeColors::for_dark_mode(self.is_dark())
    }

    /// Whether the context needs new visuals.
    pub fn needs_apply(&self) -> bool {
        self.applied_dark != Some(self.is_dark())
    }

    /// Apply visuals if the effective theme changed. Returns `true` if applied.
    pub fn apply_if_needed(&mut self, ctx: &Context) -> bool {
        if !self.needs_apply() {
            return false;
        }
        let dark = self.is_dark();
        ctx.set_visuals(self.colors().to_visuals());
        self.applied_dark = Some(dark);
        debug!("Applied {} theme", if dark { "dark" } else { "light" });
        true
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_preference_follows_os() {
        let mut manager = ThemeManager::new(Theme::System);
        assert!(!manager.is_dark());
        manager.set_system_dark(Some(true));
        assert!(manager.is_dark());
        manager.set_system_dark(None);
        assert!(manager.is_dark());
    }

    #[test]
    fn test_explicit_preference_ignores_os() {
        let mut manager = ThemeManager::new(Theme::Light);
        manager.set_system_dark(Some(true));
        assert!(!manager.is_dark());
    }

    #[test]
    fn test_toggle_from_system_stores_opposite() {
        let mut manager = ThemeManager::new(Theme::System);
        manager.set_system_dark(Some(true));
        assert_eq!(manager.toggle(), Theme::Light);
        assert_eq!(manager.preference(), Theme::Light);
        assert!(!manager.is_dark());
        assert_eq!(manager.toggle(), Theme::Dark);
    }

    #[test]
    fn test_apply_only_when_effective_theme_changes() {
        let ctx = Context::default();
        let mut manager = ThemeManager::new(Theme::Dark);

        assert!(manager.apply_if_needed(&ctx));
        assert!(ctx.style().visuals.dark_mode);
        assert!(!manager.apply_if_needed(&ctx));

        manager.toggle();
        assert!(manager.apply_if_needed(&ctx));
        assert!(!ctx.style().visuals.dark_mode);
    }

    #[test]
    fn test_system_change_forces_reapply() {
        let ctx = Context::default();
        let mut manager = ThemeManager::new(Theme::Light);
        assert!(manager.apply_if_needed(&ctx));

        manager.set_system_dark(Some(true));
        assert!(manager.needs_apply());
        assert!(manager.apply_if_needed(&ctx));
        assert!(!ctx.style().visuals.dark_mode);

        manager.set_system_dark(Some(true));
        assert!(!manager.needs_apply());
    }
}
