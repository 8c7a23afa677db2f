//! Light/dark theme selection.
//!
//! The page starts from the visitor's saved choice, falls back to the
//! `prefers-color-scheme` media query, and marks dark mode with a class on
//! `<body>` so the stylesheet can switch palettes.

/// `localStorage` key holding the saved choice.
pub const THEME_KEY: &str = "theme";
pub const DARK_CLASS: &str = "dark-mode";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// The value written under [`THEME_KEY`].
    pub fn as_str(self) -> &'static str {
        if self.is_dark() {
            "dark"
        } else {
            "light"
        }
    }

    /// Reads a saved value back. Unknown strings are treated as no choice.
    pub fn from_stored(value: &str) -> Option<Self> {
        [Self::Light, Self::Dark]
            .into_iter()
            .find(|theme| theme.as_str() == value)
    }

    /// A stored preference wins; otherwise follow the system setting.
    pub fn resolve(stored: Option<&str>, system_prefers_dark: bool) -> Self {
        match stored.and_then(Self::from_stored) {
            Some(theme) => theme,
            None if system_prefers_dark => Self::Dark,
            None => Self::Light,
        }
    }

    pub fn toggled(self) -> Self {
        if self.is_dark() {
            Self::Light
        } else {
            Self::Dark
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    /// Accessible label for the toggle button, naming the theme it switches to.
    pub fn toggle_label(self) -> String {
        format!("Switch to {} mode", self.toggled().as_str())
    }

    /// Font Awesome icon class for the toggle button.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Light => "fas fa-sun",
            Self::Dark => "fas fa-moon",
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use self::browser::{apply_theme, persist_theme, resolve_theme, watch_system_theme};

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::{Theme, DARK_CLASS, THEME_KEY};
    use crate::error::{DomResultExt, SetupError};
    use wasm_bindgen::{closure::Closure, JsCast};
    use web_sys::{window, MediaQueryList, MediaQueryListEvent, Storage};

    const DARK_QUERY: &str = "(prefers-color-scheme: dark)";

    fn storage() -> Option<Storage> {
        window().and_then(|w| w.local_storage().ok().flatten())
    }

    fn dark_query() -> Option<MediaQueryList> {
        window()?.match_media(DARK_QUERY).ok().flatten()
    }

    fn read_stored_theme() -> Option<String> {
        storage()?.get_item(THEME_KEY).ok().flatten()
    }

    /// The theme to render on first paint.
    pub fn resolve_theme() -> Theme {
        let system_dark = dark_query().map(|mq| mq.matches()).unwrap_or(false);
        Theme::resolve(read_stored_theme().as_deref(), system_dark)
    }

    /// Adds or removes [`DARK_CLASS`] on `<body>`.
    pub fn apply_theme(theme: Theme) {
        let Some(body) = window().and_then(|w| w.document()).and_then(|d| d.body()) else {
            tracing::warn!("document body not available, theme not applied");
            return;
        };

        let classes = body.class_list();
        let _ = if theme.is_dark() {
            classes.add_1(DARK_CLASS)
        } else {
            classes.remove_1(DARK_CLASS)
        };
    }

    pub fn persist_theme(theme: Theme) {
        if let Some(storage) = storage() {
            if storage.set_item(THEME_KEY, theme.as_str()).is_err() {
                tracing::warn!("could not persist theme preference");
            }
        }
    }

    /// Calls `on_change` with the new system theme while no preference is
    /// stored. The listener lives for the rest of the page.
    pub fn watch_system_theme(on_change: impl Fn(Theme) + 'static) -> Result<(), SetupError> {
        let query = dark_query().ok_or(SetupError::MissingElement("prefers-color-scheme query"))?;

        let listener = Closure::<dyn FnMut(MediaQueryListEvent)>::new(move |event: MediaQueryListEvent| {
            if read_stored_theme().is_some() {
                return;
            }
            on_change(Theme::resolve(None, event.matches()));
        });

        query
            .add_event_listener_with_callback("change", listener.as_ref().unchecked_ref())
            .context("listen for system theme changes")?;
        listener.forget();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_preference_beats_system_signal() {
        assert_eq!(Theme::resolve(Some("light"), true), Theme::Light);
        assert_eq!(Theme::resolve(Some("dark"), false), Theme::Dark);
    }

    #[test]
    fn missing_or_garbage_preference_follows_system() {
        assert_eq!(Theme::resolve(None, true), Theme::Dark);
        assert_eq!(Theme::resolve(None, false), Theme::Light);
        assert_eq!(Theme::resolve(Some("sepia"), true), Theme::Dark);
    }

    #[test]
    fn toggle_round_trips_through_storage_string() {
        let next = Theme::Light.toggled();
        assert_eq!(Theme::from_stored(next.as_str()), Some(Theme::Dark));
        assert_eq!(Theme::from_stored("Dark"), None);
    }

    #[test]
    fn button_describes_the_other_theme() {
        assert_eq!(Theme::Dark.toggle_label(), "Switch to light mode");
        assert_eq!(Theme::Light.toggle_label(), "Switch to dark mode");
        assert_eq!(Theme::Dark.icon(), "fas fa-moon");
        assert_eq!(Theme::Light.icon(), "fas fa-sun");
    }
}
