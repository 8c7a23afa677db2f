use thiserror::Error;

/// Failure while wiring one optional enhancement to the page.
///
/// None of these are fatal: callers log them and move on to the next
/// enhancement.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("browser window is unavailable")]
    NoWindow,
    #[error("document is unavailable")]
    NoDocument,
    #[error("element not found: {0}")]
    MissingElement(&'static str),
    #[error("{context}: {message}")]
    Dom {
        context: &'static str,
        message: String,
    },
}

impl SetupError {
    pub fn dom(context: &'static str, message: impl Into<String>) -> Self {
        Self::Dom {
            context,
            message: message.into(),
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub trait DomResultExt<T> {
    fn context(self, context: &'static str) -> Result<T, SetupError>;
}

#[cfg(target_arch = "wasm32")]
impl<T> DomResultExt<T> for Result<T, wasm_bindgen::JsValue> {
    fn context(self, context: &'static str) -> Result<T, SetupError> {
        self.map_err(|value| {
            let message = value
                .as_string()
                .unwrap_or_else(|| format!("{value:?}"));
            SetupError::dom(context, message)
        })
    }
}
