//! Independently fetched collection state.

/// A collection loaded from the backend, with its own loading and error state
#[derive(Debug, Clone, PartialEq)]
pub struct Loadable<T> {
    value: Option<T>,
    loading: bool,
    error: Option<String>,
}

impl<T> Default for Loadable<T> {
    fn default() -> Self {
        Self {
            value: None,
            loading: false,
            error: None,
        }
    }
}

impl<T> Loadable<T> {
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_loaded(&self) -> bool {
        self.value.is_some()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub(crate) fn start(&mut self) {
        self.loading = true;
    }

    /// Store a fresh value; the previous error is forgotten
    pub(crate) fn succeed(&mut self, value: T) {
        self.value = Some(value);
        self.loading = false;
        self.error = None;
    }

    /// Keep the last good value and record the error
    pub(crate) fn fail(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}

impl<T: Clone> Loadable<Vec<T>> {
    /// Items, or an empty list before the first successful load
    pub fn items(&self) -> Vec<T> {
        self.value.clone().unwrap_or_default()
    }
}
