//! DialogResult - Outcome of a modal input step

/// What a create/edit/transfer dialog hands back to its caller
#[derive(Debug, Clone, PartialEq)]
pub enum DialogResult<T> {
    Submitted(T),
    Cancelled,
}

impl<T> DialogResult<T> {
    pub fn submitted(self) -> Option<T> {
        match self {
            DialogResult::Submitted(value) => Some(value),
            DialogResult::Cancelled => None,
        }
    }
}

impl<T> From<Option<T>> for DialogResult<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => DialogResult::Submitted(v),
            None => DialogResult::Cancelled,
        }
    }
}
