use serde::{Deserialize, Serialize};

///
/// FieldSet
///
/// Which attributes a retrieval brings back. `None` still returns the
/// record's id; the platform always includes it.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum FieldSet {
    #[default]
    All,
    None,
    Columns(Vec<String>),
}

impl FieldSet {
    #[must_use]
    pub fn columns<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Columns(names.into_iter().map(Into::into).collect())
    }

    /// Explicit column names, `None` for the `All`/`None` forms.
    #[must_use]
    pub fn names(&self) -> Option<&[String]> {
        match self {
            Self::Columns(names) => Some(names),
            _ => None,
        }
    }

    /// First requested column carrying a linked-entity alias (a `.` in the
    /// name). Such columns exist only inside join results and cannot be
    /// asked for again.
    #[must_use]
    pub fn aliased_column(&self) -> Option<&str> {
        self.names()?
            .iter()
            .find(|name| name.contains('.'))
            .map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for FieldSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::columns(iter)
    }
}
