use std::borrow::Cow;

/// A UI label: either raw text or a message key path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Label {
    Raw(String),
    Key(Cow<'static, str>),
}

impl Label {
    pub fn raw(s: impl Into<String>) -> Self {
        Self::Raw(s.into())
    }

    pub fn key(path: impl Into<Cow<'static, str>>) -> Self {
        Self::Key(path.into())
    }
}

impl From<String> for Label {
    fn from(s: String) -> Self {
        Self::Raw(s)
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Self::Raw(s.to_string())
    }
}

impl From<&String> for Label {
    fn from(s: &String) -> Self {
        Self::Raw(s.clone())
    }
}
