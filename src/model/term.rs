use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// How a snapshot is addressed in a path parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    Latest,
    Ordinal(u64),
    Hash(String),
}

impl Term {
    pub fn parse(raw: &str) -> Self {
        if raw == "latest" {
            Term::Latest
        } else if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            raw.parse().map_or_else(|_| Term::Hash(raw.to_string()), Term::Ordinal)
        } else {
            Term::Hash(raw.to_string())
        }
    }
}

impl FromStr for Term {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Term::parse(s))
    }
}

impl From<u64> for Term {
    fn from(ordinal: u64) -> Self {
        Term::Ordinal(ordinal)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Latest => write!(f, "latest"),
            Term::Ordinal(ordinal) => write!(f, "{ordinal}"),
            Term::Hash(hash) => write!(f, "{hash}"),
        }
    }
}
