use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Comparison operator of a requirement line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Operator {
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = "~=")]
    Compatible,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
}

impl Operator {
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Eq => "==",
            Operator::Ge => ">=",
            Operator::Le => "<=",
            Operator::Ne => "!=",
            Operator::Compatible => "~=",
            Operator::Gt => ">",
            Operator::Lt => "<",
        }
    }
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "==" => Ok(Operator::Eq),
            ">=" => Ok(Operator::Ge),
            "<=" => Ok(Operator::Le),
            "!=" => Ok(Operator::Ne),
            "~=" => Ok(Operator::Compatible),
            ">" => Ok(Operator::Gt),
            "<" => Ok(Operator::Lt),
            other => Err(format!("unknown version operator `{other}`")),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionConstraint {
    pub operator: Operator,
    pub version: String,
}

impl VersionConstraint {
    pub fn new(operator: Operator, version: impl Into<String>) -> Self {
        Self {
            operator,
            version: version.into(),
        }
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.operator, self.version)
    }
}

/// Reconciled dependencies keyed by package name, iterated in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Manifest {
    entries: BTreeMap<String, Option<VersionConstraint>>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, package: impl Into<String>, constraint: Option<VersionConstraint>) {
        self.entries.insert(package.into(), constraint);
    }

    pub fn contains(&self, package: &str) -> bool {
        self.entries.contains_key(package)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&VersionConstraint>)> {
        self.entries
            .iter()
            .map(|(name, constraint)| (name.as_str(), constraint.as_ref()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// `name` or `name<op><version>` per dependency, sorted by name.
    pub fn lines(&self) -> Vec<String> {
        self.iter()
            .map(|(name, constraint)| match constraint {
                Some(constraint) => format!("{name}{constraint}"),
                None => name.to_string(),
            })
            .collect()
    }
}
