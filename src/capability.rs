//! Capability expressions and the three-valued match query.
//!
//! A capability is a named, optionally versioned dependency expression a
//! record provides or requires (`libssl`, `libssl >= 1.1`). Matching two
//! capabilities answers yes, no, or maybe; consumers that need certainty
//! (such as `ByCapMatch`) treat anything short of yes as a miss.

use crate::resolvable::Edition;
use anyhow::{Result, bail};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Comparison operator of a versioned capability.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Rel {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Rel {
    pub fn as_str(&self) -> &str {
        match self {
            Rel::Eq => "=",
            Rel::Ne => "!=",
            Rel::Lt => "<",
            Rel::Le => "<=",
            Rel::Gt => ">",
            Rel::Ge => ">=",
        }
    }

    fn parse(token: &str) -> Result<Self> {
        Ok(match token {
            "=" | "==" => Rel::Eq,
            "!=" => Rel::Ne,
            "<" => Rel::Lt,
            "<=" => Rel::Le,
            ">" => Rel::Gt,
            ">=" => Rel::Ge,
            other => bail!("unknown capability operator '{other}'"),
        })
    }

    /// Whether `lhs rel rhs` holds.
    fn holds(&self, lhs: &Edition, rhs: &Edition) -> bool {
        match self {
            Rel::Eq => lhs == rhs,
            Rel::Ne => lhs != rhs,
            Rel::Lt => lhs < rhs,
            Rel::Le => lhs <= rhs,
            Rel::Gt => lhs > rhs,
            Rel::Ge => lhs >= rhs,
        }
    }

    fn is_lower_bound(&self) -> bool {
        matches!(self, Rel::Gt | Rel::Ge)
    }
}

impl fmt::Display for Rel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Answer of a capability match query.
///
/// `Maybe` covers constraints the expressions alone cannot decide, e.g. a
/// bare name against a versioned request. Callers wanting a definite hit
/// must check for `Yes` explicitly.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CapMatch {
    Yes,
    Maybe,
    No,
}

impl CapMatch {
    pub fn is_yes(&self) -> bool {
        matches!(self, CapMatch::Yes)
    }
}

/// Named, optionally versioned dependency expression.
///
/// Text form is `name` or `name op edition` with a single space around the
/// operator (`libssl >= 1.1`). Serialized as that text, mirroring how
/// snapshots carry provides/requires lists.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Capability {
    name: String,
    constraint: Option<(Rel, Edition)>,
}

impl Capability {
    /// Unversioned capability for a bare name.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            bail!("capability name must not be empty");
        }
        Ok(Self {
            name,
            constraint: None,
        })
    }

    /// Versioned capability `name rel edition`.
    pub fn versioned(name: impl Into<String>, rel: Rel, edition: Edition) -> Result<Self> {
        let mut cap = Self::new(name)?;
        cap.constraint = Some((rel, edition));
        Ok(cap)
    }

    /// Parse the text form: `name` or `name op edition`.
    pub fn parse(text: &str) -> Result<Self> {
        let mut tokens = text.split_whitespace();
        let Some(name) = tokens.next() else {
            bail!("capability must not be empty");
        };
        match (tokens.next(), tokens.next(), tokens.next()) {
            (None, _, _) => Self::new(name),
            (Some(op), Some(edition), None) => {
                Self::versioned(name, Rel::parse(op)?, Edition::parse(edition)?)
            }
            _ => bail!("malformed capability '{text}', expected 'name' or 'name op edition'"),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn constraint(&self) -> Option<(Rel, &Edition)> {
        self.constraint.as_ref().map(|(rel, ed)| (*rel, ed))
    }

    /// Three-valued match against another capability expression.
    ///
    /// Different names never match. With both sides unversioned the names
    /// alone decide. With exactly one versioned side the expressions cannot
    /// decide either way, which is the `Maybe` case. With two constraints
    /// the answer is whether their edition ranges can intersect.
    pub fn matches(&self, other: &Capability) -> CapMatch {
        if self.name != other.name {
            return CapMatch::No;
        }
        match (&self.constraint, &other.constraint) {
            (None, None) => CapMatch::Yes,
            (None, Some(_)) | (Some(_), None) => CapMatch::Maybe,
            (Some(a), Some(b)) => {
                if ranges_intersect(a, b) {
                    CapMatch::Yes
                } else {
                    CapMatch::No
                }
            }
        }
    }
}

/// Whether two `(rel, edition)` constraints admit a common edition.
fn ranges_intersect(a: &(Rel, Edition), b: &(Rel, Edition)) -> bool {
    let (rel_a, ed_a) = a;
    let (rel_b, ed_b) = b;

    // A point constraint is decided by the other side's relation.
    if *rel_a == Rel::Eq {
        return rel_b.holds(ed_a, ed_b);
    }
    if *rel_b == Rel::Eq {
        return rel_a.holds(ed_b, ed_a);
    }

    // With Eq ruled out, a != constraint only removes one point from the
    // other side's (infinite) range.
    if *rel_a == Rel::Ne || *rel_b == Rel::Ne {
        return true;
    }

    // Two bounds in the same direction always overlap; opposite directions
    // overlap when the interval between them is non-empty.
    if rel_a.is_lower_bound() == rel_b.is_lower_bound() {
        return true;
    }
    let (lower, upper) = if rel_a.is_lower_bound() {
        ((rel_a, ed_a), (rel_b, ed_b))
    } else {
        ((rel_b, ed_b), (rel_a, ed_a))
    };
    match lower.1.cmp(upper.1) {
        std::cmp::Ordering::Less => true,
        std::cmp::Ordering::Equal => *lower.0 == Rel::Ge && *upper.0 == Rel::Le,
        std::cmp::Ordering::Greater => false,
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.constraint {
            None => f.write_str(&self.name),
            Some((rel, edition)) => write!(f, "{} {} {}", self.name, rel, edition),
        }
    }
}

impl std::str::FromStr for Capability {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for Capability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Capability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(serde::de::Error::custom)
    }
}
