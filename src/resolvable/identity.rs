use anyhow::{Result, bail};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// Kind tag identifying a record's concrete subtype.
///
/// Known variants keep serialization consistent; `Other` preserves forward
/// compatibility with pools that introduce new record kinds. Unknown kinds
/// compare by their tag text and are never coerced to a known variant.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum ResKind {
    Package,
    SrcPackage,
    Pattern,
    Product,
    Patch,
    Other(String),
}

impl ResKind {
    pub fn as_str(&self) -> &str {
        match self {
            ResKind::Package => "package",
            ResKind::SrcPackage => "srcpackage",
            ResKind::Pattern => "pattern",
            ResKind::Product => "product",
            ResKind::Patch => "patch",
            ResKind::Other(value) => value.as_str(),
        }
    }

    pub(crate) fn from_str(value: &str) -> Self {
        match value {
            "package" => ResKind::Package,
            "srcpackage" => ResKind::SrcPackage,
            "pattern" => ResKind::Pattern,
            "product" => ResKind::Product,
            "patch" => ResKind::Patch,
            other => ResKind::Other(other.to_string()),
        }
    }

    /// A record is never constructed with an empty kind; only the `Other`
    /// escape hatch can carry one in from outside.
    pub fn is_empty(&self) -> bool {
        matches!(self, ResKind::Other(value) if value.is_empty())
    }
}

impl fmt::Display for ResKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ResKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ResKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_str(&value))
    }
}

/// Versioned identifier of a record: `[epoch:]version[-release]`.
///
/// Ordering follows the usual packaging rules: epoch dominates, then version
/// and release compare segment-wise (runs of digits compare numerically, runs
/// of letters lexically, digits beat letters, leftover segments win). An
/// absent release sorts before any concrete release. Equality is defined by
/// the same comparison, so `1.0` and `1.00` are the same edition.
#[derive(Clone, Debug)]
pub struct Edition {
    epoch: u32,
    version: String,
    release: Option<String>,
}

impl Edition {
    /// Parse an edition from its text form.
    ///
    /// The epoch is the numeric prefix before the first `:`; the release is
    /// everything after the last `-`. Both are optional.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        if text.is_empty() {
            bail!("edition must not be empty");
        }

        let (epoch, rest) = match text.split_once(':') {
            Some((epoch, rest)) => {
                let epoch: u32 = epoch
                    .parse()
                    .map_err(|_| anyhow::anyhow!("edition '{text}' has a non-numeric epoch"))?;
                (epoch, rest)
            }
            None => (0, text),
        };

        let (version, release) = match rest.rsplit_once('-') {
            Some((version, release)) => (version, Some(release.to_string())),
            None => (rest, None),
        };
        if version.is_empty() {
            bail!("edition '{text}' has an empty version");
        }
        if release.as_deref() == Some("") {
            bail!("edition '{text}' has an empty release");
        }

        Ok(Self {
            epoch,
            version: version.to_string(),
            release,
        })
    }

    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn release(&self) -> Option<&str> {
        self.release.as_deref()
    }
}

impl std::str::FromStr for Edition {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Edition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.epoch != 0 {
            write!(f, "{}:", self.epoch)?;
        }
        f.write_str(&self.version)?;
        if let Some(release) = &self.release {
            write!(f, "-{release}")?;
        }
        Ok(())
    }
}

impl PartialEq for Edition {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Edition {}

impl Ord for Edition {
    fn cmp(&self, other: &Self) -> Ordering {
        self.epoch
            .cmp(&other.epoch)
            .then_with(|| segment_cmp(&self.version, &other.version))
            .then_with(|| match (&self.release, &other.release) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (Some(a), Some(b)) => segment_cmp(a, b),
            })
    }
}

impl PartialOrd for Edition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Serialize for Edition {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Edition {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(serde::de::Error::custom)
    }
}

/// Segment-wise version comparison over two version fragments.
///
/// Separators split the strings into maximal runs of digits or letters.
/// Digit runs compare numerically (leading zeros ignored), letter runs
/// lexically, and a digit run outranks a letter run. When one side runs out
/// of segments, the side with content left wins.
fn segment_cmp(a: &str, b: &str) -> Ordering {
    let a = a.as_bytes();
    let b = b.as_bytes();
    let mut i = 0;
    let mut j = 0;

    loop {
        while i < a.len() && !a[i].is_ascii_alphanumeric() {
            i += 1;
        }
        while j < b.len() && !b[j].is_ascii_alphanumeric() {
            j += 1;
        }
        match (i < a.len(), j < b.len()) {
            (false, false) => return Ordering::Equal,
            (true, false) => return Ordering::Greater,
            (false, true) => return Ordering::Less,
            (true, true) => {}
        }

        let a_digits = a[i].is_ascii_digit();
        let b_digits = b[j].is_ascii_digit();
        let seg_a = take_run(a, &mut i, a_digits);
        let seg_b = take_run(b, &mut j, b_digits);

        if a_digits != b_digits {
            // Numeric segments always outrank alphabetic ones.
            return if a_digits {
                Ordering::Greater
            } else {
                Ordering::Less
            };
        }

        let ordering = if a_digits {
            let seg_a = strip_leading_zeros(seg_a);
            let seg_b = strip_leading_zeros(seg_b);
            seg_a.len().cmp(&seg_b.len()).then_with(|| seg_a.cmp(seg_b))
        } else {
            seg_a.cmp(seg_b)
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
}

fn take_run<'a>(bytes: &'a [u8], pos: &mut usize, digits: bool) -> &'a [u8] {
    let start = *pos;
    while *pos < bytes.len()
        && bytes[*pos].is_ascii_alphanumeric()
        && bytes[*pos].is_ascii_digit() == digits
    {
        *pos += 1;
    }
    &bytes[start..*pos]
}

fn strip_leading_zeros(segment: &[u8]) -> &[u8] {
    let first = segment
        .iter()
        .position(|b| *b != b'0')
        .unwrap_or(segment.len());
    &segment[first..]
}

// Compatibility rank of well-known architectures, weakest first. Tags not in
// the table sort after every known one.
const ARCH_ORDER: &[&str] = &[
    "noarch", "i386", "i486", "i586", "i686", "x86_64", "ia64", "ppc", "ppc64", "ppc64le", "s390",
    "s390x", "armv6l", "armv7l", "aarch64", "riscv64",
];

/// Architecture tag of a record.
///
/// Known tags order by compatibility rank (see `ARCH_ORDER`); unknown tags
/// sort after known ones and lexically among themselves. Equality is plain
/// tag equality either way.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Arch(pub String);

impl Arch {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The portable "runs anywhere" tag.
    pub fn noarch() -> Self {
        Self("noarch".to_string())
    }

    fn rank(&self) -> Option<usize> {
        ARCH_ORDER.iter().position(|tag| *tag == self.0)
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Ord for Arch {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.rank(), other.rank()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for Arch {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
