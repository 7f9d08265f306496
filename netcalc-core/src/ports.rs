use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};

/// A decomposed switch port identifier such as `GigabitEthernet1/0/12`.
///
/// The alphabetic prefix (letters and `-`) names the port family; the numeric
/// path is the `/`-separated position. Ordering compares the prefix textually
/// and the path component-wise numerically, so `Gig1/0/2` sorts before
/// `Gig1/0/10`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortName {
    /// Alphabetic family prefix, e.g. `Gig` or `xe-`.
    pub prefix: String,
    /// Numeric path components, e.g. `[1, 0, 12]`.
    pub path: Vec<u64>,
}

impl PortName {
    /// Split a port identifier into prefix and numeric path.
    ///
    /// Returns `None` for names that do not follow the
    /// `letters` + `digits(/digits)*` shape, such as consolidated range
    /// labels or logical unit names like `ge-0/0/0.100`.
    pub fn parse(name: &str) -> Option<PortName> {
        let name = name.trim();
        let digits_at = name.find(|c: char| c.is_ascii_digit())?;
        let (prefix, numbers) = name.split_at(digits_at);
        if prefix.is_empty()
            || !prefix
                .chars()
                .all(|c| c.is_ascii_alphabetic() || c == '-')
        {
            return None;
        }
        let path = numbers
            .split('/')
            .map(|part| part.parse::<u64>().ok())
            .collect::<Option<Vec<u64>>>()?;
        Some(PortName {
            prefix: prefix.to_string(),
            path,
        })
    }

    /// True when `self` is the immediate next port after `other`: same
    /// prefix, same path depth, all leading components equal, and the last
    /// component exactly one higher.
    pub fn is_successor_of(&self, other: &PortName) -> bool {
        if self.prefix != other.prefix || self.path.len() != other.path.len() {
            return false;
        }
        let Some((last, leading)) = self.path.split_last() else {
            return false;
        };
        let Some((other_last, other_leading)) = other.path.split_last() else {
            return false;
        };
        leading == other_leading && *last == other_last + 1
    }
}

impl Ord for PortName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.prefix
            .cmp(&other.prefix)
            .then_with(|| self.path.cmp(&other.path))
    }
}

impl PartialOrd for PortName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for PortName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefix)?;
        for (idx, part) in self.path.iter().enumerate() {
            if idx > 0 {
                write!(f, "/")?;
            }
            write!(f, "{part}")?;
        }
        Ok(())
    }
}

/// Compare two raw port identifiers, falling back to plain string ordering
/// when either side does not decompose.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    match (PortName::parse(a), PortName::parse(b)) {
        (Some(left), Some(right)) => left.cmp(&right),
        _ => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use pretty_assertions::assert_eq;

    use super::{compare_names, PortName};

    #[test]
    fn parse_splits_prefix_and_path() {
        let name = PortName::parse("GigabitEthernet1/0/12").unwrap();
        assert_eq!(name.prefix, "GigabitEthernet");
        assert_eq!(name.path, vec![1, 0, 12]);
        assert_eq!(name.to_string(), "GigabitEthernet1/0/12");
    }

    #[test]
    fn parse_accepts_hyphenated_families() {
        let name = PortName::parse("xe-0/0/1").unwrap();
        assert_eq!(name.prefix, "xe-");
        assert_eq!(name.path, vec![0, 0, 1]);
    }

    #[test]
    fn parse_rejects_range_labels_and_units() {
        assert_eq!(PortName::parse("Gig1/0/1 - Gig1/0/24"), None);
        assert_eq!(PortName::parse("ge-0/0/0.100"), None);
        assert_eq!(PortName::parse("loopback"), None);
    }

    #[test]
    fn ordering_is_numeric_not_lexicographic() {
        assert_eq!(compare_names("Gig1/0/2", "Gig1/0/10"), Ordering::Less);
        assert_eq!(compare_names("Gig1/0/10", "Gig1/0/2"), Ordering::Greater);
        assert_eq!(compare_names("Gig1/0/9", "Gig2/0/1"), Ordering::Less);
    }

    #[test]
    fn successor_requires_matching_shape() {
        let base = PortName::parse("Gig1/0/3").unwrap();
        assert!(PortName::parse("Gig1/0/4").unwrap().is_successor_of(&base));
        assert!(!PortName::parse("Gig1/0/5").unwrap().is_successor_of(&base));
        assert!(!PortName::parse("Gig1/1/4").unwrap().is_successor_of(&base));
        assert!(!PortName::parse("Ten1/0/4").unwrap().is_successor_of(&base));
        assert!(!PortName::parse("Gig4").unwrap().is_successor_of(&base));
    }
}
