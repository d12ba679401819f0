//! Supported Java language versions and version ranges.

use std::fmt;

/// Java language versions the DSL can target, oldest first.
///
/// The derived `Ord` follows release order, so comparisons like
/// `J1_8 < J9` read naturally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum JavaVersion {
    J1_3,
    J1_4,
    J1_5,
    J1_6,
    J1_7,
    J1_8,
    J9,
    J10,
    J11,
}

impl JavaVersion {
    /// All supported versions, ascending.
    pub const ALL: [JavaVersion; 9] = [
        JavaVersion::J1_3,
        JavaVersion::J1_4,
        JavaVersion::J1_5,
        JavaVersion::J1_6,
        JavaVersion::J1_7,
        JavaVersion::J1_8,
        JavaVersion::J9,
        JavaVersion::J10,
        JavaVersion::J11,
    ];

    pub const fn earliest() -> Self {
        Self::ALL[0]
    }

    pub const fn latest() -> Self {
        Self::ALL[Self::ALL.len() - 1]
    }

    /// Canonical display name, e.g. `1.8` or `11`.
    pub fn display_name(self) -> &'static str {
        match self {
            JavaVersion::J1_3 => "1.3",
            JavaVersion::J1_4 => "1.4",
            JavaVersion::J1_5 => "1.5",
            JavaVersion::J1_6 => "1.6",
            JavaVersion::J1_7 => "1.7",
            JavaVersion::J1_8 => "1.8",
            JavaVersion::J9 => "9",
            JavaVersion::J10 => "10",
            JavaVersion::J11 => "11",
        }
    }

    /// Contiguous inclusive range from `self` to `last`.
    ///
    /// Ascending when `last` is the later version, descending when it is
    /// the earlier one; equal endpoints yield the singleton `[self]`.
    pub fn range_to(self, last: JavaVersion) -> Vec<JavaVersion> {
        if self <= last {
            Self::ALL
                .iter()
                .copied()
                .filter(|version| *version >= self && *version <= last)
                .collect()
        } else {
            Self::ALL
                .iter()
                .rev()
                .copied()
                .filter(|version| *version <= self && *version >= last)
                .collect()
        }
    }
}

impl fmt::Display for JavaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
