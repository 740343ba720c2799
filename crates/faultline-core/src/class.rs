//! The [`ViolationClass`] identifier for catalogue entries.

use std::fmt;
use std::str::FromStr;

/// One of the four memory-safety bug classes in the catalogue.
///
/// Each class has exactly one demo. The declaration order is the order
/// the catalogue runs them in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ViolationClass {
    /// A reference outliving the scope that owns its referent.
    Scope,
    /// An access outside the bounds of an allocation.
    Spatial,
    /// Use or release of a resource after its lifetime ended.
    Temporal,
    /// Reading a union payload under the wrong variant.
    TypeConfusion,
}

impl ViolationClass {
    /// Every class, in catalogue order.
    pub const ALL: [ViolationClass; 4] = [
        ViolationClass::Scope,
        ViolationClass::Spatial,
        ViolationClass::Temporal,
        ViolationClass::TypeConfusion,
    ];

    /// Kebab-case name used on the command line.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Scope => "scope",
            Self::Spatial => "spatial",
            Self::Temporal => "temporal",
            Self::TypeConfusion => "type-confusion",
        }
    }

    /// One-line description of the bug class.
    pub fn summary(self) -> &'static str {
        match self {
            Self::Scope => "reference escapes the scope that owns its referent",
            Self::Spatial => "write past the allocated bound of a buffer",
            Self::Temporal => "use and double release of an invalidated handle",
            Self::TypeConfusion => "union payload read under the wrong variant tag",
        }
    }
}

impl fmt::Display for ViolationClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Error returned when parsing an unknown class slug.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownClass(pub String);

impl fmt::Display for UnknownClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown violation class '{}'", self.0)
    }
}

impl std::error::Error for UnknownClass {}

impl FromStr for ViolationClass {
    type Err = UnknownClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|class| class.slug() == s)
            .ok_or_else(|| UnknownClass(s.to_string()))
    }
}
