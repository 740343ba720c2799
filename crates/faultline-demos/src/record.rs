//! `UserRecord`: a greeting or a visit counter, never both.
//!
//! The tag and the payload are one value. There is no way to set the tag
//! to one variant while the payload holds the other, and an operation
//! that only makes sense for one payload shape is only defined on it.

use std::fmt;

use faultline_core::ViolationError;

/// Text shown to a first-time user.
///
/// A greeting cannot be counted. There is no `increment` on it:
///
/// ```compile_fail,E0599
/// use faultline_demos::Greeting;
///
/// let mut greeting = Greeting::new("Hello!");
/// greeting.increment();
/// ```
///
/// nor on the record holding it:
///
/// ```compile_fail,E0599
/// use faultline_demos::UserRecord;
///
/// let mut record = UserRecord::new_user("Hello!");
/// record.increment();
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Greeting(String);

impl Greeting {
    /// Wrap `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The greeting text.
    pub fn text(&self) -> &str {
        &self.0
    }
}

/// Number of visits by a returning user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VisitCount(u32);

impl VisitCount {
    /// A count of `visits`.
    pub fn new(visits: u32) -> Self {
        Self(visits)
    }

    /// Current count.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Record one more visit. Saturates at `u32::MAX`.
    pub fn increment(&mut self) {
        self.0 = self.0.saturating_add(1);
    }
}

/// The tag of a [`UserRecord`], derived from its active variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UserKind {
    /// To be greeted.
    NewUser,
    /// To have their visit counted.
    CurrentUser,
}

impl UserKind {
    /// Variant name, as used in `VariantMismatch` reports.
    pub fn name(self) -> &'static str {
        match self {
            Self::NewUser => "NewUser",
            Self::CurrentUser => "CurrentUser",
        }
    }
}

impl fmt::Display for UserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A user record: tag and payload in a single sum type.
///
/// Matching on it must cover every variant:
///
/// ```compile_fail,E0004
/// use faultline_demos::UserRecord;
///
/// let record = UserRecord::new_user("Hello!");
/// match record {
///     UserRecord::NewUser(greeting) => println!("{}", greeting.text()),
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserRecord {
    /// A first-time user and their greeting.
    NewUser(Greeting),
    /// A returning user and their visit count.
    CurrentUser(VisitCount),
}

/// What [`UserRecord::visit`] did.
#[derive(Debug, PartialEq, Eq)]
pub enum Visit<'a> {
    /// A new user: show them this greeting.
    Greet(&'a Greeting),
    /// A returning user: their count after this visit.
    Counted(VisitCount),
}

impl UserRecord {
    /// A new user to be greeted with `text`.
    pub fn new_user(text: impl Into<String>) -> Self {
        Self::NewUser(Greeting::new(text))
    }

    /// A returning user with `visits` prior visits.
    pub fn current_user(visits: u32) -> Self {
        Self::CurrentUser(VisitCount::new(visits))
    }

    /// The record's tag.
    pub fn kind(&self) -> UserKind {
        match self {
            Self::NewUser(_) => UserKind::NewUser,
            Self::CurrentUser(_) => UserKind::CurrentUser,
        }
    }

    /// Handle a visit, dispatching on the active variant.
    pub fn visit(&mut self) -> Visit<'_> {
        match self {
            Self::NewUser(greeting) => Visit::Greet(greeting),
            Self::CurrentUser(count) => {
                count.increment();
                Visit::Counted(*count)
            }
        }
    }

    /// The greeting, if this is a new user.
    pub fn greeting(&self) -> Result<&Greeting, ViolationError> {
        match self {
            Self::NewUser(greeting) => Ok(greeting),
            Self::CurrentUser(_) => Err(mismatch(UserKind::NewUser, UserKind::CurrentUser)),
        }
    }

    /// The visit counter, if this is a returning user.
    pub fn visit_count_mut(&mut self) -> Result<&mut VisitCount, ViolationError> {
        match self {
            Self::CurrentUser(count) => Ok(count),
            Self::NewUser(_) => Err(mismatch(UserKind::CurrentUser, UserKind::NewUser)),
        }
    }
}

fn mismatch(expected: UserKind, found: UserKind) -> ViolationError {
    ViolationError::VariantMismatch {
        expected: expected.name(),
        found: found.name(),
    }
}
