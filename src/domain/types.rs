//! Strongly-typed value objects used by domain entities.
//!
//! Domain structs should carry these wrappers instead of raw primitives so that
//! identifiers, text values and list options are enforced at the boundary.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// A numeric value required to be positive was zero or negative.
    #[error("{0} must not be less than 1")]
    NonPositiveNumber(&'static str),
    /// A string was empty or whitespace-only after trimming.
    #[error("{0} should not be empty")]
    EmptyString(&'static str),
    /// The sort expression names a field that cannot be ordered by.
    #[error("sort field `{0}` is not supported")]
    UnknownSortField(String),
    /// Catch-all for custom validation failures.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

fn trim_and_require_non_empty<S: Into<String>>(
    value: S,
    field: &'static str,
) -> Result<String, TypeConstraintError> {
    let trimmed = value.into().trim().to_string();
    if trimmed.is_empty() {
        Err(TypeConstraintError::EmptyString(field))
    } else {
        Ok(trimmed)
    }
}

/// Like [`trim_and_require_non_empty`] but keeps surrounding whitespace.
fn require_non_blank<S: Into<String>>(
    value: S,
    field: &'static str,
) -> Result<String, TypeConstraintError> {
    let value = value.into();
    if value.trim().is_empty() {
        Err(TypeConstraintError::EmptyString(field))
    } else {
        Ok(value)
    }
}

/// Fold text for contains matching: lowercase, then `ё` becomes `е`.
///
/// Stored search columns and user supplied terms go through the same fold,
/// so `мед` finds `Мёд` and `МЁД` alike.
pub fn fold_for_search(value: &str) -> String {
    value.to_lowercase().replace('ё', "е")
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        non_empty_string_newtype!($name, $doc, $field, trim_and_require_non_empty);
    };
    ($name:ident, $doc:expr, $field:expr, $normalize:ident) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Constructs a non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                $normalize(value, $field).map(Self)
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                self.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }

        impl PartialEq<$name> for &str {
            fn eq(&self, other: &$name) -> bool {
                *self == other.as_str()
            }
        }
    };
}

non_empty_string_newtype!(
    CategoryId,
    "Client supplied identifier of a category.",
    "id"
);
non_empty_string_newtype!(
    CategorySlug,
    "Human readable alternate key of a category.",
    "slug"
);
non_empty_string_newtype!(CategoryName, "Display name of a category.", "name");
non_empty_string_newtype!(
    CategoryDescription,
    "Free-form description of a category.",
    "description"
);
non_empty_string_newtype!(
    SearchTerm,
    "Text matched as a case-insensitive substring, whitespace included.",
    "search",
    require_non_blank
);

impl SearchTerm {
    /// The folded form compared against `*_folded` columns.
    pub fn folded(&self) -> String {
        fold_for_search(self.as_str())
    }
}

/// Columns a category listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategorySortField {
    Id,
    Slug,
    Name,
    Description,
    Active,
    CreatedDate,
}

impl CategorySortField {
    /// Wire name of the field as used in `sort` expressions.
    pub fn as_str(&self) -> &'static str {
        match self {
            CategorySortField::Id => "id",
            CategorySortField::Slug => "slug",
            CategorySortField::Name => "name",
            CategorySortField::Description => "description",
            CategorySortField::Active => "active",
            CategorySortField::CreatedDate => "createdDate",
        }
    }
}

impl FromStr for CategorySortField {
    type Err = TypeConstraintError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "id" => Ok(CategorySortField::Id),
            "slug" => Ok(CategorySortField::Slug),
            "name" => Ok(CategorySortField::Name),
            "description" => Ok(CategorySortField::Description),
            "active" => Ok(CategorySortField::Active),
            "createdDate" => Ok(CategorySortField::CreatedDate),
            other => Err(TypeConstraintError::UnknownSortField(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Parsed `sort` expression: a field name with an optional `-` prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySort {
    pub field: CategorySortField,
    pub direction: SortDirection,
}

impl CategorySort {
    pub const fn new(field: CategorySortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}

impl Default for CategorySort {
    /// Newest first.
    fn default() -> Self {
        Self::new(CategorySortField::CreatedDate, SortDirection::Desc)
    }
}

impl FromStr for CategorySort {
    type Err = TypeConstraintError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        let (direction, field) = match value.strip_prefix('-') {
            Some(field) => (SortDirection::Desc, field),
            None => (SortDirection::Asc, value),
        };
        Ok(Self::new(field.parse()?, direction))
    }
}

impl Display for CategorySort {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.direction {
            SortDirection::Asc => write!(f, "{}", self.field.as_str()),
            SortDirection::Desc => write!(f, "-{}", self.field.as_str()),
        }
    }
}

macro_rules! positive_count_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
        )]
        #[serde(transparent)]
        pub struct $name(usize);

        impl $name {
            /// Creates a new value ensuring it is at least one.
            pub fn new(value: usize) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveNumber($field))
                }
            }

            /// Returns the raw `usize`.
            pub const fn get(self) -> usize {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: usize) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

positive_count_newtype!(PageNumber, "One-based page index.", "page");
positive_count_newtype!(PageSize, "Maximum number of records per page.", "pageSize");

impl Default for PageNumber {
    fn default() -> Self {
        Self(1)
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(2)
    }
}

/// Offset/limit window over a sorted listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    pub page: PageNumber,
    pub page_size: PageSize,
}

impl PageWindow {
    pub const fn new(page: PageNumber, page_size: PageSize) -> Self {
        Self { page, page_size }
    }

    /// Number of records skipped before the window starts.
    ///
    /// `None` when the offset does not fit in a `usize`; such a window lies
    /// past the end of any listing.
    pub fn offset(&self) -> Option<usize> {
        (self.page.get() - 1).checked_mul(self.page_size.get())
    }

    pub fn limit(&self) -> usize {
        self.page_size.get()
    }
}
