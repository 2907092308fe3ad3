use std::str::FromStr;

use crate::error::CoreError;

/// Recipe visibility class requested when listing a user's recipes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    /// Published and not deleted. Anyone may ask for it.
    #[default]
    Public,
    /// Unpublished and not deleted.
    Private,
    /// Everything that is not deleted.
    All,
    /// Soft-deleted recipes only.
    Deleted,
}

impl Visibility {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::All => "all",
            Self::Deleted => "deleted",
        }
    }

    /// Whether only the owner of the recipes may request this class.
    #[must_use]
    pub const fn owner_only(self) -> bool {
        !matches!(self, Self::Public)
    }

    /// ## Summary
    /// Evaluates the visibility filter against a recipe's flags.
    ///
    /// This is the in-memory twin of the SQL filter applied by the recipe
    /// query builders; both must agree.
    #[must_use]
    pub const fn admits(self, is_publish: bool, is_deleted: bool) -> bool {
        match self {
            Self::Public => is_publish && !is_deleted,
            Self::Private => !is_publish && !is_deleted,
            Self::All => !is_deleted,
            Self::Deleted => is_deleted,
        }
    }
}

impl FromStr for Visibility {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(Self::Public),
            "private" => Ok(Self::Private),
            "all" => Ok(Self::All),
            "deleted" => Ok(Self::Deleted),
            other => Err(CoreError::InvalidInput(format!(
                "Invalid visibility '{other}'; expected one of public, private, all, deleted"
            ))),
        }
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column a recipe listing is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortField {
    #[default]
    CreatedAt,
    CookTime,
    Name,
}

impl SortField {
    /// Parses a `sort` query value, falling back to the default for anything
    /// outside the allow-list.
    #[must_use]
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("cook_time") => Self::CookTime,
            Some("name") => Self::Name,
            _ => Self::CreatedAt,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::CookTime => "cook_time",
            Self::Name => "name",
        }
    }
}

/// Sort direction of a recipe listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Parses an `order` query value; unknown values mean descending.
    #[must_use]
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("asc") => Self::Asc,
            _ => Self::Desc,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}
