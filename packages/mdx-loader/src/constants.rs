//! Protocol strings shared with the code that generates page wrappers.

/// Leading marker of every wrapper module this loader owns.
pub const WRAPPER_START: &str = "// gatsby-mdx wrapper";

/// Separates the header fields that follow [`WRAPPER_START`].
pub const HEADER_DELIMITER: &str = "\n// ";

/// Introduces the cached digest of the original file.
pub const HASH_MARKER: &str = "\n// hash ";

/// Node type of page records in the data layer.
pub const SITE_PAGE_TYPE: &str = "SitePage";
