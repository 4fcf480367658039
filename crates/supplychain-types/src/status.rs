use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Lifecycle label of a product.
///
/// The four named variants are the suggested progression
/// `Manufactured → Registered → In Supply → Wholesale Completed`. Any other
/// label is carried verbatim in [`ProductStatus::Other`]. No transition
/// table is enforced anywhere: a record may move from any label to any other.
///
/// Serialized as a bare string equal to [`ProductStatus::as_str`]. Equality
/// and hashing compare labels, so `Other("In Supply".into())` equals
/// [`ProductStatus::InSupply`].
#[derive(Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProductStatus {
    Manufactured,
    Registered,
    InSupply,
    WholesaleCompleted,
    /// Any caller-supplied label outside the suggested progression.
    Other(String),
}

impl ProductStatus {
    pub const MANUFACTURED: &'static str = "Manufactured";
    pub const REGISTERED: &'static str = "Registered";
    pub const IN_SUPPLY: &'static str = "In Supply";
    pub const WHOLESALE_COMPLETED: &'static str = "Wholesale Completed";

    /// The wire label for this status.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Manufactured => Self::MANUFACTURED,
            Self::Registered => Self::REGISTERED,
            Self::InSupply => Self::IN_SUPPLY,
            Self::WholesaleCompleted => Self::WHOLESALE_COMPLETED,
            Self::Other(label) => label,
        }
    }

    /// Returns `true` for the four labels of the suggested progression.
    pub fn is_known(&self) -> bool {
        matches!(
            self.as_str(),
            Self::MANUFACTURED | Self::REGISTERED | Self::IN_SUPPLY | Self::WHOLESALE_COMPLETED
        )
    }
}

impl From<&str> for ProductStatus {
    fn from(label: &str) -> Self {
        match label {
            Self::MANUFACTURED => Self::Manufactured,
            Self::REGISTERED => Self::Registered,
            Self::IN_SUPPLY => Self::InSupply,
            Self::WHOLESALE_COMPLETED => Self::WholesaleCompleted,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for ProductStatus {
    fn from(label: String) -> Self {
        match Self::from(label.as_str()) {
            Self::Other(_) => Self::Other(label),
            known => known,
        }
    }
}

impl From<ProductStatus> for String {
    fn from(status: ProductStatus) -> Self {
        match status {
            ProductStatus::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl PartialEq for ProductStatus {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for ProductStatus {}

impl Hash for ProductStatus {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl fmt::Debug for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProductStatus({:?})", self.as_str())
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
