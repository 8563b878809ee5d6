//! Runtime identity of a fungible asset kind.

use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Next identifier handed out by [`AssetKind::fresh`].
static NEXT_KIND: AtomicU64 = AtomicU64::new(1);

/// Identifies one fungible asset kind.
///
/// Every vault is tagged with the kind it holds, and merging vaults of
/// different kinds is refused.  Fresh kinds are allocated only when an
/// [`Issuer`](crate::custody::Issuer) is created, so two issuers never
/// share a kind and no code path can mint units of a kind it does not
/// own.
///
/// # Examples
///
/// ```
/// use pair_amm::custody::Issuer;
///
/// let a = Issuer::new("A");
/// let b = Issuer::new("B");
/// assert_ne!(a.kind(), b.kind());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetKind(u64);

impl AssetKind {
    /// Allocates a kind never returned before in this process.
    pub(crate) fn fresh() -> Self {
        Self(NEXT_KIND.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the numeric identifier.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "asset#{}", self.0)
    }
}
