//! Strongly typed identifiers for customers and their passes through the flow.
//!
//! Both IDs are `Copy + Ord + Hash` so they can be used as map keys without
//! ceremony.  The inner integers are `pub` for direct use in counters and
//! report rows.

use std::fmt;

/// Identity of a synthetic customer, assigned monotonically by the arrival
/// process.  Stable across re-queue passes — the unique-diner set is keyed
/// by this type.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CustomerId(pub u32);

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Customer_{}", self.0)
    }
}

/// One pass through the buffet flow.
///
/// A re-queue (or an unmet-demand re-entry) derives the *next* pass of the
/// same customer; two passes of one customer never run concurrently, so a
/// `PassId` uniquely identifies the active process for its customer.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassId {
    pub customer: CustomerId,
    /// 0 for the initial pass, incremented on each derived pass.
    pub pass: u32,
}

impl PassId {
    /// The initial pass of a freshly arrived customer.
    #[inline]
    pub fn first(customer: CustomerId) -> Self {
        PassId { customer, pass: 0 }
    }

    /// Derive the identity of the next pass (re-queue or unmet-demand re-entry).
    #[inline]
    pub fn next(self) -> Self {
        PassId {
            customer: self.customer,
            pass: self.pass + 1,
        }
    }
}

impl fmt::Display for PassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.pass == 0 {
            write!(f, "{}", self.customer)
        } else {
            write!(f, "{}#{}", self.customer, self.pass)
        }
    }
}
