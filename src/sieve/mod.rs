//! Filter functors operating on pool content.
//!
//! A simple filter is any value matching the signature "one input handle in,
//! boolean-convertible result out", captured by the [`Sieve`] trait. Besides the basic
//! predicates that actually evaluate a record (`ByKind`, `ByName`, …) the
//! module offers logical combinators to build more complex filters, and the
//! traversal functions that run a filter plus an action over a collection.
//!
//! Filters and actions share one signature; the difference is how the
//! traversal interprets the result. A filter's `false` skips the element, an
//! action's `false` stops the whole scan. That makes an action functor a
//! handy place to collect query results:
//!
//! ```
//! use poolsieve::{ByName, PoolEntry, Sieve, by_kind, by_ref, chain, not, Package};
//!
//! /// Prints and counts entries; keeps scanning.
//! struct PrintAndCount(usize);
//!
//! impl Sieve<PoolEntry> for PrintAndCount {
//!     fn accept(&mut self, entry: &PoolEntry) -> bool {
//!         println!("{entry}");
//!         self.0 += 1;
//!         true
//!     }
//! }
//!
//! let mut counter = PrintAndCount(0);
//!
//! // Print and count all packages not named "kernel".
//! pool.for_each(
//!     chain(by_kind::<Package>(), not(ByName::new("kernel"))),
//!     by_ref(&mut counter),
//! );
//! println!("{} matches", counter.0);
//! ```
//!
//! Compositions are by value: `chain`/`not` take copies of their operands,
//! so a stateful functor passed by value fills a copy the caller never sees.
//! Wrap it in [`by_ref`] to keep the state on the caller's side, as above.
//! Functors should otherwise stay lightweight (a kind tag, a name, an
//! edition plus comparison strategy) so copies stay cheap.

pub mod attr;
pub mod cap;
pub mod functional;
pub mod status;

pub use attr::{
    ByArch, ByEdition, ByKind, ByName, BySource, CmpEq, CmpGe, CmpGt, CmpLe, CmpLt, CmpNe,
    Compare, by_arch, by_arch_with, by_edition, by_edition_with, by_kind,
};
pub use cap::{
    ByCaiInstalled, ByCaiKind, ByCaiNotTransact, ByCaiTransact, ByCaiUninstalled,
    ByCapMatch, ByCapabilityIndex, by_cai_kind,
};
pub use functional::{
    Always, ByRef, Chain, Never, Not, Sieve, always_false, always_true, by_ref, chain, for_each,
    for_each_all, not,
};
pub use status::{ByInstalled, ByLock, ByTransact, ByUninstalled};
