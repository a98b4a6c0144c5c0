//! Hash map alias used for tick storage.
//!
//! `ahash` or `rustc-hash` can be enabled for faster lookups when the tick
//! index holds many entries; with neither (or with `std-hash`, or with
//! conflicting selections) the std SipHash map is used.

#[cfg(all(
    feature = "ahash",
    not(any(feature = "rustc-hash", feature = "std-hash"))
))]
pub type FastMap<K, V> = ahash::AHashMap<K, V>;

#[cfg(all(
    feature = "rustc-hash",
    not(any(feature = "ahash", feature = "std-hash"))
))]
pub type FastMap<K, V> = rustc_hash::FxHashMap<K, V>;

#[cfg(any(
    not(any(feature = "ahash", feature = "rustc-hash", feature = "std-hash")),
    feature = "std-hash",
    all(feature = "ahash", feature = "rustc-hash"),
))]
pub type FastMap<K, V> = std::collections::HashMap<K, V>;
