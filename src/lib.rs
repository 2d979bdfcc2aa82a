//! Transparent function memoization with automatic key semantics.
//!
//! Wrapping a [`Func`] with [`memoize`] yields a function with the same
//! calling surface whose results are cached per argument combination, with
//! no hashing or equality callback supplied by the caller. Instead, every
//! argument brings its own key semantics: objects and callables are keyed by
//! allocation identity (and held weakly, so the cache never keeps an
//! argument alive), scalars by their canonical string form.
//!
//! The caching strategy is fixed once, at wrap time, from the function's
//! declared arity: a one-parameter function gets the keyed stores, any other
//! arity gets an append-only log of previous calls matched by element-wise
//! strict equality. Caches are unbounded; nothing is ever evicted beyond
//! the silent reclamation of identity keys that died elsewhere.
//!
//! ```
//! use automemo::{Func, Value, memoize};
//!
//! let double = Func::new(1, |args| {
//!     Value::from(args[0].as_num().unwrap_or(f64::NAN) * 2.0)
//! });
//!
//! let double = memoize(&double);
//! assert_eq!(double.call(&[Value::from(2)]), Value::from(4));
//!
//! // Same canonical key, served from cache.
//! assert_eq!(double.call(&[Value::from(2)]), Value::from(4));
//! ```

mod calllog;
mod classify;
mod memoize;
mod store;
mod value;

#[cfg(feature = "testing")]
pub mod testing;

pub use crate::memoize::memoize;
pub use crate::value::{Func, Object, Value};
