//! Arity dispatch and the wrap operation.

use std::cell::RefCell;
use std::slice;

use crate::calllog::CallLog;
use crate::classify::{Kind, classify};
use crate::store::{PrimStore, RefStore};
use crate::value::{Func, Value};

/// Wraps a function so that repeated calls with matching arguments are
/// served from cache.
///
/// The wrapper has the same calling surface as `func`: it reports the same
/// declared arity, forwards arguments, and returns the original's results.
/// The declared arity is read exactly once, here, and permanently selects
/// the caching strategy:
///
/// - Exactly one declared parameter: the first actual argument is the key.
///   Objects and callables are keyed by allocation identity (held weakly, so
///   the cache never keeps an argument alive); scalars are keyed by their
///   canonical string form, which collapses scalars that share it: the
///   number `1` and the string `"1"` are one key.
/// - Any other declared arity: calls are matched against an append-only log
///   of previous calls by element-wise strict equality. The log is scanned
///   linearly and never shrinks. A function declared with zero parameters is
///   never served from cache; every call recomputes.
///
/// Calling with a different actual argument count than the declared arity
/// does not change the strategy.
///
/// Each call to `memoize` creates fresh cache state, even for a function
/// that is already wrapped. A wrapped function may recursively call its own
/// wrapper; no cache state is borrowed while the original runs. A panic in
/// the original unwinds through the wrapper unchanged and caches nothing.
///
/// ```
/// use automemo::{Func, Value, memoize};
///
/// let double = Func::new(1, |args| {
///     Value::from(args[0].as_num().unwrap_or(f64::NAN) * 2.0)
/// });
///
/// let double = memoize(&double);
/// assert_eq!(double.call(&[Value::from(2)]), Value::from(4));
/// assert_eq!(double.call(&[Value::from(2)]), Value::from(4));
/// ```
pub fn memoize(func: &Func) -> Func {
    let func = func.clone();
    let strategy = if func.arity() == 1 {
        Strategy::Single(RefCell::new(SingleArg::new()))
    } else {
        Strategy::Multi(RefCell::new(CallLog::new()))
    };
    Func::new(func.arity(), move |args| strategy.call(&func, args))
}

/// The cache a wrapper is permanently bound to at wrap time.
enum Strategy {
    /// One declared parameter: identity- and value-keyed stores.
    Single(RefCell<SingleArg>),
    /// Any other declared arity: the append-only call log.
    Multi(RefCell<CallLog>),
}

/// Cache state for a single-argument wrapper.
struct SingleArg {
    refs: RefStore,
    prims: PrimStore,
}

impl SingleArg {
    fn new() -> Self {
        Self { refs: RefStore::new(), prims: PrimStore::new() }
    }
}

impl Strategy {
    fn call(&self, func: &Func, args: &[Value]) -> Value {
        match self {
            Strategy::Single(state) => call_single(state, func, args),
            Strategy::Multi(log) => call_multi(log, func, args),
        }
    }
}

fn call_single(state: &RefCell<SingleArg>, func: &Func, args: &[Value]) -> Value {
    // Only the first actual argument takes part in keying, and the original
    // is invoked with exactly that argument.
    let param = args.first().cloned().unwrap_or_default();

    match classify(&param) {
        Kind::Reference => {
            if let Some(value) = state.borrow_mut().refs.lookup(&param) {
                // A cached `Undefined` result reads as absent here and is
                // recomputed; only the scalar store can genuinely cache it.
                if !value.is_undefined() {
                    #[cfg(feature = "testing")]
                    crate::testing::register_hit();
                    return value;
                }
            }

            // The borrow is released before the call so that the function
            // can reenter its own wrapper.
            let value = func.call(slice::from_ref(&param));
            state.borrow_mut().refs.insert(&param, value.clone());

            #[cfg(feature = "testing")]
            crate::testing::register_miss();

            value
        }
        Kind::Primitive => {
            let key = PrimStore::key(&param);
            if let Some(value) = state.borrow().prims.lookup(key) {
                #[cfg(feature = "testing")]
                crate::testing::register_hit();
                return value;
            }

            let value = func.call(slice::from_ref(&param));
            state.borrow_mut().prims.insert(key, value.clone());

            #[cfg(feature = "testing")]
            crate::testing::register_miss();

            value
        }
    }
}

fn call_multi(log: &RefCell<CallLog>, func: &Func, args: &[Value]) -> Value {
    if let Some(value) = log.borrow().lookup(args) {
        #[cfg(feature = "testing")]
        crate::testing::register_hit();
        return value;
    }

    // The borrow is released before the call so that the function can
    // reenter its own wrapper. The record is appended only once the call
    // returns, so a panicking call caches nothing.
    let value = func.call(args);
    log.borrow_mut().record(args, value.clone());

    #[cfg(feature = "testing")]
    crate::testing::register_miss();

    value
}
