//! Property tests over the public wrapping surface.

use std::cell::Cell;
use std::collections::HashSet;
use std::rc::Rc;
use std::slice;

use automemo::{Func, Value, memoize};
use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;

/// An arbitrary scalar value, drawn from a pool small enough that canonical
/// key collisions actually happen.
#[derive(Clone, Debug)]
struct Scalar(Value);

impl Arbitrary for Scalar {
    fn arbitrary(g: &mut Gen) -> Self {
        let value = match u8::arbitrary(g) % 6 {
            0 => Value::Undefined,
            1 => Value::Null,
            2 => Value::from(bool::arbitrary(g)),
            3 => Value::from(f64::from(i8::arbitrary(g) % 8)),
            4 => Value::from((u8::arbitrary(g) % 8).to_string()),
            _ => Value::from(f64::from(i8::arbitrary(g) % 8) / 2.0),
        };
        Scalar(value)
    }
}

/// A counting echo function behind a fresh wrapper.
fn counted_echo(arity: usize) -> (Func, Rc<Cell<usize>>) {
    let calls = Rc::new(Cell::new(0));
    let echo = Func::new(arity, {
        let calls = calls.clone();
        move |args| {
            calls.set(calls.get() + 1);
            args.first().cloned().unwrap_or_default()
        }
    });
    (memoize(&echo), calls)
}

/// One underlying run per distinct canonical key, and replaying the whole
/// call sequence adds no runs and changes no results.
#[quickcheck]
fn underlying_runs_once_per_canonical_key(args: Vec<Scalar>) -> bool {
    let (echo, calls) = counted_echo(1);

    let first: Vec<String> = args
        .iter()
        .map(|s| echo.call(slice::from_ref(&s.0)).to_string())
        .collect();
    let after_first = calls.get();

    let second: Vec<String> = args
        .iter()
        .map(|s| echo.call(slice::from_ref(&s.0)).to_string())
        .collect();

    let distinct: HashSet<String> = args.iter().map(|s| s.0.to_string()).collect();
    after_first == distinct.len() && calls.get() == after_first && first == second
}

/// A cached result is canonically interchangeable with the argument that
/// produced it: every call returns a value with the argument's key string.
#[quickcheck]
fn echo_result_keeps_canonical_form(args: Vec<Scalar>) -> bool {
    let (echo, _) = counted_echo(1);
    args.iter().all(|s| {
        echo.call(slice::from_ref(&s.0)).to_string() == s.0.to_string()
    })
}

/// Two-argument calls memoize by tuple value: one underlying run per
/// distinct pair, none added on replay, sums stable.
#[quickcheck]
fn pairs_memoize_by_value(pairs: Vec<(i8, i8)>) -> bool {
    let calls = Rc::new(Cell::new(0));
    let add = Func::new(2, {
        let calls = calls.clone();
        move |args| {
            calls.set(calls.get() + 1);
            Value::from(args[0].as_num().unwrap() + args[1].as_num().unwrap())
        }
    });
    let add = memoize(&add);

    let run = |(a, b): &(i8, i8)| {
        add.call(&[Value::from(f64::from(*a)), Value::from(f64::from(*b))])
    };

    let first: Vec<Value> = pairs.iter().map(run).collect();
    let after_first = calls.get();
    let second: Vec<Value> = pairs.iter().map(run).collect();

    let distinct: HashSet<(i8, i8)> = pairs.iter().copied().collect();
    after_first == distinct.len() && calls.get() == after_first && first == second
}

/// Zero-argument calls never hit, no matter how often they repeat.
#[quickcheck]
fn zero_arity_always_recomputes(repeats: u8) -> bool {
    let repeats = usize::from(repeats % 32);
    let (answer, calls) = counted_echo(0);
    for _ in 0..repeats {
        answer.call(&[]);
    }
    calls.get() == repeats
}
