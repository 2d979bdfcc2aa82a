//! Demonstrates the per-argument key semantics: objects are keyed by
//! allocation identity, scalars by their canonical string form.

use std::cell::Cell;
use std::rc::Rc;

use automemo::{Func, Object, Value, memoize};

fn main() {
    let calls = Rc::new(Cell::new(0u64));
    let greet = Func::new(1, {
        let calls = calls.clone();
        move |args| {
            calls.set(calls.get() + 1);
            Value::from(format!("hello, {}", args[0]))
        }
    });
    let greet = memoize(&greet);

    // [Miss] The cache is empty.
    println!("{}", greet.call(&[Value::from("world")]));

    // [Hit] The number 42 and the string "42" share a canonical key, so
    // whichever arrives first answers for both.
    greet.call(&[Value::from(42)]);
    greet.call(&[Value::from("42")]);

    let user = Object::new();
    user.set("name", "ada");

    // [Miss] Objects key by identity, not by contents.
    greet.call(&[Value::from(user.clone())]);

    // [Hit] A clone is a handle to the same allocation.
    greet.call(&[Value::from(user.clone())]);

    let twin = Object::new();
    twin.set("name", "ada");

    // [Miss] A structurally identical object is still a different key.
    greet.call(&[Value::from(twin)]);

    println!("underlying calls: {}", calls.get());
    assert_eq!(calls.get(), 4);
}
