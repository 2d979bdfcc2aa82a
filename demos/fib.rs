//! Demonstrates recursing through a memoized wrapper: each distinct `n` is
//! computed once, so the exponential fibonacci call tree collapses to a
//! linear number of underlying invocations.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use automemo::{Func, Value, memoize};

fn main() {
    let calls = Rc::new(Cell::new(0u64));

    // The recursion has to go through the wrapper, so the body calls back
    // into a slot that is filled with the memoized function below.
    let slot: Rc<RefCell<Option<Func>>> = Rc::new(RefCell::new(None));

    let fib = Func::new(1, {
        let calls = calls.clone();
        let slot = slot.clone();
        move |args| {
            calls.set(calls.get() + 1);
            let n = args[0].as_num().unwrap();
            if n < 2.0 {
                return Value::from(n);
            }
            let this = slot.borrow().clone().unwrap();
            let a = this.call(&[Value::from(n - 1.0)]).as_num().unwrap();
            let b = this.call(&[Value::from(n - 2.0)]).as_num().unwrap();
            Value::from(a + b)
        }
    });

    let fib = memoize(&fib);
    *slot.borrow_mut() = Some(fib.clone());

    let result = fib.call(&[Value::from(34)]);
    println!("fib(34) = {result} after {} underlying calls", calls.get());
    assert_eq!(result, Value::from(5702887));
    assert_eq!(calls.get(), 35);

    // The second top-level call doesn't run the body at all.
    fib.call(&[Value::from(34)]);
    assert_eq!(calls.get(), 35);
}
