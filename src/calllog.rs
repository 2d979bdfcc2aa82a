//! The call log backing multi-argument wrappers.

use crate::value::Value;

/// An append-only log of `(argument tuple, result)` records.
///
/// Lookup is a linear scan over all recorded calls, newest record first, and
/// the log grows without bound: records are never evicted, reordered or
/// deduplicated. Per-call cost is O(records * arity).
pub(crate) struct CallLog {
    calls: Vec<Record>,
}

struct Record {
    args: Box<[Value]>,
    value: Value,
}

impl CallLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self { calls: Vec::new() }
    }

    /// Finds the most recent record whose tuple matches the incoming
    /// arguments element-wise under strict equality.
    ///
    /// The comparison runs from the last incoming position toward the first,
    /// and a record only matches once it reaches position 0. With zero
    /// incoming arguments the scan is vacuous, so nothing ever matches and
    /// every call recomputes. A stored position past a record's tuple length
    /// reads as `Undefined` rather than failing, so tuples of mismatched
    /// length compare without panicking.
    pub fn lookup(&self, args: &[Value]) -> Option<Value> {
        'records: for record in self.calls.iter().rev() {
            for i in (0..args.len()).rev() {
                let matches = match record.args.get(i) {
                    Some(stored) => stored.strict_eq(&args[i]),
                    None => args[i].is_undefined(),
                };
                if !matches {
                    continue 'records;
                }
                if i == 0 {
                    return Some(record.value.clone());
                }
            }
        }
        None
    }

    /// Appends a record. Call order is preserved forever.
    pub fn record(&mut self, args: &[Value], value: Value) {
        self.calls.push(Record { args: args.into(), value });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nums(ns: &[i32]) -> Vec<Value> {
        ns.iter().map(|&n| Value::from(n)).collect()
    }

    #[test]
    fn test_element_wise_match() {
        let mut log = CallLog::new();
        log.record(&nums(&[1, 2]), Value::from("a"));
        log.record(&nums(&[3, 4]), Value::from("b"));

        assert_eq!(log.lookup(&nums(&[1, 2])), Some(Value::from("a")));
        assert_eq!(log.lookup(&nums(&[3, 4])), Some(Value::from("b")));
        assert_eq!(log.lookup(&nums(&[1, 4])), None);
        assert_eq!(log.lookup(&nums(&[2, 1])), None);
    }

    #[test]
    fn test_newest_record_wins() {
        // Both records match a one-argument probe; the later one is found
        // first.
        let mut log = CallLog::new();
        log.record(&nums(&[1]), Value::from("old"));
        log.record(&[Value::from(1), Value::Undefined], Value::from("new"));
        assert_eq!(log.lookup(&nums(&[1])), Some(Value::from("new")));
    }

    #[test]
    fn test_zero_arguments_never_match() {
        let mut log = CallLog::new();
        assert_eq!(log.lookup(&[]), None);
        log.record(&[], Value::from(7));
        // The record exists, but a vacuous scan can't reach position 0.
        assert_eq!(log.lookup(&[]), None);
    }

    #[test]
    fn test_length_mismatch() {
        let mut log = CallLog::new();
        log.record(&nums(&[1, 2, 3]), Value::from("long"));
        log.record(&nums(&[4]), Value::from("short"));

        // A longer probe reads missing stored positions as `Undefined`.
        assert_eq!(log.lookup(&nums(&[4, 5])), None);
        assert_eq!(
            log.lookup(&[Value::from(4), Value::Undefined]),
            Some(Value::from("short"))
        );

        // A shorter probe ignores stored positions past its own length.
        assert_eq!(log.lookup(&nums(&[1, 2])), Some(Value::from("long")));
    }

    #[test]
    fn test_nan_arguments_never_match() {
        let mut log = CallLog::new();
        log.record(&[Value::from(f64::NAN)], Value::from(1));
        assert_eq!(log.lookup(&[Value::from(f64::NAN)]), None);
    }
}
