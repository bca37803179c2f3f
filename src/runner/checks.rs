//! The fixed set of capability checks
//!
//! Every check is a plain function returning [`CheckOutcome`]: a short summary
//! on success, or the [`CheckError`] that stopped it.

use super::fs::ProbeFs;
use serde_json::{json, Value};
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use thiserror::Error;

pub const BASIC_OPERATIONS: &str = "Basic Operations";
pub const FILE_OPERATIONS: &str = "File Operations";
pub const DATA_STRUCTURES: &str = "Data Structures";
pub const ALGORITHMS: &str = "Algorithms";
pub const ERROR_HANDLING: &str = "Error Handling";

pub const PROBE_CONTENT: &str = "This is a test file created by the agent.\nLine 2\nLine 3";

pub type CheckOutcome = Result<String, CheckError>;

/// Faults the error handling check triggers on purpose
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    DivisionByZero,
    IndexOutOfBounds,
    TypeMismatch,
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FaultKind::DivisionByZero => "division by zero",
            FaultKind::IndexOutOfBounds => "index error",
            FaultKind::TypeMismatch => "type error",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("{0}")]
    Assertion(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("{kind}: {message}")]
    Fault { kind: FaultKind, message: String },

    #[error("Should have caught {0}")]
    UnexpectedSuccess(FaultKind),
}

impl CheckError {
    fn fault(kind: FaultKind, message: impl Into<String>) -> Self {
        CheckError::Fault {
            kind,
            message: message.into(),
        }
    }
}

/// Fail the enclosing check with an assertion error unless `$cond` holds
macro_rules! ensure {
    ($cond:expr, $($msg:tt)+) => {
        if !$cond {
            return Err(CheckError::Assertion(format!($($msg)+)));
        }
    };
}

pub fn basic_operations() -> CheckOutcome {
    let result = 2 + 2;
    ensure!(result == 4, "Expected 4, got {}", result);

    let text = "Hello, Agent!";
    ensure!(
        text.chars().count() == 13,
        "Expected length 13, got {}",
        text.chars().count()
    );

    let squared: Vec<i32> = (1..=5).map(|x: i32| x.pow(2)).collect();
    ensure!(
        squared == [1, 4, 9, 16, 25],
        "Unexpected result: {:?}",
        squared
    );

    Ok("Math, strings, and lists working correctly".to_string())
}

/// Write, read back and delete a probe file
///
/// The probe is only removed once the contents matched; a failure earlier in
/// the cycle leaves it behind.
pub fn file_operations(fs: &dyn ProbeFs, path: &Path) -> CheckOutcome {
    fs.write(path, PROBE_CONTENT)?;
    let read_content = fs.read_to_string(path)?;
    ensure!(read_content == PROBE_CONTENT, "File content mismatch");
    fs.remove(path)?;

    Ok("File write/read/delete successful".to_string())
}

pub fn data_structures() -> CheckOutcome {
    let data = json!({
        "name": "Agent Test",
        "version": "1.0",
        "features": ["coding", "testing", "debugging"]
    });

    let encoded = serde_json::to_string_pretty(&data)?;
    let parsed: Value = serde_json::from_str(&encoded)?;
    ensure!(parsed == data, "JSON serialization/deserialization failed");

    let set1: BTreeSet<i32> = (1..=5).collect();
    let set2: BTreeSet<i32> = (4..=8).collect();
    let intersection: BTreeSet<i32> = set1.intersection(&set2).copied().collect();
    ensure!(
        intersection == BTreeSet::from([4, 5]),
        "Expected {{4, 5}}, got {:?}",
        intersection
    );

    Ok("Dictionaries, JSON, and sets working correctly".to_string())
}

pub fn algorithms() -> CheckOutcome {
    let fib_10 = fibonacci(10);
    ensure!(fib_10 == Some(55), "Expected 55, got {:?}", fib_10);

    let mut list = vec![64, 34, 25, 12, 22, 11, 90];
    list.sort_unstable();
    let expected = [11, 12, 22, 25, 34, 64, 90];
    ensure!(list == expected, "Expected {:?}, got {:?}", expected, list);

    ensure!(is_prime(17), "17 should be prime");
    ensure!(!is_prime(18), "18 should not be prime");

    Ok("Fibonacci, sorting, and prime checking working".to_string())
}

pub fn error_handling() -> CheckOutcome {
    expect_fault(divide(10, 0), FaultKind::DivisionByZero)?;

    let items = [1, 2, 3];
    expect_fault(element_at(&items, 10), FaultKind::IndexOutOfBounds)?;

    expect_fault(add_values(&json!("string"), &json!(42)), FaultKind::TypeMismatch)?;

    Ok("All expected errors caught correctly".to_string())
}

/// Largest index whose Fibonacci number fits in a `u64`
pub const MAX_FIBONACCI_INDEX: u32 = 93;

/// Naive recursive Fibonacci; `None` past [`MAX_FIBONACCI_INDEX`]
pub fn fibonacci(n: u32) -> Option<u64> {
    if n > MAX_FIBONACCI_INDEX {
        return None;
    }
    if n <= 1 {
        return Some(n as u64);
    }
    fibonacci(n - 1)?.checked_add(fibonacci(n - 2)?)
}

/// Trial division up to the square root
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    let mut i = 2;
    while below_sqrt(i, n) {
        if n % i == 0 {
            return false;
        }
        i += 1;
    }
    true
}

/// `i * i <= n` without overflowing
fn below_sqrt(i: u64, n: u64) -> bool {
    i <= n / i
}

pub fn divide(a: i64, b: i64) -> Result<i64, CheckError> {
    a.checked_div(b)
        .ok_or_else(|| CheckError::fault(FaultKind::DivisionByZero, "division by zero"))
}

pub fn element_at<T: Copy>(items: &[T], index: usize) -> Result<T, CheckError> {
    items.get(index).copied().ok_or_else(|| {
        CheckError::fault(
            FaultKind::IndexOutOfBounds,
            format!("index {} out of range for length {}", index, items.len()),
        )
    })
}

/// `+` over dynamically typed values: numbers add, strings concatenate
pub fn add_values(a: &Value, b: &Value) -> Result<Value, CheckError> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x
                .checked_add(y)
                .map(Value::from)
                .ok_or_else(|| CheckError::Assertion("integer overflow".to_string())),
            _ => {
                let sum = x.as_f64().unwrap_or(f64::NAN) + y.as_f64().unwrap_or(f64::NAN);
                Ok(Value::from(sum))
            }
        },
        (Value::String(x), Value::String(y)) => Ok(Value::String(format!("{x}{y}"))),
        _ => Err(CheckError::fault(
            FaultKind::TypeMismatch,
            format!(
                "unsupported operand types for +: '{}' and '{}'",
                type_name(a),
                type_name(b)
            ),
        )),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Require `result` to have failed with exactly `expected`
fn expect_fault<T>(result: Result<T, CheckError>, expected: FaultKind) -> Result<(), CheckError> {
    match result {
        Ok(_) => Err(CheckError::UnexpectedSuccess(expected)),
        Err(CheckError::Fault { kind, .. }) if kind == expected => Ok(()),
        Err(other) => Err(other),
    }
}
