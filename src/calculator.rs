//! Arithmetic operations over validated numbers
//!
//! Operations run only on values the validator has already accepted, so the
//! remaining failure modes are narrow: a zero divisor, and for the sum
//! endpoint, overflow to infinity or a nonzero result vanishing below
//! machine epsilon.

use crate::error::ApiError;
use crate::validator::ValidatedNumber;
use crate::Result;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
        }
    }

    /// Apply the operation to two validated values. Division checks the
    /// divisor before dividing; the other operations cannot fail on finite,
    /// in-range operands.
    pub fn apply(&self, num1: f64, num2: f64) -> Result<f64> {
        match self {
            Operation::Add => Ok(num1 + num2),
            Operation::Subtract => Ok(num1 - num2),
            Operation::Multiply => Ok(num1 * num2),
            Operation::Divide => {
                if num2 == 0.0 {
                    return Err(ApiError::DivideByZero);
                }
                Ok(num1 / num2)
            }
        }
    }
}

impl FromStr for Operation {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "add" => Ok(Operation::Add),
            "subtract" => Ok(Operation::Subtract),
            "multiply" => Ok(Operation::Multiply),
            "divide" => Ok(Operation::Divide),
            other => Err(ApiError::InvalidOperation(other.to_string())),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sum with overflow and underflow detection, used by the `/sum` endpoint.
/// A nonzero result with magnitude below machine epsilon is treated as
/// underflow.
pub fn checked_sum(num1: f64, num2: f64) -> Result<f64> {
    let result = num1 + num2;

    if result.is_infinite() {
        return Err(ApiError::Overflow);
    }

    if result != 0.0 && result.abs() < f64::EPSILON {
        return Err(ApiError::Underflow);
    }

    Ok(result)
}

/// Outcome of a `/calc` operation, echoing inputs under their original
/// numeric types.
#[derive(Debug, Clone, Serialize)]
pub struct CalculationResult {
    pub operation: Operation,
    pub num1: ValidatedNumber,
    pub num2: ValidatedNumber,
    pub res: ValidatedNumber,
}

/// Run a calculator operation end to end on validated inputs.
pub fn calculate(
    operation: Operation,
    num1: ValidatedNumber,
    num2: ValidatedNumber,
) -> Result<CalculationResult> {
    let res = operation.apply(num1.value(), num2.value())?;

    Ok(CalculationResult {
        operation,
        num1,
        num2,
        res: preserve_integer_form(num1, num2, res),
    })
}

/// Keep results integral when both operands were written as integers and
/// the result fits, so `5 + 7` echoes `12` rather than `12.0`.
pub fn preserve_integer_form(
    num1: ValidatedNumber,
    num2: ValidatedNumber,
    res: f64,
) -> ValidatedNumber {
    let both_int = matches!(
        (num1, num2),
        (ValidatedNumber::Int(_), ValidatedNumber::Int(_))
    );

    if both_int && res.fract() == 0.0 && res.abs() <= i64::MAX as f64 {
        ValidatedNumber::Int(res as i64)
    } else {
        ValidatedNumber::Float(res)
    }
}
