use std::{error, fmt, str::FromStr};

use serde::Serialize;

use crate::ring_deque::{End, RingDeque};

/// A single scripted deque operation, written as `push_front:V`, `push_back:V`, `pop_front`
/// or `pop_back`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Push(End, i64),
    Pop(End),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseOpError {
    UnknownOp(String),
    MissingValue(String),
    UnexpectedValue(String),
    InvalidValue(String),
}

impl fmt::Display for ParseOpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseOpError::UnknownOp(op) => write!(f, "unknown operation \"{}\"", op),
            ParseOpError::MissingValue(op) => write!(f, "\"{}\" requires a value", op),
            ParseOpError::UnexpectedValue(op) => write!(f, "\"{}\" does not take a value", op),
            ParseOpError::InvalidValue(value) => write!(f, "\"{}\" is not an integer", value),
        }
    }
}

impl error::Error for ParseOpError {}

impl FromStr for Op {
    type Err = ParseOpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, value) = match s.trim().split_once(':') {
            Some((name, value)) => (name.trim(), Some(value.trim())),
            None => (s.trim(), None),
        };

        let parse_value = |value: Option<&str>| -> Result<i64, ParseOpError> {
            let value = value.ok_or_else(|| ParseOpError::MissingValue(name.to_string()))?;
            value
                .parse()
                .map_err(|_| ParseOpError::InvalidValue(value.to_string()))
        };
        let reject_value = |end: End| match value {
            Some(_) => Err(ParseOpError::UnexpectedValue(name.to_string())),
            None => Ok(Op::Pop(end)),
        };

        match name {
            "push_front" => Ok(Op::Push(End::Front, parse_value(value)?)),
            "push_back" => Ok(Op::Push(End::Back, parse_value(value)?)),
            "pop_front" => reject_value(End::Front),
            "pop_back" => reject_value(End::Back),
            _ => Err(ParseOpError::UnknownOp(name.to_string())),
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Push(End::Front, value) => write!(f, "push_front:{}", value),
            Op::Push(End::Back, value) => write!(f, "push_back:{}", value),
            Op::Pop(End::Front) => write!(f, "pop_front"),
            Op::Pop(End::Back) => write!(f, "pop_back"),
        }
    }
}

/// The observable state of the deque after one operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Step {
    pub op: String,
    /// The value removed by a pop, if there was one.
    pub popped: Option<i64>,
    pub len: usize,
    pub capacity: usize,
    pub layout: String,
}

impl Op {
    pub fn apply(&self, deque: &mut RingDeque<i64>) -> Step {
        let popped = match *self {
            Op::Push(end, value) => {
                deque.enqueue(value, end);
                None
            }
            Op::Pop(end) => deque.dequeue(end),
        };

        Step {
            op: self.to_string(),
            popped,
            len: deque.len(),
            capacity: deque.capacity(),
            layout: deque.to_string(),
        }
    }
}

/// Runs `ops` in order against `deque`, returning the state after each one.
pub fn replay(deque: &mut RingDeque<i64>, ops: &[Op]) -> Vec<Step> {
    ops.iter()
        .map(|op| {
            let step = op.apply(deque);
            log::debug!("{} -> {}", step.op, step.layout);
            step
        })
        .collect()
}
