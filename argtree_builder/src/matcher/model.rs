use std::collections::HashMap;
use thiserror::Error;

use crate::matcher::api::*;
use crate::model::Invocation;

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum CloseError {
    #[error("too few values provided for '{name}' (provided={provided}, expected={expected}).")]
    TooFewValues {
        name: String,
        provided: usize,
        expected: u8,
    },

    #[error("too many values provided for '{name}' (provided={provided}, expected={expected}).")]
    TooManyValues {
        name: String,
        provided: usize,
        expected: u8,
    },
}

impl CloseError {
    pub(crate) fn provided(&self) -> usize {
        match self {
            CloseError::TooFewValues { provided, .. } | CloseError::TooManyValues { provided, .. } => {
                *provided
            }
        }
    }
}

/// Collects the values for a single option invocation against its bound.
#[derive(Debug)]
pub(crate) struct MatchBuffer {
    name: String,
    bound: Bound,
    values: Vec<OffsetValue>,
}

impl MatchBuffer {
    pub(crate) fn new(name: impl Into<String>, bound: Bound) -> Self {
        Self {
            name: name.into(),
            bound,
            values: Vec::default(),
        }
    }

    pub(crate) fn push(&mut self, offset: usize, value: String) {
        self.values.push((offset, value));
    }

    pub(crate) fn is_open(&self) -> bool {
        match self.bound.upper() {
            Some(n) => self.values.len() < n as usize,
            None => true,
        }
    }

    pub(crate) fn can_close(&self) -> bool {
        self.values.len() >= self.bound.lower() as usize
    }

    pub(crate) fn close(self) -> Result<Vec<OffsetValue>, CloseError> {
        let provided = self.values.len();

        if provided < self.bound.lower() as usize {
            return Err(CloseError::TooFewValues {
                name: self.name,
                provided,
                expected: self.bound.lower(),
            });
        }

        if let Some(upper) = self.bound.upper() {
            if provided > upper as usize {
                return Err(CloseError::TooManyValues {
                    name: self.name,
                    provided,
                    expected: upper,
                });
            }
        }

        Ok(self.values)
    }
}

/// Records every option invocation of a single command level, in command line order.
#[derive(Debug, Default)]
pub(crate) struct InvocationRecorder {
    history: Vec<(OptionId, Invocation)>,
}

impl InvocationRecorder {
    pub(crate) fn record(&mut self, option: OptionId, invocation: Invocation) {
        self.history.push((option, invocation));
    }

    pub(crate) fn extend(&mut self, invocations: Vec<(OptionId, Invocation)>) {
        self.history.extend(invocations);
    }

    pub(crate) fn is_invoked(&self, option: OptionId) -> bool {
        self.history().iter().any(|(id, _)| *id == option)
    }

    pub(crate) fn history(&self) -> &[(OptionId, Invocation)] {
        &self.history
    }

    /// Group the invocations by option, preserving their relative order.
    pub(crate) fn group(self) -> HashMap<OptionId, Vec<Invocation>> {
        let mut grouped: HashMap<OptionId, Vec<Invocation>> = HashMap::default();

        for (option, invocation) in self.history {
            grouped.entry(option).or_default().push(invocation);
        }

        grouped
    }
}
