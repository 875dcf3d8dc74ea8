//! Outcome type
//!
//! A two-variant value that is either a success or a failure. Every
//! collaborator call in the pipeline returns an `Outcome`, so the driver never
//! has to recover from unwinding: it only inspects values.
//!
//! Composition short-circuits on the first failure:
//!
//! ```
//! use pagerelay::Outcome;
//!
//! let fetched: Outcome<String, u32> = Outcome::Success(2);
//! let published = fetched.flat_map(|pages| {
//!     if pages > 0 {
//!         Outcome::Success(pages * 10)
//!     } else {
//!         Outcome::Failure("nothing to publish".to_string())
//!     }
//! });
//! assert_eq!(published, Outcome::Success(20));
//! ```

use crate::error::Error;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// Either a success value `S` or a failure value `F`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome<F, S> {
    /// The operation succeeded
    Success(S),
    /// The operation failed
    Failure(F),
}

impl<F, S> Outcome<F, S> {
    /// Run a fallible call and capture its result as an outcome
    pub fn attempt<E, C>(call: C) -> Self
    where
        E: Into<F>,
        C: FnOnce() -> std::result::Result<S, E>,
    {
        match call() {
            Ok(value) => Self::Success(value),
            Err(error) => Self::Failure(error.into()),
        }
    }

    /// Check if this is a success
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Check if this is a failure
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Converts into the success value, discarding a failure
    pub fn success(self) -> Option<S> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// Converts into the failure value, discarding a success
    pub fn failure(self) -> Option<F> {
        match self {
            Self::Success(_) => None,
            Self::Failure(error) => Some(error),
        }
    }

    /// Borrow both sides
    pub fn as_ref(&self) -> Outcome<&F, &S> {
        match self {
            Self::Success(value) => Outcome::Success(value),
            Self::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Transform the success value; a failure passes through untouched
    pub fn map<S2>(self, f: impl FnOnce(S) -> S2) -> Outcome<F, S2> {
        match self {
            Self::Success(value) => Outcome::Success(f(value)),
            Self::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Transform the failure value; a success passes through untouched
    pub fn map_failure<F2>(self, f: impl FnOnce(F) -> F2) -> Outcome<F2, S> {
        match self {
            Self::Success(value) => Outcome::Success(value),
            Self::Failure(error) => Outcome::Failure(f(error)),
        }
    }

    /// Chain a dependent fallible step
    ///
    /// `f` only runs on success; a failure is propagated unchanged.
    pub fn flat_map<S2>(self, f: impl FnOnce(S) -> Outcome<F, S2>) -> Outcome<F, S2> {
        match self {
            Self::Success(value) => f(value),
            Self::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Eliminate the outcome into a plain value
    pub fn fold<T>(self, on_failure: impl FnOnce(F) -> T, on_success: impl FnOnce(S) -> T) -> T {
        match self {
            Self::Success(value) => on_success(value),
            Self::Failure(error) => on_failure(error),
        }
    }

    /// The success value, or a default computed only on failure
    pub fn get_or_else(self, default: impl FnOnce() -> S) -> S {
        match self {
            Self::Success(value) => value,
            Self::Failure(_) => default(),
        }
    }

    /// Convert into a standard `Result` so `?` can be used on it
    pub fn into_result(self) -> std::result::Result<S, F> {
        self.into()
    }
}

impl<S> Outcome<Error, S> {
    /// Like [`Outcome::attempt`], but a panic inside `call` also becomes a failure
    ///
    /// Intended for third-party clients whose failure modes include panicking.
    pub fn catching<E, C>(call: C) -> Self
    where
        E: Into<Error>,
        C: FnOnce() -> std::result::Result<S, E>,
    {
        match panic::catch_unwind(AssertUnwindSafe(call)) {
            Ok(Ok(value)) => Self::Success(value),
            Ok(Err(error)) => Self::Failure(error.into()),
            Err(payload) => Self::Failure(Error::Other(format!(
                "call panicked: {}",
                panic_message(payload.as_ref())
            ))),
        }
    }
}

impl<F, S> From<std::result::Result<S, F>> for Outcome<F, S> {
    fn from(result: std::result::Result<S, F>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(error) => Self::Failure(error),
        }
    }
}

impl<F, S> From<Outcome<F, S>> for std::result::Result<S, F> {
    fn from(outcome: Outcome<F, S>) -> Self {
        match outcome {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(error) => Err(error),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
