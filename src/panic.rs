//! Panics for internal contract violations.
//!
//! These are programming errors, not runtime outcomes: a caller that trips
//! one has already broken an invariant, so the process aborts through
//! [`Panic::panic`] instead of receiving an [`Err`].

use std::error::Error;

use derive_more::{Display, Error};

pub trait Panic: Error {
    fn panic(&self) -> ! {
        panic!("{}", self)
    }
}

#[derive(Debug, Display, Error)]
#[display("buffer filled past its capacity")]
pub struct OverfillPanic;
impl Panic for OverfillPanic {}

#[derive(Debug, Display, Error)]
#[display("buffer consumed past its filled region")]
pub struct OverdrainPanic;
impl Panic for OverdrainPanic {}
