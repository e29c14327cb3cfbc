//! Australian capital gains tax estimates.
//!
//! [`core::calculate`] turns a [`core::CgtInputs`] into a [`core::CgtResults`]
//! with no I/O. [`input`] reads requests and asset lists for the command line.

pub mod core;
pub mod input;
