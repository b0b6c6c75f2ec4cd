//! Shared presentation helpers.

pub mod badges;
pub mod time_fmt;
