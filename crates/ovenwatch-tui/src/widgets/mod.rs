//! Small reusable rendering helpers.

pub mod badges;
pub mod bar_fmt;
pub mod status_indicator;
