//! Terminal front-end for the converter.

pub mod convert;
pub mod rates;
pub mod refresh;
pub mod setup;
pub mod ui;
pub mod watch;
