pub mod convert;
pub mod currencies;
pub mod select;
pub mod setup;
pub mod ui;
