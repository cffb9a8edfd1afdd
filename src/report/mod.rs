pub mod presenter;
pub mod views;
