pub mod direction;
pub mod exposure;
pub mod spot;
