pub mod components;
pub mod layout;
pub mod quiz;
pub mod upload;

pub use layout::{page, render, titled};
