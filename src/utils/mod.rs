pub mod constants;
pub mod wait_for_element;

pub use wait_for_element::{wait_for_element, wait_for_element_with_text};
