// 🧰 UI Utilities - class merging, breakpoints, accessibility
// Leaf helpers shared by the view models, charts and page state

pub mod a11y;
pub mod class_names;
pub mod responsive;

pub use a11y::{chart_aria_label, contrast_ratio, parse_hex_color, readable_text_on, Rgb};
pub use class_names::{merge_classes, when};
pub use responsive::Breakpoint;
