pub mod alert;
pub mod badge;
pub mod button;
pub mod card;
pub mod dialog;
pub mod grid_corner;
pub mod input;
pub mod label;
pub mod spinner;

// Re-export component symbols so callers can `use crate::components::ui::Button` etc.
pub use alert::*;
pub use badge::*;
pub use button::*;
#[allow(unused_imports)]
pub use card::*;
pub use dialog::*;
pub use grid_corner::*;
pub use input::*;
pub use label::*;
pub use spinner::*;
