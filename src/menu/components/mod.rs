//! Menu subcomponents.
//!
//! Each takes the [`MenuContext`](super::MenuContext) of the menu it belongs
//! to and translates host events into [`MenuAction`](super::MenuAction)s.

mod button;
mod item;
mod items;

pub use button::MenuButton;
pub use item::{ClassName, ItemProps, ItemRenderProps, MenuItem};
pub use items::MenuItems;
