pub mod item;
pub mod section;
pub mod subsection;
pub mod tree_row;

use serde::Deserialize;

pub use item::{Item, NewItem};
pub use section::{NewSection, Section};
pub use subsection::{NewSubsection, Subsection};
pub use tree_row::TreeRow;

/// PUT body shared by all three levels. Only title and content are mutable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
}
