pub mod response;
pub mod tree;

pub use response::{Ack, ApiResult};
pub use tree::{assemble, ItemNode, SectionNode, SubsectionNode, Tree};
