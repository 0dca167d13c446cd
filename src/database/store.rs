use async_trait::async_trait;

use crate::database::manager::StoreError;
use crate::database::models::{
    Item, NewItem, NewSection, NewSubsection, NodeUpdate, Section, Subsection, TreeRow,
};

/// Persistence seam for the outline.
///
/// Handlers receive an `Arc<dyn Store>` through the router state. Create
/// operations default a missing `content` to an empty string and append the
/// node after its last sibling. Update and delete acknowledge ids that match
/// nothing. Deletes cascade to descendants.
#[async_trait]
pub trait Store: Send + Sync {
    /// Ensure the tables exist.
    async fn init_schema(&self) -> Result<(), StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;

    /// Flat join of all three levels ordered by section, subsection and item position.
    async fn tree_rows(&self) -> Result<Vec<TreeRow>, StoreError>;

    async fn create_section(&self, new: NewSection) -> Result<Section, StoreError>;
    async fn update_section(&self, id: i32, update: NodeUpdate) -> Result<(), StoreError>;
    async fn delete_section(&self, id: i32) -> Result<(), StoreError>;

    async fn create_subsection(&self, new: NewSubsection) -> Result<Subsection, StoreError>;
    async fn update_subsection(&self, id: i32, update: NodeUpdate) -> Result<(), StoreError>;
    async fn delete_subsection(&self, id: i32) -> Result<(), StoreError>;

    async fn create_item(&self, new: NewItem) -> Result<Item, StoreError>;
    async fn update_item(&self, id: i32, update: NodeUpdate) -> Result<(), StoreError>;
    async fn delete_item(&self, id: i32) -> Result<(), StoreError>;
}
