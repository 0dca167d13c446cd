use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::database::manager::StoreError;
use crate::database::models::{
    Item, NewItem, NewSection, NewSubsection, NodeUpdate, Section, Subsection, TreeRow,
};
use crate::database::store::Store;

/// Process-local store with the same constraint behaviour as the SQL schema:
/// NOT NULL title and parent key, foreign keys and cascading deletes. Error
/// messages follow PostgreSQL's wording.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

#[derive(Debug, Default)]
struct Tables {
    sections: Vec<Section>,
    subsections: Vec<Subsection>,
    items: Vec<Item>,
    section_seq: i32,
    subsection_seq: i32,
    item_seq: i32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn not_null(column: &str, table: &str) -> StoreError {
    StoreError::Database(format!(
        "null value in column \"{}\" of relation \"{}\" violates not-null constraint",
        column, table
    ))
}

fn foreign_key(table: &str, column: &str) -> StoreError {
    StoreError::Database(format!(
        "insert or update on table \"{}\" violates foreign key constraint \"{}_{}_fkey\"",
        table, table, column
    ))
}

fn next_position(positions: impl Iterator<Item = i32>) -> i32 {
    positions.max().unwrap_or(0) + 1
}

#[async_trait]
impl Store for MemoryStore {
    async fn init_schema(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn tree_rows(&self) -> Result<Vec<TreeRow>, StoreError> {
        let tables = self.tables.read().await;

        let mut sections: Vec<&Section> = tables.sections.iter().collect();
        sections.sort_by_key(|s| (s.position, s.id));

        let mut rows = Vec::new();
        for section in sections {
            let base = TreeRow {
                section_id: section.id,
                section_title: section.title.clone(),
                section_content: section.content.clone(),
                section_position: section.position,
                ..Default::default()
            };

            let mut subsections: Vec<&Subsection> = tables
                .subsections
                .iter()
                .filter(|ss| ss.section_id == section.id)
                .collect();
            subsections.sort_by_key(|ss| (ss.position, ss.id));

            if subsections.is_empty() {
                rows.push(base);
                continue;
            }

            for subsection in subsections {
                let with_subsection = TreeRow {
                    subsection_id: Some(subsection.id),
                    subsection_title: Some(subsection.title.clone()),
                    subsection_content: Some(subsection.content.clone()),
                    subsection_position: Some(subsection.position),
                    ..base.clone()
                };

                let mut items: Vec<&Item> = tables
                    .items
                    .iter()
                    .filter(|i| i.subsection_id == subsection.id)
                    .collect();
                items.sort_by_key(|i| (i.position, i.id));

                if items.is_empty() {
                    rows.push(with_subsection);
                    continue;
                }

                for item in items {
                    rows.push(TreeRow {
                        item_id: Some(item.id),
                        item_title: Some(item.title.clone()),
                        item_content: Some(item.content.clone()),
                        item_position: Some(item.position),
                        ..with_subsection.clone()
                    });
                }
            }
        }

        Ok(rows)
    }

    async fn create_section(&self, new: NewSection) -> Result<Section, StoreError> {
        let mut tables = self.tables.write().await;
        let title = new.title.ok_or_else(|| not_null("title", "sections"))?;

        tables.section_seq += 1;
        let section = Section {
            id: tables.section_seq,
            title,
            content: new.content.unwrap_or_default(),
            position: next_position(tables.sections.iter().map(|s| s.position)),
            created_at: Utc::now(),
        };
        tables.sections.push(section.clone());
        Ok(section)
    }

    async fn update_section(&self, id: i32, update: NodeUpdate) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if let Some(section) = tables.sections.iter_mut().find(|s| s.id == id) {
            section.title = update.title.ok_or_else(|| not_null("title", "sections"))?;
            section.content = update.content.unwrap_or_default();
        }
        Ok(())
    }

    async fn delete_section(&self, id: i32) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let Tables {
            sections,
            subsections,
            items,
            ..
        } = &mut *tables;

        sections.retain(|s| s.id != id);
        let orphaned: Vec<i32> = subsections
            .iter()
            .filter(|ss| ss.section_id == id)
            .map(|ss| ss.id)
            .collect();
        subsections.retain(|ss| ss.section_id != id);
        items.retain(|i| !orphaned.contains(&i.subsection_id));
        Ok(())
    }

    async fn create_subsection(&self, new: NewSubsection) -> Result<Subsection, StoreError> {
        let mut tables = self.tables.write().await;
        let section_id = new
            .section_id
            .ok_or_else(|| not_null("section_id", "subsections"))?;
        let title = new.title.ok_or_else(|| not_null("title", "subsections"))?;
        if !tables.sections.iter().any(|s| s.id == section_id) {
            return Err(foreign_key("subsections", "section_id"));
        }

        tables.subsection_seq += 1;
        let position = next_position(
            tables
                .subsections
                .iter()
                .filter(|ss| ss.section_id == section_id)
                .map(|ss| ss.position),
        );
        let subsection = Subsection {
            id: tables.subsection_seq,
            section_id,
            title,
            content: new.content.unwrap_or_default(),
            position,
            created_at: Utc::now(),
        };
        tables.subsections.push(subsection.clone());
        Ok(subsection)
    }

    async fn update_subsection(&self, id: i32, update: NodeUpdate) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if let Some(subsection) = tables.subsections.iter_mut().find(|ss| ss.id == id) {
            subsection.title = update.title.ok_or_else(|| not_null("title", "subsections"))?;
            subsection.content = update.content.unwrap_or_default();
        }
        Ok(())
    }

    async fn delete_subsection(&self, id: i32) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        tables.subsections.retain(|ss| ss.id != id);
        tables.items.retain(|i| i.subsection_id != id);
        Ok(())
    }

    async fn create_item(&self, new: NewItem) -> Result<Item, StoreError> {
        let mut tables = self.tables.write().await;
        let subsection_id = new
            .subsection_id
            .ok_or_else(|| not_null("subsection_id", "items"))?;
        let title = new.title.ok_or_else(|| not_null("title", "items"))?;
        if !tables.subsections.iter().any(|ss| ss.id == subsection_id) {
            return Err(foreign_key("items", "subsection_id"));
        }

        tables.item_seq += 1;
        let position = next_position(
            tables
                .items
                .iter()
                .filter(|i| i.subsection_id == subsection_id)
                .map(|i| i.position),
        );
        let item = Item {
            id: tables.item_seq,
            subsection_id,
            title,
            content: new.content.unwrap_or_default(),
            position,
            created_at: Utc::now(),
        };
        tables.items.push(item.clone());
        Ok(item)
    }

    async fn update_item(&self, id: i32, update: NodeUpdate) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if let Some(item) = tables.items.iter_mut().find(|i| i.id == id) {
            item.title = update.title.ok_or_else(|| not_null("title", "items"))?;
            item.content = update.content.unwrap_or_default();
        }
        Ok(())
    }

    async fn delete_item(&self, id: i32) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        tables.items.retain(|i| i.id != id);
        Ok(())
    }
}
