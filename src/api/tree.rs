use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::database::models::TreeRow;

/// Response body of GET /api/data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub sections: Vec<SectionNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionNode {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub position: i32,
    pub subsections: Vec<SubsectionNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsectionNode {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub position: i32,
    pub items: Vec<ItemNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemNode {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub position: i32,
}

/// Fold flat join rows into the nested outline in one pass.
///
/// Nodes are emitted in first-seen order, so the output keeps whatever
/// ordering the query produced. A NULL subsection or item id means the outer
/// join found no child at that level.
pub fn assemble(rows: impl IntoIterator<Item = TreeRow>) -> Tree {
    let mut sections: Vec<SectionNode> = Vec::new();
    let mut section_index: HashMap<i32, usize> = HashMap::new();
    // keyed by (section id, subsection id) -> position in that section's list
    let mut subsection_index: HashMap<(i32, i32), usize> = HashMap::new();

    for row in rows {
        let section_slot = match section_index.get(&row.section_id) {
            Some(&slot) => slot,
            None => {
                sections.push(SectionNode {
                    id: row.section_id,
                    title: row.section_title,
                    content: row.section_content,
                    position: row.section_position,
                    subsections: Vec::new(),
                });
                let slot = sections.len() - 1;
                section_index.insert(row.section_id, slot);
                slot
            }
        };

        let Some(subsection_id) = row.subsection_id else {
            continue;
        };
        let subsections = &mut sections[section_slot].subsections;

        let subsection_slot = match subsection_index.get(&(row.section_id, subsection_id)) {
            Some(&slot) => slot,
            None => {
                subsections.push(SubsectionNode {
                    id: subsection_id,
                    title: row.subsection_title.unwrap_or_default(),
                    content: row.subsection_content.unwrap_or_default(),
                    position: row.subsection_position.unwrap_or_default(),
                    items: Vec::new(),
                });
                let slot = subsections.len() - 1;
                subsection_index.insert((row.section_id, subsection_id), slot);
                slot
            }
        };

        if let Some(item_id) = row.item_id {
            subsections[subsection_slot].items.push(ItemNode {
                id: item_id,
                title: row.item_title.unwrap_or_default(),
                content: row.item_content.unwrap_or_default(),
                position: row.item_position.unwrap_or_default(),
            });
        }
    }

    Tree { sections }
}
