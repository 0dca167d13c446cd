use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};

use crate::database::manager::StoreError;
use crate::database::models::{
    Item, NewItem, NewSection, NewSubsection, NodeUpdate, Section, Subsection, TreeRow,
};
use crate::database::schema;
use crate::database::store::Store;

// Tables created by older deployments have nullable content/position and a
// plain TIMESTAMP created_at; every read normalizes them.
const TREE_SQL: &str = r#"
    SELECT
        s.id AS section_id, s.title AS section_title,
        COALESCE(s.content, '') AS section_content, COALESCE(s.position, 0) AS section_position,
        ss.id AS subsection_id, ss.title AS subsection_title,
        COALESCE(ss.content, '') AS subsection_content, COALESCE(ss.position, 0) AS subsection_position,
        i.id AS item_id, i.title AS item_title,
        COALESCE(i.content, '') AS item_content, COALESCE(i.position, 0) AS item_position
    FROM sections s
    LEFT JOIN subsections ss ON ss.section_id = s.id
    LEFT JOIN items i ON i.subsection_id = ss.id
    ORDER BY s.position, s.id, ss.position, ss.id, i.position, i.id
"#;

/// The three tables differ only in name and parent key.
#[derive(Debug, Clone, Copy)]
enum Level {
    Section,
    Subsection,
    Item,
}

impl Level {
    fn table(self) -> &'static str {
        match self {
            Level::Section => "sections",
            Level::Subsection => "subsections",
            Level::Item => "items",
        }
    }

    /// (parent table, foreign key column)
    fn parent(self) -> Option<(&'static str, &'static str)> {
        match self {
            Level::Section => None,
            Level::Subsection => Some(("sections", "section_id")),
            Level::Item => Some(("subsections", "subsection_id")),
        }
    }

    /// Column list for RETURNING, matching the row structs.
    fn returning(self) -> String {
        let parent = match self.parent() {
            Some((_, fk)) => format!("{}, ", fk),
            None => String::new(),
        };
        format!(
            "id, {}title, COALESCE(content, '') AS content, COALESCE(position, 0) AS position, \
             created_at::timestamptz AS created_at",
            parent
        )
    }
}

/// PostgreSQL-backed store over a shared sqlx pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a node at `max(sibling position) + 1`.
    ///
    /// The sibling scope is locked for the length of the transaction (the
    /// parent row, or the whole `sections` table for top-level nodes) so two
    /// concurrent inserts under one parent cannot compute the same position.
    /// The parent is not checked for existence; the foreign key rejects it.
    async fn insert<T>(
        &self,
        level: Level,
        parent_id: Option<i32>,
        title: Option<String>,
        content: Option<String>,
    ) -> Result<T, StoreError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let table = level.table();
        let content = content.unwrap_or_default();
        let mut tx = self.pool.begin().await?;

        let row = match level.parent() {
            None => {
                let lock = format!("LOCK TABLE {} IN SHARE ROW EXCLUSIVE MODE", table);
                sqlx::query(&lock).execute(&mut *tx).await?;

                let sql = format!(
                    "INSERT INTO {t} (title, content, position) \
                     SELECT $1, $2, COALESCE(MAX(position), 0) + 1 FROM {t} \
                     RETURNING {r}",
                    t = table,
                    r = level.returning()
                );
                sqlx::query_as::<_, T>(&sql)
                    .bind(title)
                    .bind(content)
                    .fetch_one(&mut *tx)
                    .await?
            }
            Some((parent_table, fk)) => {
                let lock = format!("SELECT id FROM {} WHERE id = $1 FOR UPDATE", parent_table);
                sqlx::query(&lock)
                    .bind(parent_id)
                    .fetch_optional(&mut *tx)
                    .await?;

                let sql = format!(
                    "INSERT INTO {t} ({fk}, title, content, position) \
                     SELECT $1, $2, $3, COALESCE(MAX(position), 0) + 1 FROM {t} WHERE {fk} = $1 \
                     RETURNING {r}",
                    t = table,
                    fk = fk,
                    r = level.returning()
                );
                sqlx::query_as::<_, T>(&sql)
                    .bind(parent_id)
                    .bind(title)
                    .bind(content)
                    .fetch_one(&mut *tx)
                    .await?
            }
        };

        tx.commit().await?;
        Ok(row)
    }

    async fn update(&self, level: Level, id: i32, update: NodeUpdate) -> Result<(), StoreError> {
        let sql = format!(
            "UPDATE {} SET title = $1, content = $2 WHERE id = $3",
            level.table()
        );
        sqlx::query(&sql)
            .bind(update.title)
            .bind(update.content.unwrap_or_default())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete(&self, level: Level, id: i32) -> Result<(), StoreError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", level.table());
        sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl Store for PgStore {
    async fn init_schema(&self) -> Result<(), StoreError> {
        schema::create_tables(&self.pool).await
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn tree_rows(&self) -> Result<Vec<TreeRow>, StoreError> {
        let rows = sqlx::query_as::<_, TreeRow>(TREE_SQL)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn create_section(&self, new: NewSection) -> Result<Section, StoreError> {
        self.insert(Level::Section, None, new.title, new.content).await
    }

    async fn update_section(&self, id: i32, update: NodeUpdate) -> Result<(), StoreError> {
        self.update(Level::Section, id, update).await
    }

    async fn delete_section(&self, id: i32) -> Result<(), StoreError> {
        self.delete(Level::Section, id).await
    }

    async fn create_subsection(&self, new: NewSubsection) -> Result<Subsection, StoreError> {
        self.insert(Level::Subsection, new.section_id, new.title, new.content)
            .await
    }

    async fn update_subsection(&self, id: i32, update: NodeUpdate) -> Result<(), StoreError> {
        self.update(Level::Subsection, id, update).await
    }

    async fn delete_subsection(&self, id: i32) -> Result<(), StoreError> {
        self.delete(Level::Subsection, id).await
    }

    async fn create_item(&self, new: NewItem) -> Result<Item, StoreError> {
        self.insert(Level::Item, new.subsection_id, new.title, new.content)
            .await
    }

    async fn update_item(&self, id: i32, update: NodeUpdate) -> Result<(), StoreError> {
        self.update(Level::Item, id, update).await
    }

    async fn delete_item(&self, id: i32) -> Result<(), StoreError> {
        self.delete(Level::Item, id).await
    }
}
