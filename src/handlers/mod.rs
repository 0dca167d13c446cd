// One module per resource; each exposes post / put / delete.
pub mod data;
pub mod health;
pub mod items;
pub mod sections;
pub mod subsections;
