pub mod lore;
pub mod mcp;
pub mod render;
pub mod tools;
