// src/domain/category/mod.rs
pub mod entity;
pub mod repository;
pub mod tree;
pub mod value_objects;

pub use entity::CategoryView;
pub use repository::CategoryRepository;
pub use tree::{MAX_TREE_DEPTH, build_category_tree, flatten_category_tree};
pub use value_objects::{CategoryId, ROOT_PARENT_ID};
