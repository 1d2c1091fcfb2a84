pub mod dashboard;
pub mod families;
pub mod memory;
pub mod people;
pub mod tree;
pub mod world;
