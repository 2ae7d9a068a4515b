// Tue Jan 15 2026 - Alex

pub mod config;
pub mod memory;
pub mod structure;
pub mod ui;

pub use config::Config;
pub use memory::{ByteSource, MemoryError, RomImage};
pub use structure::{
    compile, parse, render, CompositeType, FieldDeclaration, RenderOptions, StructureBuilder,
    StructureError, TypeRegistry, ValueTree,
};
