pub mod builder;
pub mod builtin;
pub mod registry;
pub mod resource;

pub use builder::{FunctionBuilderFactory, StaticBuilderFactory, UnsupportedBuilderFactory};
pub use registry::{FunctionBuilder, FunctionInfo, FunctionRegistry, SimpleFunctionRegistry};
pub use resource::{ObjectStoreResourceLoader, ResourceLoader};
