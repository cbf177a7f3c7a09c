use std::collections::HashMap;

use crate::catalog::{CatalogError, CatalogResult};
use crate::function::registry::FunctionBuilder;

/// Turns the implementation class of a permanent function into something callable.
/// The session catalog never inspects class names itself.
pub trait FunctionBuilderFactory: Send + Sync {
    fn make_function_builder(
        &self,
        name: &str,
        class_name: &str,
    ) -> CatalogResult<FunctionBuilder>;
}

/// Default factory: building functions from class names is left to whichever layer
/// registers the implementations, so this always fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedBuilderFactory;

impl FunctionBuilderFactory for UnsupportedBuilderFactory {
    fn make_function_builder(
        &self,
        name: &str,
        class_name: &str,
    ) -> CatalogResult<FunctionBuilder> {
        Err(CatalogError::Unsupported {
            reason: format!(
                "Can not build function {name:?} from class {class_name:?} in the session catalog"
            ),
        })
    }
}

/// Factory over a fixed set of implementations registered up front by class name.
#[derive(Default, Clone)]
pub struct StaticBuilderFactory {
    builders: HashMap<String, FunctionBuilder>,
}

impl StaticBuilderFactory {
    pub fn with_class(mut self, class_name: &str, builder: FunctionBuilder) -> Self {
        self.builders.insert(class_name.to_string(), builder);
        self
    }
}

impl FunctionBuilderFactory for StaticBuilderFactory {
    fn make_function_builder(
        &self,
        name: &str,
        class_name: &str,
    ) -> CatalogResult<FunctionBuilder> {
        self.builders
            .get(class_name)
            .cloned()
            .ok_or_else(|| CatalogError::Generic {
                reason: format!(
                    "No implementation registered for class {class_name:?} of function {name:?}"
                ),
            })
    }
}
