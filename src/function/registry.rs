use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use datafusion_expr::Expr;

use crate::catalog::{CatalogError, CatalogResult};

/// Builds an invocation of a function from its (already analysed) arguments.
pub type FunctionBuilder = Arc<dyn Fn(Vec<Expr>) -> CatalogResult<Expr> + Send + Sync>;

/// Descriptive metadata of a registered function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionInfo {
    pub class_name: String,
    pub name: String,
    pub usage: Option<String>,
}

impl FunctionInfo {
    pub fn new(class_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            name: name.into(),
            usage: None,
        }
    }

    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }
}

/// Registry of functions that can be invoked without going to the metastore: built-ins,
/// temporary functions and permanent functions that have already been materialized
/// (the latter under their `db.name` key).
pub trait FunctionRegistry: Send + Sync {
    fn register_function(&mut self, name: &str, info: FunctionInfo, builder: FunctionBuilder);

    fn lookup_function(&self, name: &str, args: Vec<Expr>) -> CatalogResult<Expr>;

    fn lookup_function_info(&self, name: &str) -> Option<FunctionInfo>;

    fn lookup_function_builder(&self, name: &str) -> Option<FunctionBuilder>;

    /// Returns whether anything was removed.
    fn drop_function(&mut self, name: &str) -> bool;

    fn function_exists(&self, name: &str) -> bool {
        self.lookup_function_info(name).is_some()
    }

    fn list_functions(&self) -> Vec<String>;

    fn clear(&mut self);
}

/// Map-backed registry. Function names are case-insensitive.
#[derive(Clone, Default)]
pub struct SimpleFunctionRegistry {
    functions: HashMap<String, (FunctionInfo, FunctionBuilder)>,
}

impl SimpleFunctionRegistry {
    fn key(name: &str) -> String {
        name.to_lowercase()
    }
}

impl fmt::Debug for SimpleFunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleFunctionRegistry")
            .field("functions", &self.list_functions())
            .finish()
    }
}

impl FunctionRegistry for SimpleFunctionRegistry {
    fn register_function(&mut self, name: &str, info: FunctionInfo, builder: FunctionBuilder) {
        self.functions.insert(Self::key(name), (info, builder));
    }

    fn lookup_function(&self, name: &str, args: Vec<Expr>) -> CatalogResult<Expr> {
        let (_, builder) =
            self.functions
                .get(&Self::key(name))
                .ok_or_else(|| CatalogError::Generic {
                    reason: format!("Function {name:?} is not registered"),
                })?;
        builder(args)
    }

    fn lookup_function_info(&self, name: &str) -> Option<FunctionInfo> {
        self.functions
            .get(&Self::key(name))
            .map(|(info, _)| info.clone())
    }

    fn lookup_function_builder(&self, name: &str) -> Option<FunctionBuilder> {
        self.functions
            .get(&Self::key(name))
            .map(|(_, builder)| builder.clone())
    }

    fn drop_function(&mut self, name: &str) -> bool {
        self.functions.remove(&Self::key(name)).is_some()
    }

    fn list_functions(&self) -> Vec<String> {
        let mut names: Vec<String> = self.functions.keys().cloned().collect();
        names.sort();
        names
    }

    fn clear(&mut self) {
        self.functions.clear();
    }
}
