use std::sync::Arc;

use datafusion_expr::expr_fn::{abs, avg, count, lower, max, min, sqrt, sum, upper};
use datafusion_expr::Expr;
use lazy_static::lazy_static;

use crate::catalog::{CatalogError, CatalogResult};
use crate::function::registry::{
    FunctionBuilder, FunctionInfo, FunctionRegistry, SimpleFunctionRegistry,
};

fn unary(name: &'static str, function: fn(Expr) -> Expr) -> FunctionBuilder {
    Arc::new(move |args: Vec<Expr>| -> CatalogResult<Expr> {
        let [arg]: [Expr; 1] =
            args.try_into()
                .map_err(|args: Vec<Expr>| CatalogError::InvalidArguments {
                    name: name.to_string(),
                    reason: format!("expected 1 argument, got {}", args.len()),
                })?;
        Ok(function(arg))
    })
}

// (name, usage, constructor)
const BUILTINS: [(&str, &str, fn(Expr) -> Expr); 9] = [
    ("abs", "abs(expr) - Returns the absolute value of the numeric value.", abs),
    ("sqrt", "sqrt(expr) - Returns the square root of `expr`.", sqrt),
    ("lower", "lower(str) - Returns `str` with all characters changed to lowercase.", lower),
    ("upper", "upper(str) - Returns `str` with all characters changed to uppercase.", upper),
    ("count", "count(expr) - Returns the number of rows for which `expr` is non-null.", count),
    ("sum", "sum(expr) - Returns the sum calculated from values of a group.", sum),
    ("min", "min(expr) - Returns the minimum value of `expr`.", min),
    ("max", "max(expr) - Returns the maximum value of `expr`.", max),
    ("avg", "avg(expr) - Returns the mean calculated from values of a group.", avg),
];

lazy_static! {
    /// The functions every session starts with (and is restored to on reset).
    pub static ref BUILTIN_FUNCTIONS: SimpleFunctionRegistry = {
        let mut registry = SimpleFunctionRegistry::default();
        for (name, usage, function) in BUILTINS {
            registry.register_function(
                name,
                FunctionInfo::new(format!("datafusion_expr::expr_fn::{name}"), name)
                    .with_usage(usage),
                unary(name, function),
            );
        }
        registry
    };
}

/// A fresh registry pre-populated with the built-in functions.
pub fn builtin_registry() -> SimpleFunctionRegistry {
    BUILTIN_FUNCTIONS.clone()
}
