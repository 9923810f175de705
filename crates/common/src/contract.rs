//! Entry-point convention shared by every contract
//!
//! A contract is driven through three calls: `init` once when an instance is
//! deployed, `invoke` for state-changing operations and `query` for reads.
//! Each call names an operation and passes positional string arguments.

use async_trait::async_trait;
use std::fmt;

use crate::{Error, Result};

/// Which entry surface an operation was routed through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Invoke,
    Query,
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Surface::Invoke => write!(f, "invocation"),
            Surface::Query => write!(f, "query"),
        }
    }
}

/// A contract exposing the `Init` / `Invoke` / `Query` surfaces
///
/// Every call returns `Ok(None)` when the operation produces no payload and
/// `Ok(Some(bytes))` when it does.
#[async_trait]
pub trait Contract: Send + Sync {
    /// Name the contract is mounted under
    fn name(&self) -> &'static str;

    /// Initialize a freshly deployed instance
    async fn init(&self, args: &[String]) -> Result<Option<Vec<u8>>>;

    /// Route a state-changing operation
    async fn invoke(&self, function: &str, args: &[String]) -> Result<Option<Vec<u8>>>;

    /// Route a read-only operation
    async fn query(&self, function: &str, args: &[String]) -> Result<Option<Vec<u8>>>;
}

/// Check that exactly `expected` positional arguments were supplied
pub fn require_args(function: &str, args: &[String], expected: usize) -> Result<()> {
    if args.len() != expected {
        return Err(Error::Arity {
            function: function.to_string(),
            expected,
            actual: args.len(),
        });
    }
    Ok(())
}

/// Check the argument count and move the arguments into a fixed-size array
///
/// Lets request types bind positional arguments by name instead of indexing.
pub fn positional_args<const N: usize>(function: &str, args: &[String]) -> Result<[String; N]> {
    require_args(function, args, N)?;
    args.to_vec()
        .try_into()
        .map_err(|rest: Vec<String>| Error::Arity {
            function: function.to_string(),
            expected: N,
            actual: rest.len(),
        })
}
