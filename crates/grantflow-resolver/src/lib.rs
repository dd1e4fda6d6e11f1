mod error;
mod resolver;

pub use error::ResolveError;
pub use resolver::{ORG_SHORT_NAME_PLACEHOLDER, Resolver, StandardResolver};
