//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod config_warning;
mod identifier;
mod literal;
mod permissions;
mod visibility;

pub use config_warning::ConfigWarning;
pub use identifier::Identifier;
pub use literal::{validate_uri, xsd, AttributeValue, Literal, LiteralError, ValueKind};
pub use permissions::Permissions;
pub use visibility::{UnknownVisibility, Visibility};
