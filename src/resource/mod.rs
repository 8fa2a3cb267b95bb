//! Resource object model.
//!
//! - [`ResourceObject`] / [`ResourceList`] for generated objects
//! - [`GeneratedTemplate`] / [`Parameter`] for parameterized templates
//! - [`GroupVersion`] for API version identifiers

pub mod object;
pub mod template;
pub mod version;

pub use object::{ObjectMeta, ResourceList, ResourceObject};
pub use template::{GeneratedTemplate, Parameter, TEMPLATE_API_VERSION, TEMPLATE_KIND};
pub use version::GroupVersion;
