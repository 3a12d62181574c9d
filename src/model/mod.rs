//! In-memory types passed between the pipeline stages.
//!
//! A [`ProfileDocument`] and a [`TemplateHandle`] come out of the loader,
//! and the renderer turns them into markup. Neither outlives a single run.

mod profile;
mod template;

pub(crate) use profile::output_stem;
pub use profile::{DocumentInfo, ProfileDocument};
pub use template::TemplateHandle;
