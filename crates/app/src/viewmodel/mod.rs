//! View models for the directory front end
//!
//! Each form or card keeps its own state and knows how to turn itself into
//! core types; the shell only wires them to commands.

mod add_cafe;
mod cafes;
mod rating_form;
mod subscribe;

pub use add_cafe::AddCafeForm;
pub use cafes::{render_detail, render_list};
pub use rating_form::RatingForm;
pub use subscribe::SubscribeForm;
