//! Interfaces of learnable action-value models.
mod base;
pub use base::ValueModel;
