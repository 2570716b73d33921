//! SeaORM entities for the relational store.

pub mod comment;
pub mod post;
