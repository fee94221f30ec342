//! Text processing, similarity and verification pipeline

pub mod text_processor;
pub mod corpus;
pub mod similarity;
pub mod certificates;
pub mod verifier;
pub mod decision;
pub mod checker;
