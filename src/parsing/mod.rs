//! Reaction-database line parsing.
//!
//! The reconciler only needs to know which components a reaction references,
//! so parsers produce a [`reaction::ReactionRecord`] of `(formula, coefficient)`
//! terms. Any type implementing [`reaction::ReactionParser`] (including plain
//! closures) can be plugged in; [`reaction::TextReactionParser`] handles the
//! comma-separated format:
//!
//! ```text
//! REACTIONS
//! # name, n, (coefficient, component) x n, log K...
//! "FeSCN+2", 2, 1.0, "Fe+3", 1.0, "SCN-", -3.02
//! END
//! ```

pub mod reaction;
