//! Candidate selection over score surfaces.
//!
//! `best` holds the public selectors, `topk` the bounded ranking buffer they
//! share, and `nms` the optional spatial suppression layer.

pub(crate) mod best;
pub(crate) mod nms;
pub(crate) mod topk;
