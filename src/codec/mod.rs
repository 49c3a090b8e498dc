// Format Codecs - the two on-disk shapes of the catalog
//
// Each codec converts an ordered slice of records to one textual
// representation and back:
// - text: the legacy "Project info:" block format, lossy and per-entry
//   tolerant on load
// - json: the tagged-map array, lossless and strict on load

pub mod json;
pub mod text;
