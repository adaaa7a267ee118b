/// Image decoding helpers.
pub mod decode;
/// Named asset slots with background loading and placeholder fallback.
pub mod store;
