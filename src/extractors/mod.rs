mod body;
pub use body::RequestBody;
