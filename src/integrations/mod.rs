mod serde;
