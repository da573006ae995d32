// Adapters layer: concrete implementations for external systems (storage, Bedrock, SIGAA portal).

#[cfg(feature = "bedrock")]
pub mod bedrock;
pub mod sigaa;
pub mod storage;
