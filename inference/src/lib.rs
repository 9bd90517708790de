//! PPE inspection inference for the LabSafe server.
//!
//! The pipeline pieces, in call order:
//! - [`codec`]: read a stored artifact and base64-encode it for transport
//! - [`client`]: one `generateContent` round trip to the vision model,
//!   behind the substitutable [`VisionBackend`] trait
//! - [`parser`]: structure the model's free-text reply into a
//!   [`common::ComplianceVerdict`], degrading to `unknown` instead of
//!   failing

pub mod client;
pub mod codec;
pub mod parser;
pub mod prompt;

pub use client::{GeminiClient, GeminiConfig, InferenceReply, VisionBackend};
pub use codec::EncodedImage;
