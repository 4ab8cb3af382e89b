// Resume generation pipeline.
// Flow: extract profile → lay out blocks → render .docx, with the optional
// profile image staged to a scoped temp file for the duration of rendering.

pub mod assembler;
pub mod handlers;
pub mod profile;
pub mod staging;
