pub mod occlusion;
pub mod oracle;
pub mod sample;
