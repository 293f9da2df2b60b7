//! Fetch pipeline driving word batches through a dictionary source.

mod fetch;

pub use fetch::AudioPipeline;
