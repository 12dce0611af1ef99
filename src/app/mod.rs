// Application layer: one pipeline per parser mode.

pub mod pipelines;
