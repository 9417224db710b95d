mod attention_policy;
mod version_span;

pub use attention_policy::AttentionPolicy;
pub use version_span::VersionSpan;
