mod builder;
pub use builder::Builder;
