use clap::ValueEnum;

/// Which [`Name`](namekit::names::Name) representation holds a parsed name.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum Backing {
    #[default]
    Array,
    String,
}
