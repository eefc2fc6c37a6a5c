mod args;

pub use args::{
    CliArgs, Command, CompressionLevel, IconArgs, InitArgs, ResizeFilter, RunArgs, SheetArgs,
    SingleArgs,
};
